//! Endpoint declarations.
//!
//! An [`Endpoint`] is one `(method, path)` operation together with its parameters, body and
//! response types, tags and security requirements. Endpoints are plain data: validation of
//! their identity happens in [`crate::registry::EndpointRegistry`], and everything else is
//! derived by [`crate::generator::DocumentGenerator`].
//!
//! # Example
//!
//! ```
//! use swagger_declare::endpoint::{Endpoint, HttpMethod};
//! use swagger_declare::parameter::Parameter;
//!
//! let endpoint = Endpoint::new(HttpMethod::Get, "/product/{id}")
//!     .tag("product")
//!     .param(Parameter::int_path("id", true, "product id").unwrap())
//!     .returns::<String>()
//!     .description("Get a product");
//!
//! assert_eq!(endpoint.path(), "/product/{id}");
//! ```

use crate::parameter::Parameter;
use crate::security::SecurityRequirementGroup;
use crate::type_descriptor::{ApiSchema, TypeRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP methods an endpoint can be declared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP OPTIONS method
    Options,
    /// HTTP HEAD method
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete declaration of a single API operation.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) tags: Vec<String>,
    pub(crate) params: Vec<Parameter>,
    pub(crate) body: Option<TypeRef>,
    pub(crate) returns: Option<TypeRef>,
    pub(crate) error: Option<TypeRef>,
    pub(crate) description: String,
    pub(crate) security: Vec<SecurityRequirementGroup>,
}

impl Endpoint {
    /// Create an endpoint with no parameters, body, responses or security
    ///
    /// `:name` path segments are normalized to `{name}`.
    pub fn new(method: HttpMethod, path: &str) -> Self {
        Self {
            method,
            path: convert_path_format(path),
            tags: Vec::new(),
            params: Vec::new(),
            body: None,
            returns: None,
            error: None,
            description: String::new(),
            security: Vec::new(),
        }
    }

    /// Add a tag; repeated tags are kept once
    pub fn tag(mut self, tag: &str) -> Self {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn params<I: IntoIterator<Item = Parameter>>(mut self, params: I) -> Self {
        self.params.extend(params);
        self
    }

    /// Request body type, emitted as a `body` parameter
    pub fn body<T: ApiSchema + ?Sized + 'static>(mut self) -> Self {
        self.body = Some(TypeRef::of::<T>());
        self
    }

    /// Success (`200`) response type
    pub fn returns<T: ApiSchema + ?Sized + 'static>(mut self) -> Self {
        self.returns = Some(TypeRef::of::<T>());
        self
    }

    /// Error (`default`) response type
    pub fn error<T: ApiSchema + ?Sized + 'static>(mut self) -> Self {
        self.error = Some(TypeRef::of::<T>());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Add one alternative requirement group; groups are OR-ed, keys inside a group AND-ed
    pub fn security(mut self, group: SecurityRequirementGroup) -> Self {
        self.security.push(group);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    pub fn security_groups(&self) -> &[SecurityRequirementGroup] {
        &self.security
    }
}

/// Convert path format from :param or {param} to Swagger {param} format
fn convert_path_format(path: &str) -> String {
    path.split('/')
        .map(|part| match part.strip_prefix(':') {
            Some(name) => format!("{{{}}}", name),
            None => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterLocation;

    #[test]
    fn test_convert_path_format_colon_style() {
        let path = "/users/:id/posts/:post_id";
        assert_eq!(convert_path_format(path), "/users/{id}/posts/{post_id}");
    }

    #[test]
    fn test_convert_path_format_brace_style() {
        let path = "/users/{id}/posts/{post_id}";
        assert_eq!(convert_path_format(path), "/users/{id}/posts/{post_id}");
    }

    #[test]
    fn test_convert_path_format_no_params() {
        assert_eq!(convert_path_format("/users/list"), "/users/list");
    }

    #[test]
    fn test_builder_collects_declaration() {
        let endpoint = Endpoint::new(HttpMethod::Post, "/merchant/:merchant")
            .tag("merchant")
            .tag("merchant")
            .param(Parameter::str_path("merchant", true, "").unwrap())
            .params([Parameter::int_query("id", true, "product id").unwrap()])
            .body::<String>()
            .returns::<Vec<String>>()
            .error::<String>()
            .description("Create under merchant");

        assert_eq!(endpoint.method(), HttpMethod::Post);
        assert_eq!(endpoint.path(), "/merchant/{merchant}");
        assert_eq!(endpoint.tags(), &["merchant".to_string()]);
        assert_eq!(endpoint.parameters().len(), 2);
        assert_eq!(endpoint.parameters()[1].location(), ParameterLocation::Query);
        assert_eq!(endpoint.body, Some(TypeRef::of::<String>()));
        assert_eq!(endpoint.returns, Some(TypeRef::of::<Vec<String>>()));
        assert!(endpoint.security_groups().is_empty());
    }

    #[test]
    fn test_method_display_and_serde() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(
            serde_json::to_value(HttpMethod::Patch).unwrap(),
            serde_json::json!("patch")
        );
    }
}
