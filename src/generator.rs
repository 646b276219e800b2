use crate::document::{
    Info, Operation, ParameterObject, PathItem, Response, SwaggerDocument, SWAGGER_VERSION,
};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::parameter::ParameterLocation;
use crate::registry::EndpointRegistry;
use crate::schema_generator::SchemaGenerator;
use crate::security::SecurityCatalog;
use crate::tags::TagCatalog;
use log::{debug, info, warn};
use std::collections::BTreeMap;

const JSON_MEDIA_TYPE: &str = "application/json";
const MULTIPART_MEDIA_TYPE: &str = "multipart/form-data";

/// Compiles registered endpoints and catalogs into a Swagger document
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    /// Document info section
    info: Info,
    base_path: String,
}

impl DocumentGenerator {
    /// Create a generator for the given API title and version, served under `/`
    pub fn new(title: &str, version: &str) -> Self {
        debug!("Initializing DocumentGenerator");
        Self {
            info: Info {
                title: title.to_string(),
                version: version.to_string(),
                description: None,
            },
            base_path: "/".to_string(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.info.description = Some(description.to_string());
        self
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    /// Build the complete document
    ///
    /// The result depends only on the arguments: the same registry and catalogs always
    /// produce an equal document. Any error aborts generation as a whole.
    pub fn generate(
        &self,
        registry: &EndpointRegistry,
        security: &SecurityCatalog,
        tags: &TagCatalog,
    ) -> Result<SwaggerDocument> {
        info!("Generating document for {} endpoints", registry.len());

        let mut schema_gen = SchemaGenerator::new();
        let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();

        for endpoint in registry.all() {
            debug!("Adding operation: {} {}", endpoint.method, endpoint.path);
            let operation = build_operation(endpoint, security, &mut schema_gen)?;

            let slot = paths.entry(endpoint.path.clone()).or_default().slot(endpoint.method);
            if slot.is_some() {
                return Err(Error::DuplicateEndpoint {
                    method: endpoint.method,
                    path: endpoint.path.clone(),
                });
            }
            *slot = Some(operation);
        }

        let definitions = schema_gen.into_definitions();
        info!(
            "Document built: {} paths, {} definitions, {} security schemes, {} tags",
            paths.len(),
            definitions.len(),
            security.schemes().len(),
            tags.list().len()
        );

        Ok(SwaggerDocument {
            swagger: SWAGGER_VERSION.to_string(),
            info: self.info.clone(),
            base_path: self.base_path.clone(),
            paths,
            definitions,
            security_definitions: security.schemes().clone(),
            tags: tags.list().to_vec(),
        })
    }
}

fn build_operation(
    endpoint: &Endpoint,
    security: &SecurityCatalog,
    schema_gen: &mut SchemaGenerator,
) -> Result<Operation> {
    check_path_parameters(endpoint);

    let mut parameters: Vec<ParameterObject> =
        endpoint.params.iter().map(ParameterObject::from).collect();

    if let Some(body) = &endpoint.body {
        let schema = schema_gen.describe(body)?;
        parameters.push(ParameterObject::body(schema));
    }

    let mut responses = BTreeMap::new();
    let success_schema = endpoint
        .returns
        .as_ref()
        .map(|ty| schema_gen.describe(ty))
        .transpose()?;
    responses.insert(
        "200".to_string(),
        Response {
            description: "OK".to_string(),
            schema: success_schema,
        },
    );
    if let Some(error) = &endpoint.error {
        responses.insert(
            "default".to_string(),
            Response {
                description: "Error".to_string(),
                schema: Some(schema_gen.describe(error)?),
            },
        );
    }

    for group in &endpoint.security {
        security.validate(group)?;
    }

    let has_form = endpoint
        .params
        .iter()
        .any(|p| p.location == ParameterLocation::FormData);
    let consumes = if has_form {
        vec![MULTIPART_MEDIA_TYPE.to_string()]
    } else if endpoint.body.is_some() {
        vec![JSON_MEDIA_TYPE.to_string()]
    } else {
        Vec::new()
    };
    let produces = if endpoint.returns.is_some() || endpoint.error.is_some() {
        vec![JSON_MEDIA_TYPE.to_string()]
    } else {
        Vec::new()
    };

    Ok(Operation {
        tags: endpoint.tags.clone(),
        description: endpoint.description.clone(),
        consumes,
        produces,
        parameters,
        responses,
        security: endpoint.security.clone(),
    })
}

/// Log path parameters and `{placeholders}` that do not match each other
fn check_path_parameters(endpoint: &Endpoint) {
    let placeholders: Vec<&str> = endpoint
        .path
        .split('/')
        .filter_map(|part| part.strip_prefix('{').and_then(|p| p.strip_suffix('}')))
        .collect();

    let declared: Vec<&str> = endpoint
        .params
        .iter()
        .filter(|p| p.location == ParameterLocation::Path)
        .map(|p| p.name.as_str())
        .collect();

    for name in &declared {
        if !placeholders.contains(name) {
            warn!(
                "{} {}: path parameter '{}' does not appear in the path template",
                endpoint.method, endpoint.path, name
            );
        }
    }
    for name in &placeholders {
        if !declared.contains(name) {
            warn!(
                "{} {}: placeholder '{{{}}}' has no declared path parameter",
                endpoint.method, endpoint.path, name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::HttpMethod;
    use crate::parameter::Parameter;
    use crate::security::{ApiKeyLocation, SchemeRef};
    use crate::type_descriptor::{ApiSchema, FieldDef, ObjectDef, TypeDescriptor};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Product;
    impl ApiSchema for Product {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::Object(
                ObjectDef::new("Product")
                    .field(FieldDef::new::<i64>("id"))
                    .field(FieldDef::new::<String>("name")),
            )
        }
    }

    struct ErrorResponse;
    impl ApiSchema for ErrorResponse {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::Object(
                ObjectDef::new("ErrorResponse").field(FieldDef::new::<String>("message")),
            )
        }
    }

    struct Opaque;
    impl ApiSchema for Opaque {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::Unsupported("opaque handle".to_string())
        }
    }

    fn generate(registry: &EndpointRegistry) -> Result<SwaggerDocument> {
        DocumentGenerator::new("Test API", "1.0").generate(
            registry,
            &SecurityCatalog::new(),
            &TagCatalog::new(),
        )
    }

    #[test]
    fn test_new_generator() {
        let generator = DocumentGenerator::new("Swagger API", "1.0")
            .with_description("Products")
            .with_base_path("/api");

        assert_eq!(generator.info.title, "Swagger API");
        assert_eq!(generator.info.version, "1.0");
        assert_eq!(generator.info.description, Some("Products".to_string()));
        assert_eq!(generator.base_path, "/api");
    }

    #[test]
    fn test_empty_registry() {
        let document = generate(&EndpointRegistry::new()).unwrap();

        assert_eq!(document.swagger, "2.0");
        assert_eq!(document.base_path, "/");
        assert!(document.paths.is_empty());
        assert!(document.definitions.is_empty());
    }

    #[test]
    fn test_methods_aggregate_under_one_path() {
        let mut registry = EndpointRegistry::new();
        registry
            .add(Endpoint::new(HttpMethod::Get, "/product").returns::<Vec<Product>>())
            .unwrap();
        registry
            .add(Endpoint::new(HttpMethod::Post, "/product").body::<Product>().returns::<Product>())
            .unwrap();

        let document = generate(&registry).unwrap();

        assert_eq!(document.paths.len(), 1);
        let item = &document.paths["/product"];
        assert!(item.get.is_some());
        assert!(item.post.is_some());
        assert_eq!(document.definitions.len(), 1);
    }

    #[test]
    fn test_operation_without_responses_types() {
        let mut registry = EndpointRegistry::new();
        registry
            .add(Endpoint::new(HttpMethod::Post, "/product-no-error").tag("product"))
            .unwrap();

        let document = generate(&registry).unwrap();
        let value = serde_json::to_value(&document.paths["/product-no-error"]).unwrap();

        assert_eq!(
            value,
            json!({
                "post": {
                    "tags": ["product"],
                    "parameters": [],
                    "responses": {"200": {"description": "OK"}}
                }
            })
        );
    }

    #[test]
    fn test_body_and_responses() {
        let mut registry = EndpointRegistry::new();
        registry
            .add(
                Endpoint::new(HttpMethod::Post, "/product")
                    .body::<Product>()
                    .returns::<Product>()
                    .error::<ErrorResponse>(),
            )
            .unwrap();

        let document = generate(&registry).unwrap();
        let operation = document.paths["/product"].post.as_ref().unwrap();

        assert_eq!(operation.consumes, vec!["application/json".to_string()]);
        assert_eq!(operation.produces, vec!["application/json".to_string()]);
        assert_eq!(operation.parameters.len(), 1);
        assert_eq!(operation.parameters[0].location, "body");
        assert_eq!(
            serde_json::to_value(&operation.responses).unwrap(),
            json!({
                "200": {"description": "OK", "schema": {"$ref": "#/definitions/Product"}},
                "default": {
                    "description": "Error",
                    "schema": {"$ref": "#/definitions/ErrorResponse"}
                }
            })
        );
    }

    #[test]
    fn test_form_parameters_consume_multipart() {
        let mut registry = EndpointRegistry::new();
        registry
            .add(
                Endpoint::new(HttpMethod::Post, "/productUpload")
                    .param(Parameter::file_form("file", true, "File to upload").unwrap())
                    .returns::<Product>(),
            )
            .unwrap();

        let document = generate(&registry).unwrap();
        let operation = document.paths["/productUpload"].post.as_ref().unwrap();
        assert_eq!(operation.consumes, vec!["multipart/form-data".to_string()]);
    }

    #[test]
    fn test_security_groups_rendered() {
        let mut security = SecurityCatalog::new();
        security.register_basic();
        security.register_api_key("api_key", "api_key", ApiKeyLocation::Query);

        let both = security.build_requirement(["api_key", "basic"]).unwrap();
        let basic = security.build_requirement([SchemeRef::new("basic")]).unwrap();

        let mut registry = EndpointRegistry::new();
        registry
            .add(Endpoint::new(HttpMethod::Post, "/multi-secure-product").security(both))
            .unwrap();
        registry
            .add(
                Endpoint::new(HttpMethod::Post, "/either-secure-product")
                    .security(basic)
                    .security(security.build_requirement(["api_key"]).unwrap()),
            )
            .unwrap();

        let document = DocumentGenerator::new("Test API", "1.0")
            .generate(&registry, &security, &TagCatalog::new())
            .unwrap();

        let multi = serde_json::to_value(&document.paths["/multi-secure-product"]).unwrap();
        assert_eq!(multi["post"]["security"], json!([{"api_key": [], "basic": []}]));

        let either = serde_json::to_value(&document.paths["/either-secure-product"]).unwrap();
        assert_eq!(either["post"]["security"], json!([{"basic": []}, {"api_key": []}]));
    }

    #[test]
    fn test_security_checked_against_generation_catalog() {
        let mut declared = SecurityCatalog::new();
        declared.register_basic();

        let mut registry = EndpointRegistry::new();
        registry
            .add(
                Endpoint::new(HttpMethod::Get, "/secure")
                    .security(declared.build_requirement(["basic"]).unwrap()),
            )
            .unwrap();

        let err = DocumentGenerator::new("Test API", "1.0")
            .generate(&registry, &SecurityCatalog::new(), &TagCatalog::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownSecurityScheme(_)));
    }

    #[test]
    fn test_unsupported_type_aborts_generation() {
        let mut registry = EndpointRegistry::new();
        registry
            .add(Endpoint::new(HttpMethod::Get, "/fine").returns::<Product>())
            .unwrap();
        registry
            .add(Endpoint::new(HttpMethod::Get, "/broken").returns::<Opaque>())
            .unwrap();

        let err = generate(&registry).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
    }

    #[test]
    fn test_tags_and_security_definitions_copied() {
        let mut tags = TagCatalog::new();
        tags.register("product", "Product operations");
        let mut security = SecurityCatalog::new();
        security.register_basic();

        let document = DocumentGenerator::new("Test API", "1.0")
            .generate(&EndpointRegistry::new(), &security, &tags)
            .unwrap();

        assert_eq!(document.tags.len(), 1);
        assert_eq!(document.tags[0].description, "Product operations");
        assert!(document.security_definitions.contains_key("basic"));
    }
}
