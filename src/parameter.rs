//! Typed, validated request parameters.
//!
//! Every parameter is described by a [`ParameterSpec`] record and validated once by
//! [`ParameterSpec::build`]. The shortcut constructors on [`Parameter`] cover the common
//! location × kind × cardinality combinations and delegate to the same validation, so a
//! [`Parameter`] value is always legal for the Swagger 2.0 dialect.
//!
//! # Example
//!
//! ```
//! use swagger_declare::parameter::{
//!     Fields, Parameter, ParameterLocation, ParameterSpec, ValueKind,
//! };
//!
//! let ids = Parameter::int_array_query(
//!     "ids",
//!     &[],
//!     true,
//!     "product ids",
//!     Fields { min: Some(0), max: Some(10), default: Some(5) },
//! )
//! .unwrap();
//! assert_eq!(ids.name(), "ids");
//!
//! // Primitive body parameters are rejected.
//! let body = ParameterSpec::new("payload", ParameterLocation::Body, ValueKind::String).build();
//! assert!(body.is_err());
//! ```

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Path segment (e.g. `/product/{id}`)
    Path,
    /// Query string
    Query,
    /// HTTP header
    Header,
    /// Request body; only synthesized from an endpoint's body type
    Body,
    /// Form field (`multipart/form-data` or urlencoded)
    FormData,
}

impl ParameterLocation {
    /// The value used for the `in` field of a parameter object
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element type of an array parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Integer,
    String,
    Boolean,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Integer => "integer",
            ItemKind::String => "string",
            ItemKind::Boolean => "boolean",
        }
    }
}

/// Value type of a non-body parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    String,
    Boolean,
    File,
    Array(ItemKind),
}

impl ValueKind {
    /// The value used for the `type` field of a parameter object
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::File => "file",
            ValueKind::Array(_) => "array",
        }
    }

    /// The scalar kind constraints and enum entries apply to
    fn scalar(&self) -> Option<ItemKind> {
        match self {
            ValueKind::Integer => Some(ItemKind::Integer),
            ValueKind::String => Some(ItemKind::String),
            ValueKind::Boolean => Some(ItemKind::Boolean),
            ValueKind::File => None,
            ValueKind::Array(item) => Some(*item),
        }
    }
}

/// Allowed values of a parameter (or of its array items), in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumValues {
    Integer(Vec<i64>),
    String(Vec<String>),
}

impl EnumValues {
    pub fn strings(values: &[&str]) -> Self {
        EnumValues::String(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            EnumValues::Integer(values) => values.len(),
            EnumValues::String(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> ItemKind {
        match self {
            EnumValues::Integer(_) => ItemKind::Integer,
            EnumValues::String(_) => ItemKind::String,
        }
    }

    /// JSON rendering used in the `enum` field
    pub fn to_json(&self) -> Vec<Value> {
        match self {
            EnumValues::Integer(values) => values.iter().map(|v| Value::from(*v)).collect(),
            EnumValues::String(values) => values.iter().map(|v| Value::from(v.as_str())).collect(),
        }
    }
}

/// Numeric constraints for integer parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fields {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub default: Option<i64>,
}

impl Fields {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.default.is_none()
    }
}

/// Serialization of array values in a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionFormat {
    Csv,
    Ssv,
    Tsv,
    Pipes,
    Multi,
}

/// Configuration record for one parameter, validated by [`ParameterSpec::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub location: ParameterLocation,
    pub kind: ValueKind,
    pub required: bool,
    pub description: String,
    pub enum_values: Option<EnumValues>,
    pub fields: Fields,
    pub collection_format: Option<CollectionFormat>,
}

/// A validated parameter declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub(crate) name: String,
    pub(crate) location: ParameterLocation,
    pub(crate) kind: ValueKind,
    pub(crate) required: bool,
    pub(crate) description: String,
    pub(crate) enum_values: Option<EnumValues>,
    pub(crate) fields: Fields,
    pub(crate) collection_format: Option<CollectionFormat>,
}

impl ParameterSpec {
    /// Create an optional parameter without description, enum or constraints
    pub fn new(name: impl Into<String>, location: ParameterLocation, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            location,
            kind,
            required: false,
            description: String::new(),
            enum_values: None,
            fields: Fields::default(),
            collection_format: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn enum_values(mut self, values: EnumValues) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    pub fn collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = Some(format);
        self
    }

    /// Validate the record and turn it into a [`Parameter`]
    pub fn build(self) -> Result<Parameter> {
        debug!(
            "Building {} parameter '{}' of kind {:?}",
            self.location, self.name, self.kind
        );

        if let Some(reason) = self.violation() {
            return Err(Error::InvalidParameter {
                name: self.name,
                reason,
            });
        }

        Ok(Parameter {
            name: self.name,
            location: self.location,
            kind: self.kind,
            required: self.required,
            description: self.description,
            enum_values: self.enum_values,
            fields: self.fields,
            collection_format: self.collection_format,
        })
    }

    /// First rule the record breaks, if any
    fn violation(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("name must not be empty".to_string());
        }
        if self.location == ParameterLocation::Body {
            return Some(
                "body parameters carry a schema reference; declare the endpoint body instead"
                    .to_string(),
            );
        }
        if self.kind == ValueKind::File && self.location != ParameterLocation::FormData {
            return Some(format!(
                "file parameters are only allowed in formData, not {}",
                self.location
            ));
        }
        if self.location == ParameterLocation::Path && !self.required {
            return Some("path parameters must be required".to_string());
        }

        let scalar = self.kind.scalar();

        if !self.fields.is_empty() && scalar != Some(ItemKind::Integer) {
            return Some("minimum, maximum and default apply to integer values only".to_string());
        }
        if let (Some(min), Some(max)) = (self.fields.min, self.fields.max) {
            if min > max {
                return Some(format!("minimum {} exceeds maximum {}", min, max));
            }
        }
        if let Some(default) = self.fields.default {
            let below = self.fields.min.is_some_and(|min| default < min);
            let above = self.fields.max.is_some_and(|max| default > max);
            if below || above {
                return Some(format!(
                    "default {} lies outside [{}, {}]",
                    default,
                    bound(self.fields.min),
                    bound(self.fields.max)
                ));
            }
        }

        if let Some(values) = &self.enum_values {
            let Some(scalar) = scalar else {
                return Some("file parameters cannot declare enum values".to_string());
            };
            if values.is_empty() {
                return Some("enum must list at least one value".to_string());
            }
            if values.kind() != scalar {
                return Some(format!(
                    "enum values are {} but the parameter holds {}",
                    values.kind().as_str(),
                    scalar.as_str()
                ));
            }
        }

        if let Some(format) = self.collection_format {
            if !matches!(self.kind, ValueKind::Array(_)) {
                return Some("collectionFormat applies to array parameters only".to_string());
            }
            let multi_allowed = matches!(
                self.location,
                ParameterLocation::Query | ParameterLocation::FormData
            );
            if format == CollectionFormat::Multi && !multi_allowed {
                return Some(format!(
                    "collectionFormat multi is only valid in query or formData, not {}",
                    self.location
                ));
            }
        }

        None
    }
}

fn bound(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl Parameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn enum_values(&self) -> Option<&EnumValues> {
        self.enum_values.as_ref()
    }

    pub fn fields(&self) -> Fields {
        self.fields
    }

    fn scalar(
        name: &str,
        location: ParameterLocation,
        kind: ValueKind,
        required: bool,
        description: &str,
    ) -> Result<Self> {
        ParameterSpec::new(name, location, kind)
            .required(required)
            .description(description)
            .build()
    }

    fn enumerated(
        name: &str,
        location: ParameterLocation,
        kind: ValueKind,
        values: EnumValues,
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let mut spec = ParameterSpec::new(name, location, kind)
            .required(required)
            .description(description);
        // An empty list on an array shortcut means "no enum"
        if !(values.is_empty() && matches!(kind, ValueKind::Array(_))) {
            spec = spec.enum_values(values);
        }
        spec.build()
    }

    pub fn int_path(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Path, ValueKind::Integer, required, description)
    }

    pub fn int_query(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Query, ValueKind::Integer, required, description)
    }

    pub fn int_header(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Header, ValueKind::Integer, required, description)
    }

    pub fn int_form(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::FormData, ValueKind::Integer, required, description)
    }

    /// Integer query parameter with numeric constraints
    pub fn int_query_with_fields(
        name: &str,
        required: bool,
        description: &str,
        fields: Fields,
    ) -> Result<Self> {
        ParameterSpec::new(name, ParameterLocation::Query, ValueKind::Integer)
            .required(required)
            .description(description)
            .fields(fields)
            .build()
    }

    pub fn str_path(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Path, ValueKind::String, required, description)
    }

    pub fn str_query(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Query, ValueKind::String, required, description)
    }

    pub fn str_header(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Header, ValueKind::String, required, description)
    }

    pub fn str_form(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::FormData, ValueKind::String, required, description)
    }

    pub fn bool_query(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Query, ValueKind::Boolean, required, description)
    }

    pub fn bool_header(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::Header, ValueKind::Boolean, required, description)
    }

    pub fn bool_form(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::FormData, ValueKind::Boolean, required, description)
    }

    pub fn file_form(name: &str, required: bool, description: &str) -> Result<Self> {
        Self::scalar(name, ParameterLocation::FormData, ValueKind::File, required, description)
    }

    pub fn int_enum_path(
        name: &str,
        values: &[i64],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let values = EnumValues::Integer(values.to_vec());
        Self::enumerated(
            name,
            ParameterLocation::Path,
            ValueKind::Integer,
            values,
            required,
            description,
        )
    }

    pub fn int_enum_query(
        name: &str,
        values: &[i64],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let values = EnumValues::Integer(values.to_vec());
        Self::enumerated(
            name,
            ParameterLocation::Query,
            ValueKind::Integer,
            values,
            required,
            description,
        )
    }

    pub fn int_enum_header(
        name: &str,
        values: &[i64],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let values = EnumValues::Integer(values.to_vec());
        Self::enumerated(
            name,
            ParameterLocation::Header,
            ValueKind::Integer,
            values,
            required,
            description,
        )
    }

    pub fn str_enum_path(
        name: &str,
        values: &[&str],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let values = EnumValues::strings(values);
        Self::enumerated(
            name,
            ParameterLocation::Path,
            ValueKind::String,
            values,
            required,
            description,
        )
    }

    pub fn str_enum_query(
        name: &str,
        values: &[&str],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let values = EnumValues::strings(values);
        Self::enumerated(
            name,
            ParameterLocation::Query,
            ValueKind::String,
            values,
            required,
            description,
        )
    }

    pub fn str_enum_header(
        name: &str,
        values: &[&str],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let values = EnumValues::strings(values);
        Self::enumerated(
            name,
            ParameterLocation::Header,
            ValueKind::String,
            values,
            required,
            description,
        )
    }

    /// Integer array in the path; `values` may be empty when items are unrestricted
    pub fn int_array_path(
        name: &str,
        values: &[i64],
        required: bool,
        description: &str,
        fields: Fields,
    ) -> Result<Self> {
        Self::int_array(ParameterLocation::Path, name, values, required, description, fields)
    }

    pub fn int_array_query(
        name: &str,
        values: &[i64],
        required: bool,
        description: &str,
        fields: Fields,
    ) -> Result<Self> {
        Self::int_array(ParameterLocation::Query, name, values, required, description, fields)
    }

    pub fn int_array_header(
        name: &str,
        values: &[i64],
        required: bool,
        description: &str,
        fields: Fields,
    ) -> Result<Self> {
        Self::int_array(ParameterLocation::Header, name, values, required, description, fields)
    }

    fn int_array(
        location: ParameterLocation,
        name: &str,
        values: &[i64],
        required: bool,
        description: &str,
        fields: Fields,
    ) -> Result<Self> {
        let mut spec = ParameterSpec::new(name, location, ValueKind::Array(ItemKind::Integer))
            .required(required)
            .description(description)
            .fields(fields);
        if !values.is_empty() {
            spec = spec.enum_values(EnumValues::Integer(values.to_vec()));
        }
        spec.build()
    }

    pub fn str_array_path(
        name: &str,
        values: &[&str],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let kind = ValueKind::Array(ItemKind::String);
        let values = EnumValues::strings(values);
        Self::enumerated(name, ParameterLocation::Path, kind, values, required, description)
    }

    pub fn str_array_query(
        name: &str,
        values: &[&str],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let kind = ValueKind::Array(ItemKind::String);
        let values = EnumValues::strings(values);
        Self::enumerated(name, ParameterLocation::Query, kind, values, required, description)
    }

    pub fn str_array_header(
        name: &str,
        values: &[&str],
        required: bool,
        description: &str,
    ) -> Result<Self> {
        let kind = ValueKind::Array(ItemKind::String);
        let values = EnumValues::strings(values);
        Self::enumerated(name, ParameterLocation::Header, kind, values, required, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(result: Result<Parameter>) -> String {
        match result {
            Err(Error::InvalidParameter { reason, .. }) => reason,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_int_path_parameter() {
        let param = Parameter::int_path("id", true, "product id").unwrap();
        assert_eq!(param.name(), "id");
        assert_eq!(param.location(), ParameterLocation::Path);
        assert_eq!(param.kind(), ValueKind::Integer);
        assert!(param.is_required());
        assert_eq!(param.description(), "product id");
    }

    #[test]
    fn test_optional_path_parameter_rejected() {
        let reason = reason_of(Parameter::str_path("merchant", false, ""));
        assert!(reason.contains("must be required"));
    }

    #[test]
    fn test_body_parameter_rejected() {
        let result = ParameterSpec::new("payload", ParameterLocation::Body, ValueKind::String)
            .required(true)
            .build();
        let reason = reason_of(result);
        assert!(reason.contains("body"));
    }

    #[test]
    fn test_file_outside_form_rejected() {
        let result =
            ParameterSpec::new("upload", ParameterLocation::Query, ValueKind::File).build();
        assert!(reason_of(result).contains("formData"));
    }

    #[test]
    fn test_file_form_parameter() {
        let param = Parameter::file_form("file", true, "File to upload").unwrap();
        assert_eq!(param.kind(), ValueKind::File);
        assert_eq!(param.location(), ParameterLocation::FormData);
    }

    #[test]
    fn test_min_greater_than_max_rejected() {
        let fields = Fields { min: Some(10), max: Some(0), default: None };
        let reason = reason_of(Parameter::int_query_with_fields("page", false, "", fields));
        assert_eq!(reason, "minimum 10 exceeds maximum 0");
    }

    #[test]
    fn test_default_outside_range_rejected() {
        let fields = Fields { min: Some(0), max: Some(10), default: Some(11) };
        let reason = reason_of(Parameter::int_array_query("ids", &[], true, "", fields));
        assert_eq!(reason, "default 11 lies outside [0, 10]");

        let fields = Fields { min: Some(3), max: None, default: Some(1) };
        let reason = reason_of(Parameter::int_query_with_fields("page", false, "", fields));
        assert_eq!(reason, "default 1 lies outside [3, -]");
    }

    #[test]
    fn test_default_on_bound_accepted() {
        let fields = Fields { min: Some(0), max: Some(10), default: Some(10) };
        assert!(Parameter::int_query_with_fields("limit", false, "", fields).is_ok());
    }

    #[test]
    fn test_fields_on_string_rejected() {
        let result = ParameterSpec::new("name", ParameterLocation::Query, ValueKind::String)
            .fields(Fields { min: Some(1), ..Fields::default() })
            .build();
        assert!(reason_of(result).contains("integer values only"));
    }

    #[test]
    fn test_array_enum_kind_mismatch_rejected() {
        let result = ParameterSpec::new(
            "ids",
            ParameterLocation::Query,
            ValueKind::Array(ItemKind::Integer),
        )
        .enum_values(EnumValues::strings(&["a", "b"]))
        .build();
        assert_eq!(
            reason_of(result),
            "enum values are string but the parameter holds integer"
        );
    }

    #[test]
    fn test_scalar_enum_kind_mismatch_rejected() {
        let result = ParameterSpec::new("flag", ParameterLocation::Header, ValueKind::Boolean)
            .enum_values(EnumValues::Integer(vec![1]))
            .build();
        assert!(reason_of(result).contains("enum values are integer"));
    }

    #[test]
    fn test_empty_enum_rejected_for_scalar() {
        let reason = reason_of(Parameter::int_enum_query("ids", &[], true, ""));
        assert_eq!(reason, "enum must list at least one value");
    }

    #[test]
    fn test_array_shortcut_without_enum() {
        let param = Parameter::str_array_query("strs", &[], true, "").unwrap();
        assert_eq!(param.kind(), ValueKind::Array(ItemKind::String));
        assert!(param.enum_values().is_none());
    }

    #[test]
    fn test_array_shortcut_with_enum() {
        let param = Parameter::str_array_path("strs", &["test1", "test2"], true, "").unwrap();
        assert_eq!(
            param.enum_values(),
            Some(&EnumValues::String(vec!["test1".to_string(), "test2".to_string()]))
        );
    }

    #[test]
    fn test_int_enum_header() {
        let param = Parameter::int_enum_header("header1", &[1, 2, 3], false, "").unwrap();
        assert_eq!(param.location(), ParameterLocation::Header);
        assert_eq!(param.enum_values().map(EnumValues::len), Some(3));
    }

    #[test]
    fn test_multi_collection_format_in_header_rejected() {
        let result = ParameterSpec::new(
            "ids",
            ParameterLocation::Header,
            ValueKind::Array(ItemKind::Integer),
        )
        .collection_format(CollectionFormat::Multi)
        .build();
        assert!(reason_of(result).contains("multi"));
    }

    #[test]
    fn test_collection_format_on_scalar_rejected() {
        let result = ParameterSpec::new("id", ParameterLocation::Query, ValueKind::Integer)
            .collection_format(CollectionFormat::Csv)
            .build();
        assert!(reason_of(result).contains("array parameters only"));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(reason_of(Parameter::str_query(" ", false, "")), "name must not be empty");
    }

    #[test]
    fn test_location_wire_names() {
        assert_eq!(ParameterLocation::FormData.as_str(), "formData");
        assert_eq!(ParameterLocation::Query.to_string(), "query");
        assert_eq!(
            serde_json::to_value(ParameterLocation::FormData).unwrap(),
            serde_json::json!("formData")
        );
    }
}
