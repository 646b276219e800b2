use crate::endpoint::HttpMethod;
use crate::parameter::{CollectionFormat, Parameter, ValueKind};
use crate::schema_generator::Schema;
use crate::security::{SecurityRequirementGroup, SecurityScheme};
use crate::tags::Tag;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Version marker of the emitted dialect
pub const SWAGGER_VERSION: &str = "2.0";

/// Swagger Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Complete Swagger 2.0 document
///
/// Field order is the serialization order; every map is sorted so output is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    #[serde(rename = "basePath")]
    pub base_path: String,
    pub paths: BTreeMap<String, PathItem>,
    pub definitions: BTreeMap<String, Schema>,
    #[serde(rename = "securityDefinitions")]
    pub security_definitions: BTreeMap<String, SecurityScheme>,
    pub tags: Vec<Tag>,
}

/// Swagger PathItem object - represents all operations for a single path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// PUT operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// DELETE operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// PATCH operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// OPTIONS operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
}

impl PathItem {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
        }
    }

    /// Slot for the given method
    pub fn slot(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
        }
    }
}

/// Swagger Operation object - represents a single API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub produces: Vec<String>,
    pub parameters: Vec<ParameterObject>,
    /// Responses keyed by status code or `default`
    pub responses: BTreeMap<String, Response>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security: Vec<SecurityRequirementGroup>,
}

/// Swagger Parameter object
///
/// Body parameters carry `schema`; every other location carries `type` and friends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterObject {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    #[serde(rename = "collectionFormat", skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
}

/// Swagger Items object describing the elements of an array parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
}

/// Swagger Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl ParameterObject {
    /// Synthesized body parameter pointing at the request body schema
    pub fn body(schema: Schema) -> Self {
        Self {
            name: "body".to_string(),
            location: "body".to_string(),
            description: "Request body".to_string(),
            required: true,
            param_type: None,
            schema: Some(schema),
            items: None,
            collection_format: None,
            enum_values: None,
            minimum: None,
            maximum: None,
            default: None,
        }
    }
}

impl From<&Parameter> for ParameterObject {
    fn from(param: &Parameter) -> Self {
        let enum_values = param.enum_values.as_ref().map(|values| values.to_json());
        let fields = param.fields;

        let mut object = ParameterObject {
            name: param.name.clone(),
            location: param.location.as_str().to_string(),
            description: param.description.clone(),
            required: param.required,
            param_type: Some(param.kind.as_str().to_string()),
            schema: None,
            items: None,
            collection_format: param.collection_format,
            enum_values: None,
            minimum: None,
            maximum: None,
            default: None,
        };

        // Arrays carry enum and constraints on their items
        if let ValueKind::Array(item) = param.kind {
            object.items = Some(Items {
                item_type: item.as_str().to_string(),
                enum_values,
                minimum: fields.min,
                maximum: fields.max,
                default: fields.default,
            });
        } else {
            object.enum_values = enum_values;
            object.minimum = fields.min;
            object.maximum = fields.max;
            object.default = fields.default;
        }

        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{EnumValues, Fields, ItemKind, ParameterLocation, ParameterSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(param: &Parameter) -> Value {
        serde_json::to_value(ParameterObject::from(param)).unwrap()
    }

    #[test]
    fn test_scalar_parameter_object() {
        let param = Parameter::int_path("id", true, "").unwrap();
        assert_eq!(
            render(&param),
            json!({"name": "id", "in": "path", "required": true, "type": "integer"})
        );
    }

    #[test]
    fn test_int_enum_query_object() {
        let param = Parameter::int_enum_query("ids", &[1, 2, 3], true, "").unwrap();
        assert_eq!(
            render(&param),
            json!({
                "name": "ids",
                "in": "query",
                "required": true,
                "type": "integer",
                "enum": [1, 2, 3]
            })
        );
    }

    #[test]
    fn test_constrained_integer_array_query() {
        let fields = Fields { min: Some(0), max: Some(10), default: Some(5) };
        let param = Parameter::int_array_query("ids", &[], true, "", fields).unwrap();

        assert_eq!(
            render(&param),
            json!({
                "name": "ids",
                "in": "query",
                "required": true,
                "type": "array",
                "items": {"type": "integer", "minimum": 0, "maximum": 10, "default": 5}
            })
        );
    }

    #[test]
    fn test_string_array_with_enum_and_collection_format() {
        let kind = ValueKind::Array(ItemKind::String);
        let param = ParameterSpec::new("strs", ParameterLocation::Query, kind)
            .required(true)
            .description("filters")
            .enum_values(EnumValues::strings(&["test1", "test2"]))
            .collection_format(CollectionFormat::Multi)
            .build()
            .unwrap();

        assert_eq!(
            render(&param),
            json!({
                "name": "strs",
                "in": "query",
                "description": "filters",
                "required": true,
                "type": "array",
                "items": {"type": "string", "enum": ["test1", "test2"]},
                "collectionFormat": "multi"
            })
        );
    }

    #[test]
    fn test_file_form_object() {
        let param = Parameter::file_form("file", true, "File to upload").unwrap();
        assert_eq!(
            render(&param),
            json!({
                "name": "file",
                "in": "formData",
                "description": "File to upload",
                "required": true,
                "type": "file"
            })
        );
    }

    #[test]
    fn test_body_parameter_object() {
        let body = ParameterObject::body(Schema::reference("ProductPost"));
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "body",
                "in": "body",
                "description": "Request body",
                "required": true,
                "schema": {"$ref": "#/definitions/ProductPost"}
            })
        );
    }

    #[test]
    fn test_path_item_slots() {
        let mut item = PathItem::default();
        *item.slot(HttpMethod::Delete) = Some(Operation {
            tags: vec![],
            description: String::new(),
            consumes: vec![],
            produces: vec![],
            parameters: vec![],
            responses: BTreeMap::new(),
            security: vec![],
        });

        assert!(item.operation(HttpMethod::Delete).is_some());
        assert!(item.operation(HttpMethod::Get).is_none());
        assert_eq!(serde_json::to_value(&item).unwrap()["delete"]["parameters"], json!([]));
    }
}
