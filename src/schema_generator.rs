use crate::error::{Error, Result};
use crate::type_descriptor::{ObjectDef, PrimitiveType, TypeDescriptor, TypeRef};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::TypeId;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Prefix of every `$ref` pointing into the document's definitions
pub const DEFINITIONS_REF: &str = "#/definitions/";

/// Schema generator - converts described types to Swagger schemas
///
/// One generator is used per document generation. It owns every definition discovered
/// so far, so a type referenced from several endpoints is emitted once and shared.
#[derive(Debug, Default)]
pub struct SchemaGenerator {
    /// Generated definitions, keyed by definition name
    definitions: BTreeMap<String, Schema>,
    /// Definition name of every object type already described
    names: HashMap<TypeId, String>,
    /// Rust type that first claimed each definition name
    owners: HashMap<String, &'static str>,
    /// Object types whose definitions are under construction
    visiting: HashSet<TypeId>,
}

/// Swagger Schema object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Reference to a definition
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Wraps a `$ref` that carries annotations of its own
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,
    /// The type of the schema (string, integer, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for primitive types (e.g., "int32", "int64", "float", "double")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required field names for object types, in declaration order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Enum values for enumerated types
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Set for optional values
    #[serde(rename = "x-nullable", default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl Schema {
    /// A `$ref` to the named definition
    pub fn reference(name: &str) -> Self {
        Schema {
            reference: Some(format!("{}{}", DEFINITIONS_REF, name)),
            ..Schema::default()
        }
    }

    fn typed(schema_type: &str, format: Option<&str>) -> Self {
        Schema {
            schema_type: Some(schema_type.to_string()),
            format: format.map(|s| s.to_string()),
            ..Schema::default()
        }
    }

    /// Keywords next to a `$ref` are ignored, so a reference is wrapped in `allOf`
    /// before anything else is attached to it
    fn annotatable(self) -> Self {
        if self.reference.is_some() {
            Schema {
                all_of: Some(vec![self]),
                ..Schema::default()
            }
        } else {
            self
        }
    }

    /// Array of the given items
    pub fn array(items: Schema) -> Self {
        Schema {
            items: Some(Box::new(items)),
            ..Schema::typed("array", None)
        }
    }
}

impl SchemaGenerator {
    pub fn new() -> Self {
        debug!("Initializing SchemaGenerator");
        Self::default()
    }

    /// Generate a schema for a type, registering definitions for every object it reaches
    ///
    /// Objects are returned as a `$ref`; primitives, enums and arrays are inlined.
    pub fn describe(&mut self, ty: &TypeRef) -> Result<Schema> {
        debug!("Generating schema for type: {}", ty.type_name());

        match ty.descriptor() {
            TypeDescriptor::Primitive(prim) => Ok(primitive_to_schema(prim)),
            TypeDescriptor::Enum { primitive, values } => {
                let mut schema = primitive_to_schema(primitive);
                schema.enum_values = Some(values);
                Ok(schema)
            }
            TypeDescriptor::Array(item) => {
                let items = self.describe(&item)?;
                Ok(Schema::array(items))
            }
            TypeDescriptor::Optional(inner) => {
                let mut schema = self.describe(&inner)?.annotatable();
                schema.nullable = true;
                Ok(schema)
            }
            TypeDescriptor::Ref(inner) => self.describe(&inner),
            TypeDescriptor::Object(object) => self.describe_object(ty, object),
            TypeDescriptor::Unsupported(reason) => Err(Error::UnsupportedType {
                type_name: ty.type_name().to_string(),
                reason,
            }),
        }
    }

    fn describe_object(&mut self, ty: &TypeRef, object: ObjectDef) -> Result<Schema> {
        if let Some(name) = self.names.get(&ty.id()) {
            debug!("Schema for {} already exists", name);
            return Ok(Schema::reference(name));
        }

        // Re-entered while building this very type: point at the pending definition
        if self.visiting.contains(&ty.id()) {
            debug!("Cycle detected at {}, emitting reference", object.name);
            return Ok(Schema::reference(&object.name));
        }

        if object.fields.is_empty() {
            return Err(Error::UnsupportedType {
                type_name: ty.type_name().to_string(),
                reason: "object declares no fields".to_string(),
            });
        }

        debug!("Generating object schema for: {}", object.name);

        self.visiting.insert(ty.id());
        let built = self.build_definition(ty, &object);
        self.visiting.remove(&ty.id());

        self.register_definition(ty, &object.name, built?)?;
        Ok(Schema::reference(&object.name))
    }

    fn build_definition(&mut self, ty: &TypeRef, object: &ObjectDef) -> Result<Schema> {
        let mut properties = BTreeMap::new();
        let mut required = Vec::new();

        for field in &object.fields {
            let mut property = self.describe(&field.ty)?;
            if field.description.is_some() {
                property = property.annotatable();
                property.description = field.description.clone();
            }

            let is_required = field.required.unwrap_or(!property.nullable);

            if properties.insert(field.name.clone(), property).is_some() {
                return Err(Error::UnsupportedType {
                    type_name: ty.type_name().to_string(),
                    reason: format!("field '{}' is declared twice", field.name),
                });
            }
            if is_required {
                required.push(field.name.clone());
            }
        }

        Ok(Schema {
            description: object.description.clone(),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            ..Schema::typed("object", None)
        })
    }

    fn register_definition(&mut self, ty: &TypeRef, name: &str, definition: Schema) -> Result<()> {
        match self.definitions.get(name) {
            Some(existing) if *existing != definition => {
                let first = self.owners.get(name).copied().unwrap_or("<unknown>");
                return Err(Error::DefinitionNameCollision {
                    name: name.to_string(),
                    first: first.to_string(),
                    second: ty.type_name().to_string(),
                });
            }
            Some(_) => {
                debug!("{} shares the identical definition {}", ty.type_name(), name);
            }
            None => {
                self.definitions.insert(name.to_string(), definition);
                self.owners.insert(name.to_string(), ty.type_name());
            }
        }

        self.names.insert(ty.id(), name.to_string());
        Ok(())
    }

    /// Definition name assigned to an already described object type
    pub fn definition_name(&self, ty: &TypeRef) -> Option<&str> {
        self.names.get(&ty.id()).map(String::as_str)
    }

    /// Get all generated definitions
    pub fn definitions(&self) -> &BTreeMap<String, Schema> {
        &self.definitions
    }

    pub fn into_definitions(self) -> BTreeMap<String, Schema> {
        self.definitions
    }
}

/// Convert a primitive type to a Swagger schema
fn primitive_to_schema(primitive: PrimitiveType) -> Schema {
    let (schema_type, format) = match primitive {
        PrimitiveType::String => ("string", None),
        PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32 => ("integer", Some("int32")),
        PrimitiveType::I64 | PrimitiveType::I128 => ("integer", Some("int64")),
        PrimitiveType::U8 | PrimitiveType::U16 | PrimitiveType::U32 => ("integer", Some("int32")),
        PrimitiveType::U64 | PrimitiveType::U128 => ("integer", Some("int64")),
        PrimitiveType::F32 => ("number", Some("float")),
        PrimitiveType::F64 => ("number", Some("double")),
        PrimitiveType::Bool => ("boolean", None),
        PrimitiveType::Char => ("string", None),
        PrimitiveType::Binary => ("string", Some("binary")),
    };

    Schema::typed(schema_type, format)
}
