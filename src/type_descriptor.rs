//! Type descriptors - the explicit replacement for runtime reflection.
//!
//! Every type that can appear as a request body, a response, or a field of one implements
//! [`ApiSchema`], returning a [`TypeDescriptor`] that states its shape. Descriptors refer to
//! nested types through [`TypeRef`], which carries the nested type's identity and a lazy
//! descriptor function, so self-referential types can be described without infinite
//! recursion.
//!
//! # Example
//!
//! ```
//! use swagger_declare::type_descriptor::{ApiSchema, FieldDef, ObjectDef, TypeDescriptor};
//!
//! struct Category {
//!     name: String,
//!     parent: Option<Box<Category>>,
//! }
//!
//! impl ApiSchema for Category {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::Object(
//!             ObjectDef::new("Category")
//!                 .field(FieldDef::new::<String>("name"))
//!                 .field(FieldDef::new::<Option<Box<Category>>>("parent")),
//!         )
//!     }
//! }
//! ```

use serde_json::Value;
use std::any::TypeId;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

/// Capability implemented by every type that can be described in the document.
pub trait ApiSchema {
    fn descriptor() -> TypeDescriptor;
}

/// Shape of a type.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// A primitive value
    Primitive(PrimitiveType),
    /// A primitive restricted to the listed values
    Enum {
        primitive: PrimitiveType,
        values: Vec<Value>,
    },
    /// A sequence of the referenced type
    Array(TypeRef),
    /// The referenced type, possibly absent
    Optional(TypeRef),
    /// Described exactly as the referenced type (smart pointers)
    Ref(TypeRef),
    /// A named record, emitted as a shared definition
    Object(ObjectDef),
    /// A type that has no schema representation
    Unsupported(String),
}

impl TypeDescriptor {
    /// String enumeration with the given values
    pub fn string_enum(values: &[&str]) -> Self {
        TypeDescriptor::Enum {
            primitive: PrimitiveType::String,
            values: values.iter().map(|v| Value::from(*v)).collect(),
        }
    }

    /// Integer enumeration with the given values
    pub fn integer_enum(values: &[i64]) -> Self {
        TypeDescriptor::Enum {
            primitive: PrimitiveType::I64,
            values: values.iter().map(|v| Value::from(*v)).collect(),
        }
    }
}

/// Primitive types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Bool,
    Char,
    /// Raw file content
    Binary,
}

/// Identity plus lazy descriptor of a type.
///
/// Equality and hashing use the [`TypeId`] only.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    type_name: &'static str,
    describe: fn() -> TypeDescriptor,
}

impl TypeRef {
    pub fn of<T: ApiSchema + ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            describe: T::descriptor,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        (self.describe)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.type_name)
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A named record type.
#[derive(Debug, Clone)]
pub struct ObjectDef {
    /// Definition name, used as the `$ref` target
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl ObjectDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Object named after the last path segment of `T`, without generic arguments
    pub fn for_type<T: ?Sized + 'static>() -> Self {
        Self::new(short_type_name(std::any::type_name::<T>()))
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

/// One field of an [`ObjectDef`].
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Serialized field name
    pub name: String,
    pub ty: TypeRef,
    /// Overrides the required flag inferred from the field type
    pub required: Option<bool>,
    pub description: Option<String>,
}

impl FieldDef {
    pub fn new<T: ApiSchema + ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::of::<T>(),
            required: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `my_crate::models::Page<my_crate::models::Product>` -> `Page`
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Marker type for uploaded file content.
pub struct Binary;

impl ApiSchema for Binary {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveType::Binary)
    }
}

macro_rules! primitive_schema {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl ApiSchema for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Primitive(PrimitiveType::$prim)
                }
            }
        )*
    };
}

primitive_schema! {
    String => String,
    str => String,
    char => Char,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => U64,
    f32 => F32,
    f64 => F64,
}

impl<T: ApiSchema + 'static> ApiSchema for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + 'static> ApiSchema for [T] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + 'static, const N: usize> ApiSchema for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + 'static> ApiSchema for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + 'static> ApiSchema for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + 'static, S: 'static> ApiSchema for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Array(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + 'static> ApiSchema for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Optional(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + ?Sized + 'static> ApiSchema for Box<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ref(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + ?Sized + 'static> ApiSchema for Rc<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ref(TypeRef::of::<T>())
    }
}

impl<T: ApiSchema + ?Sized + 'static> ApiSchema for Arc<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Ref(TypeRef::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod models {
        #[allow(dead_code)]
        pub struct Page<T>(pub T);
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("app::models::Page<app::models::Product>"),
            "Page"
        );
        assert_eq!(short_type_name("Product"), "Product");
    }

    #[test]
    fn test_object_for_type_strips_path_and_generics() {
        let object = ObjectDef::for_type::<models::Page<u8>>();
        assert_eq!(object.name, "Page");
    }

    #[test]
    fn test_type_ref_identity() {
        assert_eq!(TypeRef::of::<String>(), TypeRef::of::<String>());
        assert_ne!(TypeRef::of::<String>(), TypeRef::of::<Vec<String>>());
    }

    #[test]
    fn test_wrapper_descriptors() {
        assert!(matches!(
            Vec::<i32>::descriptor(),
            TypeDescriptor::Array(item) if item == TypeRef::of::<i32>()
        ));
        assert!(matches!(
            Option::<bool>::descriptor(),
            TypeDescriptor::Optional(inner) if inner == TypeRef::of::<bool>()
        ));
        assert!(matches!(
            Box::<String>::descriptor(),
            TypeDescriptor::Ref(inner) if inner == TypeRef::of::<String>()
        ));
        assert!(matches!(
            <[u8; 4]>::descriptor(),
            TypeDescriptor::Array(item) if item == TypeRef::of::<u8>()
        ));
    }

    #[test]
    fn test_field_overrides() {
        let field = FieldDef::new::<Option<String>>("nickname")
            .required()
            .description("display name");
        assert_eq!(field.required, Some(true));
        assert_eq!(field.description.as_deref(), Some("display name"));
        assert_eq!(field.ty, TypeRef::of::<Option<String>>());
    }

    #[test]
    fn test_string_enum_values() {
        match TypeDescriptor::string_enum(&["physical", "digital"]) {
            TypeDescriptor::Enum { primitive, values } => {
                assert_eq!(primitive, PrimitiveType::String);
                assert_eq!(values, vec![Value::from("physical"), Value::from("digital")]);
            }
            other => panic!("unexpected descriptor {:?}", other),
        }
    }
}
