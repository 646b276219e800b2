//! Sample product/merchant API.
//!
//! Declares a small but complete API surface: list, read and create products, enum,
//! array and range constrained parameters, header parameters, a file upload and endpoints
//! guarded by Basic, API key and OAuth2 security. The CLI documents this API, and the
//! integration tests use it as a realistic end-to-end fixture.

use crate::document::SwaggerDocument;
use crate::endpoint::{Endpoint, HttpMethod};
use crate::error::Result;
use crate::generator::DocumentGenerator;
use crate::parameter::{Fields, Parameter};
use crate::registry::EndpointRegistry;
use crate::security::{ApiKeyLocation, OAuth2Flow, SchemeRef, SecurityCatalog, BASIC_KEY};
use crate::tags::{Tag, TagCatalog};
use crate::type_descriptor::{ApiSchema, FieldDef, ObjectDef, TypeDescriptor};

pub const API_KEY: &str = "api_key";
pub const OAUTH2_KEY: &str = "oauth2_name";

/// Kind of goods a product represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    Physical,
    Digital,
}

impl ApiSchema for ProductType {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::string_enum(&["physical", "digital"])
    }
}

/// Product category; categories nest through `parent`
#[derive(Debug, Clone)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub parent: Option<Box<Category>>,
}

impl ApiSchema for Category {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Object(
            ObjectDef::for_type::<Self>()
                .field(FieldDef::new::<u64>("id"))
                .field(FieldDef::new::<String>("name"))
                .field(
                    FieldDef::new::<Option<Box<Category>>>("parent")
                        .description("Enclosing category"),
                ),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub product_type: ProductType,
    pub category: Option<Category>,
    pub images: Vec<String>,
    pub merchant_id: u64,
}

impl ApiSchema for Product {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Object(
            ObjectDef::for_type::<Self>()
                .description("A product offered by a merchant")
                .field(FieldDef::new::<u64>("id"))
                .field(FieldDef::new::<String>("name"))
                .field(FieldDef::new::<f64>("price"))
                .field(FieldDef::new::<ProductType>("type"))
                .field(FieldDef::new::<Option<Category>>("category"))
                .field(FieldDef::new::<Vec<String>>("images").optional())
                .field(FieldDef::new::<u64>("merchant_id")),
        )
    }
}

/// Payload for creating a product
#[derive(Debug, Clone)]
pub struct ProductPost {
    pub name: String,
    pub price: f64,
    pub product_type: ProductType,
    pub category_id: Option<u64>,
}

impl ApiSchema for ProductPost {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Object(
            ObjectDef::for_type::<Self>()
                .field(FieldDef::new::<String>("name"))
                .field(FieldDef::new::<f64>("price"))
                .field(FieldDef::new::<ProductType>("type"))
                .field(FieldDef::new::<Option<u64>>("category_id")),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ErrorResponse {
    pub code: i32,
    pub message: String,
}

impl ApiSchema for ErrorResponse {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Object(
            ObjectDef::for_type::<Self>()
                .field(FieldDef::new::<i32>("code"))
                .field(FieldDef::new::<String>("message")),
        )
    }
}

/// Basic auth, a query API key and a password-flow OAuth2 scheme
pub fn security_catalog() -> SecurityCatalog {
    let mut catalog = SecurityCatalog::new();
    catalog.register_basic();
    catalog.register_api_key(API_KEY, "api_key", ApiKeyLocation::Query);
    catalog.register_oauth2(
        OAUTH2_KEY,
        OAuth2Flow::Password,
        "http://localhost:8080/oauth2/token",
        "http://localhost:8080/oauth2/authorize",
        &[
            ("read:pets", "read your pets"),
            ("write:pets", "modify pets in your account"),
        ],
    );
    catalog
}

pub fn tag_catalog() -> TagCatalog {
    let mut tags = TagCatalog::new();
    tags.register("product", "Product operations");
    tags.register("merchant", "Merchant operations");
    tags.extend([Tag::new("WithStruct", "WithStruct operations")]);
    tags.extend(std::iter::once(Tag {
        name: "header params".to_string(),
        description: "Header parameter operations".to_string(),
    }));
    tags
}

/// Every endpoint of the sample API, in declaration order
pub fn endpoints(security: &SecurityCatalog) -> Result<Vec<Endpoint>> {
    let range = Fields {
        min: Some(0),
        max: Some(10),
        default: Some(5),
    };

    let product = |method: HttpMethod, path: &str| {
        Endpoint::new(method, path)
            .tag("product")
            .returns::<Product>()
            .error::<ErrorResponse>()
    };
    let secured = |path: &str, description: &str| {
        Endpoint::new(HttpMethod::Post, path)
            .tag("Secure")
            .body::<ProductPost>()
            .returns::<Product>()
            .error::<ErrorResponse>()
            .description(description)
    };

    Ok(vec![
        Endpoint::new(HttpMethod::Get, "/product")
            .tag("product")
            .returns::<Vec<Product>>()
            .error::<ErrorResponse>()
            .description("Get all products"),
        product(HttpMethod::Get, "/product/{id}").param(Parameter::int_path("id", true, "")?),
        product(HttpMethod::Post, "/product").body::<ProductPost>(),
        Endpoint::new(HttpMethod::Post, "/product-no-return")
            .tag("product")
            .error::<ErrorResponse>(),
        Endpoint::new(HttpMethod::Post, "/product-no-error").tag("product"),
        product(HttpMethod::Get, "/products")
            .param(Parameter::int_enum_query("ids", &[1, 2, 3], true, "")?),
        product(HttpMethod::Get, "/products2/{ids}")
            .param(Parameter::int_enum_path("ids", &[1, 2, 3], true, "")?),
        product(HttpMethod::Get, "/productsMinMax")
            .param(Parameter::int_array_query("ids", &[], true, "test", range)?),
        product(HttpMethod::Get, "/productsArr")
            .param(Parameter::str_array_query("strs", &[], true, "")?),
        product(HttpMethod::Get, "/productsArrWithEnums")
            .param(Parameter::str_array_query("strs", &["test1", "test2"], true, "")?),
        product(HttpMethod::Get, "/productsArrWithEnumsInPath/{strs}")
            .param(Parameter::str_array_path("strs", &["test1", "test2"], true, "")?),
        Endpoint::new(HttpMethod::Get, "/merchant/:merchant")
            .tag("merchant")
            .params([
                Parameter::str_path("merchant", true, "")?,
                Parameter::int_query("id", true, "product id")?,
            ])
            .returns::<Product>()
            .error::<ErrorResponse>(),
        Endpoint::new(HttpMethod::Post, "/product-header")
            .tag("header params")
            .param(Parameter::int_header("header1", false, "")?)
            .body::<ProductPost>()
            .returns::<Product>()
            .error::<ErrorResponse>(),
        Endpoint::new(HttpMethod::Post, "/product2-header")
            .tag("header params")
            .params([
                Parameter::int_enum_header("header1", &[1, 2, 3], false, "")?,
                Parameter::str_enum_header("header2", &["a", "b", "c"], false, "")?,
            ])
            .body::<ProductPost>()
            .returns::<Product>()
            .error::<ErrorResponse>(),
        Endpoint::new(HttpMethod::Post, "/product3-header")
            .tag("header params")
            .param(Parameter::int_array_header(
                "header1",
                &[1, 2, 3],
                false,
                "",
                Fields::default(),
            )?)
            .body::<ProductPost>()
            .returns::<Product>()
            .error::<ErrorResponse>(),
        Endpoint::new(HttpMethod::Post, "/productUpload")
            .tag("upload")
            .param(Parameter::file_form("file", true, "File to upload")?)
            .returns::<Product>()
            .error::<ErrorResponse>(),
        Endpoint::new(HttpMethod::Get, "/product4/{id}")
            .tag("WithStruct")
            .param(Parameter::int_path("id", true, "")?)
            .returns::<Product>()
            .error::<ErrorResponse>()
            .description("product"),
        secured("/secure-product", "Only Basic Auth")
            .security(security.build_requirement([BASIC_KEY])?),
        secured("/multi-secure-product", "Basic Auth + Api Key Auth")
            .security(security.build_requirement([API_KEY, BASIC_KEY])?),
        secured("/alternative-secure-product", "Basic Auth or Api Key Auth")
            .security(security.build_requirement([BASIC_KEY])?)
            .security(security.build_requirement([API_KEY])?),
        secured("/secure-product-oauth", "OAuth")
            .security(security.build_requirement([SchemeRef::with_scopes(
                OAUTH2_KEY,
                &["read:pets"],
            )])?),
    ])
}

pub fn registry(security: &SecurityCatalog) -> Result<EndpointRegistry> {
    let mut registry = EndpointRegistry::new();
    registry.add_all(endpoints(security)?)?;
    Ok(registry)
}

pub fn generator() -> DocumentGenerator {
    DocumentGenerator::new("Swagger API", "1.0")
}

/// Generate the complete sample document
pub fn document() -> Result<SwaggerDocument> {
    let security = security_catalog();
    let registry = registry(&security)?;
    generator().generate(&registry, &security, &tag_catalog())
}
