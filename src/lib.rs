//! Swagger Declare - Swagger 2.0 documents from declarative endpoint descriptions.
//!
//! Endpoints are declared in code with typed parameters and model types that describe
//! themselves through [`type_descriptor::ApiSchema`]. Once every endpoint, security scheme
//! and tag is registered, the document is generated in a single pass and can be exported
//! or served over HTTP.
//!
//! # Architecture
//!
//! 1. [`parameter`] - Validated parameter constructors for every location and value kind
//! 2. [`type_descriptor`] - The `ApiSchema` capability model types implement
//! 3. [`schema_generator`] - Converts type descriptors to shared, cycle-safe definitions
//! 4. [`security`] - Security schemes and explicit AND/OR requirement groups
//! 5. [`tags`] - Ordered, de-duplicated tag catalog
//! 6. [`endpoint`] / [`registry`] - Endpoint declarations and their unique registry
//! 7. [`generator`] - Compiles everything into a [`document::SwaggerDocument`]
//! 8. [`serializer`] - Serializes the document to JSON or YAML
//! 9. [`server`] - Serves the document bytes and the viewer
//!
//! # Example Usage
//!
//! ```
//! use swagger_declare::{
//!     endpoint::{Endpoint, HttpMethod},
//!     generator::DocumentGenerator,
//!     parameter::Parameter,
//!     registry::EndpointRegistry,
//!     security::SecurityCatalog,
//!     serializer::serialize_json,
//!     tags::TagCatalog,
//! };
//!
//! let mut security = SecurityCatalog::new();
//! security.register_basic();
//!
//! let mut tags = TagCatalog::new();
//! tags.register("product", "Product operations");
//!
//! let mut registry = EndpointRegistry::new();
//! registry
//!     .add(
//!         Endpoint::new(HttpMethod::Get, "/product/:id")
//!             .tag("product")
//!             .param(Parameter::int_path("id", true, "").unwrap())
//!             .returns::<String>()
//!             .security(security.build_requirement(["basic"]).unwrap()),
//!     )
//!     .unwrap();
//!
//! let document = DocumentGenerator::new("Swagger API", "1.0")
//!     .generate(&registry, &security, &tags)
//!     .unwrap();
//! assert!(document.paths.contains_key("/product/{id}"));
//!
//! let json = serialize_json(&document).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module, which documents the sample API in [`demo`].

pub mod cli;
pub mod demo;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod generator;
pub mod parameter;
pub mod registry;
pub mod schema_generator;
pub mod security;
pub mod serializer;
pub mod server;
pub mod tags;
pub mod type_descriptor;
