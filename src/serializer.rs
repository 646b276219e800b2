//! Serialization module for converting Swagger documents to JSON or YAML format.
//!
//! This module provides functions to serialize generated documents into standard formats
//! and write them to files or return them as strings. Because every map in
//! [`SwaggerDocument`] is ordered, serializing the same document twice yields identical
//! bytes.

use crate::document::SwaggerDocument;
use crate::error::Result;
use anyhow::Context;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a Swagger document to JSON format with pretty printing.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```
/// use swagger_declare::generator::DocumentGenerator;
/// use swagger_declare::registry::EndpointRegistry;
/// use swagger_declare::security::SecurityCatalog;
/// use swagger_declare::serializer::serialize_json;
/// use swagger_declare::tags::TagCatalog;
///
/// let doc = DocumentGenerator::new("Swagger API", "1.0")
///     .generate(&EndpointRegistry::new(), &SecurityCatalog::new(), &TagCatalog::new())
///     .unwrap();
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"swagger\": \"2.0\""));
/// ```
pub fn serialize_json(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Serializes a Swagger document to YAML format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Writes string content to a file.
///
/// Creates the file and its parent directories if they don't exist, or overwrites it
/// if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> anyhow::Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
