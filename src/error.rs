use crate::endpoint::HttpMethod;
use crate::parameter::ParameterLocation;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised while declaring endpoints or generating the document
#[derive(Debug)]
pub enum Error {
    InvalidParameter { name: String, reason: String },
    DuplicateParameter { name: String, location: ParameterLocation },
    DuplicateEndpoint { method: HttpMethod, path: String },
    UnknownSecurityScheme(String),
    UnknownScope { scheme: String, scope: String },
    EmptySecurityRequirement,
    UnsupportedType { type_name: String, reason: String },
    DefinitionNameCollision { name: String, first: String, second: String },
    InvalidServerConfig(String),
    IoError(std::io::Error),
    SerializationError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{}': {}", name, reason)
            }
            Error::DuplicateParameter { name, location } => {
                write!(f, "parameter '{}' declared twice in {}", name, location)
            }
            Error::DuplicateEndpoint { method, path } => {
                write!(f, "endpoint {} {} is already registered", method, path)
            }
            Error::UnknownSecurityScheme(key) => {
                write!(f, "security scheme '{}' is not registered", key)
            }
            Error::UnknownScope { scheme, scope } => {
                write!(f, "security scheme '{}' does not define scope '{}'", scheme, scope)
            }
            Error::EmptySecurityRequirement => {
                write!(f, "security requirement group names no scheme")
            }
            Error::UnsupportedType { type_name, reason } => {
                write!(f, "unsupported type {}: {}", type_name, reason)
            }
            Error::DefinitionNameCollision { name, first, second } => write!(
                f,
                "definition name '{}' is shared by distinct types {} and {}",
                name, first, second
            ),
            Error::InvalidServerConfig(msg) => write!(f, "invalid server configuration: {}", msg),
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML: {}", err))
    }
}
