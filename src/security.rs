//! Security schemes and per-endpoint security requirements.
//!
//! Schemes are registered once in a [`SecurityCatalog`] under a key. Endpoints then refer to
//! them through [`SecurityRequirementGroup`]s built by the catalog: all schemes inside one
//! group must be satisfied together, while several groups on one endpoint are alternatives.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used for the basic authentication scheme
pub const BASIC_KEY: &str = "basic";

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// OAuth2 flows of the Swagger 2.0 dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OAuth2Flow {
    Implicit,
    Password,
    Application,
    AccessCode,
}

impl OAuth2Flow {
    fn uses_authorization_url(&self) -> bool {
        matches!(self, OAuth2Flow::Implicit | OAuth2Flow::AccessCode)
    }

    fn uses_token_url(&self) -> bool {
        !matches!(self, OAuth2Flow::Implicit)
    }
}

/// A registered authentication mechanism, serialized as a Security Scheme object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        flow: OAuth2Flow,
        #[serde(rename = "authorizationUrl", skip_serializing_if = "Option::is_none")]
        authorization_url: Option<String>,
        #[serde(rename = "tokenUrl", skip_serializing_if = "Option::is_none")]
        token_url: Option<String>,
        scopes: BTreeMap<String, String>,
    },
}

impl SecurityScheme {
    fn defines_scope(&self, scope: &str) -> bool {
        match self {
            SecurityScheme::OAuth2 { scopes, .. } => scopes.contains_key(scope),
            _ => false,
        }
    }
}

/// One reference to a scheme from a requirement, with the OAuth2 scopes it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeRef {
    pub key: String,
    pub scopes: Vec<String>,
}

impl SchemeRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            scopes: Vec::new(),
        }
    }

    pub fn with_scopes(key: impl Into<String>, scopes: &[&str]) -> Self {
        Self {
            key: key.into(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&str> for SchemeRef {
    fn from(key: &str) -> Self {
        SchemeRef::new(key)
    }
}

/// Schemes that must all be satisfied together, keyed by scheme with requested scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityRequirementGroup(BTreeMap<String, Vec<String>>);

impl SecurityRequirementGroup {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn scopes(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Registry of named security schemes.
#[derive(Debug, Clone, Default)]
pub struct SecurityCatalog {
    schemes: BTreeMap<String, SecurityScheme>,
}

impl SecurityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, key: &str, scheme: SecurityScheme) {
        if self.schemes.insert(key.to_string(), scheme).is_some() {
            debug!("Security scheme '{}' re-registered, keeping the latest", key);
        } else {
            debug!("Registered security scheme '{}'", key);
        }
    }

    /// Register HTTP basic authentication under [`BASIC_KEY`]
    pub fn register_basic(&mut self) {
        self.register(BASIC_KEY, SecurityScheme::Basic);
    }

    pub fn register_api_key(&mut self, key: &str, name: &str, location: ApiKeyLocation) {
        self.register(
            key,
            SecurityScheme::ApiKey {
                name: name.to_string(),
                location,
            },
        );
    }

    /// Register an OAuth2 scheme; URLs the flow does not use are dropped
    pub fn register_oauth2(
        &mut self,
        key: &str,
        flow: OAuth2Flow,
        token_url: &str,
        authorization_url: &str,
        scopes: &[(&str, &str)],
    ) {
        let scopes = scopes
            .iter()
            .map(|(name, description)| (name.to_string(), description.to_string()))
            .collect();
        self.register(
            key,
            SecurityScheme::OAuth2 {
                flow,
                authorization_url: flow
                    .uses_authorization_url()
                    .then(|| authorization_url.to_string()),
                token_url: flow.uses_token_url().then(|| token_url.to_string()),
                scopes,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&SecurityScheme> {
        self.schemes.get(key)
    }

    /// All registered schemes, sorted by key
    pub fn schemes(&self) -> &BTreeMap<String, SecurityScheme> {
        &self.schemes
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Build one AND-group from the given schemes
    ///
    /// Fails when no scheme is given, when a key was never registered, or when a scope is
    /// not defined by its scheme. An empty group would render as `{}`, which grants
    /// anonymous access.
    pub fn build_requirement<I, S>(&self, schemes: I) -> Result<SecurityRequirementGroup>
    where
        I: IntoIterator<Item = S>,
        S: Into<SchemeRef>,
    {
        let mut group = BTreeMap::new();

        for scheme_ref in schemes {
            let scheme_ref = scheme_ref.into();
            self.check(&scheme_ref.key, &scheme_ref.scopes)?;
            let scopes: &mut Vec<String> = group.entry(scheme_ref.key).or_default();
            for scope in scheme_ref.scopes {
                if !scopes.contains(&scope) {
                    scopes.push(scope);
                }
            }
        }

        if group.is_empty() {
            return Err(Error::EmptySecurityRequirement);
        }

        Ok(SecurityRequirementGroup(group))
    }

    /// Verify a group still matches the registered schemes
    pub fn validate(&self, group: &SecurityRequirementGroup) -> Result<()> {
        if group.is_empty() {
            return Err(Error::EmptySecurityRequirement);
        }
        for (key, scopes) in &group.0 {
            self.check(key, scopes)?;
        }
        Ok(())
    }

    fn check(&self, key: &str, scopes: &[String]) -> Result<()> {
        let scheme = self
            .schemes
            .get(key)
            .ok_or_else(|| Error::UnknownSecurityScheme(key.to_string()))?;

        if let Some(scope) = scopes.iter().find(|scope| !scheme.defines_scope(scope)) {
            return Err(Error::UnknownScope {
                scheme: key.to_string(),
                scope: scope.clone(),
            });
        }
        Ok(())
    }
}
