use crate::endpoint::{Endpoint, HttpMethod};
use crate::error::{Error, Result};
use crate::parameter::ParameterLocation;
use log::debug;
use std::collections::HashSet;

/// Accumulates endpoint declarations in registration order
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
    identities: HashSet<(HttpMethod, String)>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint
    ///
    /// Fails when `(method, path)` is already registered, when two parameters share a
    /// name within the same location, or when formData parameters sit next to a body.
    /// A rejected endpoint leaves the registry unchanged.
    pub fn add(&mut self, endpoint: Endpoint) -> Result<()> {
        debug!("Adding endpoint: {} {}", endpoint.method, endpoint.path);

        let identity = (endpoint.method, endpoint.path.clone());
        if self.identities.contains(&identity) {
            return Err(Error::DuplicateEndpoint {
                method: endpoint.method,
                path: endpoint.path,
            });
        }

        let mut seen: HashSet<(ParameterLocation, &str)> = HashSet::new();
        for param in &endpoint.params {
            if !seen.insert((param.location, param.name.as_str())) {
                return Err(Error::DuplicateParameter {
                    name: param.name.clone(),
                    location: param.location,
                });
            }
        }

        let form_param = endpoint
            .params
            .iter()
            .find(|p| p.location == ParameterLocation::FormData);
        if let (Some(param), Some(_)) = (form_param, endpoint.body.as_ref()) {
            return Err(Error::InvalidParameter {
                name: param.name.clone(),
                reason: "formData parameters cannot be combined with a request body".to_string(),
            });
        }

        self.identities.insert(identity);
        self.endpoints.push(endpoint);
        Ok(())
    }

    /// Add several endpoints, stopping at the first rejected one
    pub fn add_all<I: IntoIterator<Item = Endpoint>>(&mut self, endpoints: I) -> Result<()> {
        for endpoint in endpoints {
            self.add(endpoint)?;
        }
        Ok(())
    }

    pub fn all(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
