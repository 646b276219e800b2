use log::debug;
use serde::{Deserialize, Serialize};

/// Swagger Tag object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Tags with descriptions, unique by name, in first-registration order
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, or replace the description of an existing one in place
    pub fn register(&mut self, name: &str, description: &str) {
        match self.tags.iter_mut().find(|tag| tag.name == name) {
            Some(existing) => {
                debug!("Tag '{}' re-registered, replacing its description", name);
                existing.description = description.to_string();
            }
            None => {
                debug!("Registered tag '{}'", name);
                self.tags.push(Tag::new(name, description));
            }
        }
    }

    /// Register several tags at once
    pub fn extend<I: IntoIterator<Item = Tag>>(&mut self, tags: I) {
        for tag in tags {
            self.register(&tag.name, &tag.description);
        }
    }

    pub fn list(&self) -> &[Tag] {
        &self.tags
    }
}
