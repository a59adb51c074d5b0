use serde::Deserialize;

use crate::error::{Error, Result};
use crate::generator::Convention;
use crate::naming::NameStyle;

/// A server entry copied into the document's `servers` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Configuration for one generated OpenAPI document.
///
/// Can be built in code or read from YAML:
///
/// ```yaml
/// title: Pet Store
/// version: 1.2.0
/// description: Pets and their owners
/// servers:
///   - url: https://api.example.com
/// name_style: short
/// default_media: json
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub servers: Vec<ServerConfig>,
    /// How component names are derived from type names.
    pub name_style: NameStyle,
    /// Media type token used for request bodies and for routes that do not
    /// name one.
    pub default_media: String,
    /// Where property names come from.
    pub convention: Convention,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            ..Self::default()
        }
    }

    /// Read a configuration from a YAML document. Missing keys keep their
    /// defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_server(mut self, url: &str) -> Self {
        self.servers.push(ServerConfig {
            url: url.to_string(),
            description: None,
        });
        self
    }

    pub fn with_name_style(mut self, style: NameStyle) -> Self {
        self.name_style = style;
        self
    }

    pub fn with_default_media(mut self, token: &str) -> Self {
        self.default_media = token.to_string();
        self
    }

    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "0.1.0".to_string(),
            description: None,
            servers: Vec::new(),
            name_style: NameStyle::default(),
            default_media: "json".to_string(),
            convention: Convention::default(),
        }
    }
}
