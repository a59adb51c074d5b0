use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Media types a request body or response can be documented with.
///
/// Parsed from a short alias (`json`, `form`, ...) or a full media type
/// string; parameters after `;` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
    Yaml,
    Xml,
    Text,
    Html,
    Form,
    Multipart,
    Binary,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Yaml => "application/yaml",
            MediaType::Xml => "application/xml",
            MediaType::Text => "text/plain",
            MediaType::Html => "text/html",
            MediaType::Form => "application/x-www-form-urlencoded",
            MediaType::Multipart => "multipart/form-data",
            MediaType::Binary => "application/octet-stream",
        }
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let essence = token.split(';').next().unwrap_or_default().trim();
        let media = match essence.to_ascii_lowercase().as_str() {
            "json" | "application/json" => MediaType::Json,
            "yaml" | "yml" | "application/yaml" | "application/x-yaml" | "text/yaml" => {
                MediaType::Yaml
            }
            "xml" | "application/xml" | "text/xml" => MediaType::Xml,
            "text" | "plain" | "text/plain" => MediaType::Text,
            "html" | "text/html" => MediaType::Html,
            "form" | "urlencoded" | "application/x-www-form-urlencoded" => MediaType::Form,
            "multipart" | "multipart/form-data" => MediaType::Multipart,
            "binary" | "octet-stream" | "application/octet-stream" => MediaType::Binary,
            _ => return Err(Error::UnsupportedMediaType(token.to_string())),
        };
        Ok(media)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
