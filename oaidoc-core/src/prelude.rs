//! Everything needed to describe types and build a document.
//!
//! ```ignore
//! use oaidoc_core::prelude::*;
//! ```

pub use crate::config::OpenApiConfig;
pub use crate::document::Document;
pub use crate::error::{Error, Result};
pub use crate::generator::{Convention, Generator};
pub use crate::naming::NameStyle;
pub use crate::params::{Location, Parameter};
pub use crate::reflect::{CustomSchemaProvider, Reflect, TypeInfo};
pub use crate::route::RouteInfo;
pub use crate::schema::{Schema, SchemaRef, SchemaType};
pub use http::Method;
