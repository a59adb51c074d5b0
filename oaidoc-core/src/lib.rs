//! Schema and parameter generation for OpenAPI 3 documents.
//!
//! Types describe themselves through [`Reflect`] (usually derived), and a
//! [`Generator`] walks those descriptors into a [`Document`]: structs become
//! named components, fields tagged with a location become parameters, and
//! everything else is inlined.
//!
//! ```ignore
//! use oaidoc::prelude::*;
//!
//! #[derive(Reflect)]
//! struct GetPet {
//!     #[path]
//!     id: u64,
//! }
//!
//! let mut generator = Generator::new(OpenApiConfig::new("Pets", "1.0.0"));
//! generator.register_route::<GetPet, Pet>(&RouteInfo::get("/pets/{id}"))?;
//! println!("{}", generator.document().to_json()?);
//! ```

// Lets `#[derive(Reflect)]` refer to `::oaidoc_core` from inside this crate.
extern crate self as oaidoc_core;

pub mod classify;
pub mod components;
pub mod config;
pub mod constraints;
pub mod document;
pub mod error;
pub mod generator;
pub mod media;
pub mod naming;
pub mod params;
pub mod prelude;
pub mod reflect;
pub mod route;
pub mod schema;
pub mod tags;

pub use components::ComponentTable;
pub use config::{OpenApiConfig, ServerConfig};
pub use document::{Document, Info, MediaTypeObject, Operation, PathItem, RequestBody, Response, Server};
pub use error::{Error, Result};
pub use generator::{Convention, Generator};
pub use media::MediaType;
pub use naming::NameStyle;
pub use params::{Location, Parameter};
pub use reflect::{CustomSchemaProvider, FieldInfo, Reflect, StructInfo, TypeInfo, TypeKind, WellKnown};
pub use route::RouteInfo;
pub use schema::{Schema, SchemaRef, SchemaType};

pub use http::Method;
