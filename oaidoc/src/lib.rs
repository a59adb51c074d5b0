//! oaidoc: OpenAPI 3 documents built from reflected Rust types.
//!
//! This facade crate re-exports the sub-crates through a single dependency
//! with feature flags. Import everything you need with:
//!
//! ```ignore
//! use oaidoc::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Crate         |
//! |---------|---------|---------------|
//! | `axum`  | no      | `oaidoc-axum` |
//! | `full`  | no      | All of the above |

// Lets `#[derive(Reflect)]` resolve `::oaidoc` inside this crate's own tests.
extern crate self as oaidoc;

// The derive uses `proc-macro-crate` to detect whether the user depends on
// `oaidoc` (facade) or on `oaidoc-core` directly, and generates paths into
// whichever it finds.
pub extern crate oaidoc_core;
pub extern crate oaidoc_macros;

pub use oaidoc_core::*;

pub use oaidoc_macros::Reflect;

#[cfg(feature = "axum")]
pub use oaidoc_axum;

pub mod prelude {
    //! Everything needed to describe types and register routes.
    pub use oaidoc_core::prelude::*;
    pub use oaidoc_macros::Reflect;

    #[cfg(feature = "axum")]
    pub use oaidoc_axum::{init_tracing, openapi_routes};
}
