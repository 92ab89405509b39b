//! Catalog data providers.
//!
//! [`RemoteCatalog`] talks to the storefront REST API, [`StaticCatalog`]
//! answers from a JSON snapshot and [`FallbackCatalog`] chains the two so a
//! failing API degrades to the snapshot instead of an error page.

pub mod fallback;
pub mod remote;
pub mod static_snapshot;

pub use fallback::FallbackCatalog;
pub use remote::RemoteCatalog;
pub use static_snapshot::StaticCatalog;
