//! Directory Service Module
//!
//! Organizations, the buildings they occupy and a bounded-depth taxonomy of
//! business activities. Exposes a REST surface guarded by a shared API key
//! and an in-process client for other modules.

// Public exports
pub mod contract;
pub use contract::{
    client::DirectoryApi, error::DirectoryError, Activity, Building, GeoPoint, NearbyQuery,
    NewActivity, NewBuilding, NewOrganization, Organization, Phone,
};

pub mod module;
pub use module::DirectoryServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
