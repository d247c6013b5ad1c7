//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::DirectoryApi;
pub use error::DirectoryError;
pub use model::{
    Activity, ActivityId, Building, BuildingId, GeoPoint, NearbyQuery, NewActivity, NewBuilding,
    NewOrganization, Organization, OrganizationId, OrganizationSummary, Phone,
    DEFAULT_NEARBY_RADIUS_M,
};
