//! Domain layer - business logic and services

pub mod geo;
pub mod hierarchy;
pub mod repository;
pub mod service;
pub mod validation;

pub use repository::{ActivityRepository, BuildingRepository, OrganizationRepository};
pub use service::Service;
