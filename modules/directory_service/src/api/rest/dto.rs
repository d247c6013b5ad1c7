//! REST DTOs with serde derives for HTTP API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Building DTOs =====

/// Building response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuildingDto {
    pub id: i32,

    #[schema(example = "Moscow, Lenina st. 1, office 3")]
    pub address: String,

    /// Latitude as decimal text
    #[schema(value_type = String, example = "55.7558")]
    pub latitude: Decimal,

    /// Longitude as decimal text
    #[schema(value_type = String, example = "37.6173")]
    pub longitude: Decimal,
}

/// Create/Update building request
///
/// Coordinates are accepted as JSON strings or numbers.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertBuildingRequest {
    pub address: String,

    #[schema(value_type = String, example = "55.7558")]
    pub latitude: Decimal,

    #[schema(value_type = String, example = "37.6173")]
    pub longitude: Decimal,
}

// ===== Activity DTOs =====

/// Activity response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityDto {
    pub id: i32,

    #[schema(example = "Food")]
    pub name: String,

    /// Parent activity, null for a root
    pub parent_id: Option<i32>,
}

/// Create activity request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateActivityRequest {
    pub name: String,

    #[serde(default)]
    pub parent_id: Option<i32>,
}

/// Rename activity request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RenameActivityRequest {
    pub name: String,
}

// ===== Organization DTOs =====

/// Organization response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub id: i32,

    #[schema(example = "Horns and Hooves LLC")]
    pub name: String,

    /// Phone numbers, flattened
    #[schema(example = json!(["2-222-222", "8-923-666-13-13"]))]
    pub phones: Vec<String>,

    pub building: Option<BuildingDto>,

    pub activities: Vec<ActivityDto>,
}

/// Phone with its id, used in the summary listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhoneDto {
    pub id: i32,
    pub number: String,
}

/// Organization summary returned by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationSummaryDto {
    pub id: i32,
    pub name: String,
    pub phones: Vec<PhoneDto>,
}

/// Create/Update organization request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertOrganizationRequest {
    pub name: String,

    pub phones: Vec<String>,

    #[serde(default)]
    pub building_id: Option<i32>,

    /// Activities the organization is engaged in
    #[serde(default, alias = "activity_ids")]
    pub activities_ids: Vec<i32>,
}

// ===== Query DTOs =====

/// Query parameters for organization search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

/// Query parameters for the nearby lookup
#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQueryParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters, the configured default when absent
    pub radius_m: Option<f64>,
}

// Note: Conversion implementations live in mapper.rs
