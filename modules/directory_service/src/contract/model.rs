//! Contract models for directory service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use rust_decimal::Decimal;

pub type BuildingId = i32;
pub type ActivityId = i32;
pub type OrganizationId = i32;

/// Radius used by the nearby query when the caller does not pass one.
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 1000.0;

/// Physical location with geographic coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    pub id: BuildingId,
    /// Street address
    pub address: String,
    /// Latitude in degrees, kept at the precision it was written with
    pub latitude: Decimal,
    /// Longitude in degrees, kept at the precision it was written with
    pub longitude: Decimal,
}

/// Building payload for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBuilding {
    pub address: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Node of the activity taxonomy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: ActivityId,
    /// Globally unique name (exact match)
    pub name: String,
    /// Parent activity, `None` for a root
    pub parent_id: Option<ActivityId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub name: String,
    pub parent_id: Option<ActivityId>,
}

/// Phone number owned by exactly one organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone {
    pub id: i32,
    pub number: String,
}

/// Organization aggregate with its building, phones and activities resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub building: Option<Building>,
    pub phones: Vec<Phone>,
    pub activities: Vec<Activity>,
}

impl Organization {
    /// Phone numbers in insertion order
    pub fn phone_numbers(&self) -> Vec<String> {
        self.phones.iter().map(|p| p.number.clone()).collect()
    }
}

/// Summary projection used by the organization listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationSummary {
    pub id: OrganizationId,
    pub name: String,
    pub phones: Vec<Phone>,
}

impl From<Organization> for OrganizationSummary {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            phones: org.phones,
        }
    }
}

/// Organization payload for create and full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub building_id: Option<BuildingId>,
    pub phones: Vec<String>,
    pub activity_ids: Vec<ActivityId>,
}

/// Point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Proximity query: everything within `radius_m` meters of `center`
///
/// Without a radius the service falls back to its configured default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_m: Option<f64>,
}
