//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the directory.
//! NO HTTP - direct function calls.

use super::{
    error::DirectoryError,
    model::{
        Activity, ActivityId, Building, BuildingId, NearbyQuery, NewActivity, NewBuilding,
        NewOrganization, Organization, OrganizationId,
    },
};
use async_trait::async_trait;

/// Directory service API for inter-module communication
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    // ===== Building Operations =====

    async fn create_building(&self, building: NewBuilding) -> Result<Building, DirectoryError>;

    async fn get_building(&self, id: BuildingId) -> Result<Building, DirectoryError>;

    /// Organizations located in a building
    async fn organizations_in_building(
        &self,
        id: BuildingId,
    ) -> Result<Vec<Organization>, DirectoryError>;

    // ===== Activity Operations =====

    /// Create an activity, enforcing name uniqueness and the nesting limit
    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, DirectoryError>;

    async fn get_activity(&self, id: ActivityId) -> Result<Activity, DirectoryError>;

    /// Organizations linked to an activity or any of its descendants
    async fn organizations_by_activity(
        &self,
        id: ActivityId,
    ) -> Result<Vec<Organization>, DirectoryError>;

    // ===== Organization Operations =====

    async fn create_organization(
        &self,
        organization: NewOrganization,
    ) -> Result<Organization, DirectoryError>;

    async fn get_organization(&self, id: OrganizationId) -> Result<Organization, DirectoryError>;

    /// Case-insensitive substring search on the organization name
    async fn search_organizations(&self, name: &str) -> Result<Vec<Organization>, DirectoryError>;

    /// Organizations whose building lies within the query radius
    async fn organizations_nearby(
        &self,
        query: NearbyQuery,
    ) -> Result<Vec<Organization>, DirectoryError>;
}
