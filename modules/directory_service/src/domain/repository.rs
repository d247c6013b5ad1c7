//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Activity, ActivityId, Building, BuildingId, NewActivity, NewBuilding, NewOrganization,
    Organization, OrganizationId,
};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for buildings
#[async_trait]
pub trait BuildingRepository: Send + Sync {
    async fn create(&self, building: &NewBuilding) -> Result<Building>;

    async fn find_by_id(&self, id: BuildingId) -> Result<Option<Building>>;

    async fn list_all(&self) -> Result<Vec<Building>>;

    /// Replace address and coordinates; `None` if the building is gone
    async fn update(&self, id: BuildingId, building: &NewBuilding) -> Result<Option<Building>>;

    /// Delete a building, detaching its organizations. Returns false if absent.
    async fn delete(&self, id: BuildingId) -> Result<bool>;
}

/// Repository for the activity forest
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn create(&self, activity: &NewActivity) -> Result<Activity>;

    async fn find_by_id(&self, id: ActivityId) -> Result<Option<Activity>>;

    /// Exact, case-sensitive name lookup
    async fn find_by_name(&self, name: &str) -> Result<Option<Activity>>;

    /// Direct children of any of the given parents
    async fn find_children(&self, parent_ids: &[ActivityId]) -> Result<Vec<Activity>>;

    async fn list_all(&self) -> Result<Vec<Activity>>;

    async fn rename(&self, id: ActivityId, name: &str) -> Result<Option<Activity>>;

    /// Delete the given activities and their organization links
    async fn delete_many(&self, ids: &[ActivityId]) -> Result<u64>;
}

/// Repository for organizations and the records they own
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Insert the organization, its phones and activity links atomically
    async fn create(&self, organization: &NewOrganization) -> Result<Organization>;

    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>>;

    async fn list_all(&self) -> Result<Vec<Organization>>;

    async fn find_by_building(&self, building_id: BuildingId) -> Result<Vec<Organization>>;

    /// Organizations linked to at least one of the given activities
    async fn find_by_activities(&self, activity_ids: &[ActivityId]) -> Result<Vec<Organization>>;

    /// Case-insensitive substring match on the name
    async fn search_by_name(&self, needle: &str) -> Result<Vec<Organization>>;

    /// Organizations that have a building assigned
    async fn list_with_building(&self) -> Result<Vec<Organization>>;

    /// Replace name, building, phones and activity links atomically
    async fn update(
        &self,
        id: OrganizationId,
        organization: &NewOrganization,
    ) -> Result<Option<Organization>>;

    /// Delete an organization with its phones and links. Returns false if absent.
    async fn delete(&self, id: OrganizationId) -> Result<bool>;
}
