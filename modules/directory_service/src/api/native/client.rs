//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    Activity, ActivityId, Building, BuildingId, DirectoryApi, DirectoryError, NearbyQuery,
    NewActivity, NewBuilding, NewOrganization, Organization, OrganizationId,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DirectoryApi for NativeClient {
    async fn create_building(&self, building: NewBuilding) -> Result<Building, DirectoryError> {
        self.service.create_building(building).await
    }

    async fn get_building(&self, id: BuildingId) -> Result<Building, DirectoryError> {
        self.service.get_building(id).await
    }

    async fn organizations_in_building(
        &self,
        id: BuildingId,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.service.organizations_in_building(id).await
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, DirectoryError> {
        self.service.create_activity(activity).await
    }

    async fn get_activity(&self, id: ActivityId) -> Result<Activity, DirectoryError> {
        self.service.get_activity(id).await
    }

    async fn organizations_by_activity(
        &self,
        id: ActivityId,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.service.organizations_by_activity(id).await
    }

    async fn create_organization(
        &self,
        organization: NewOrganization,
    ) -> Result<Organization, DirectoryError> {
        self.service.create_organization(organization).await
    }

    async fn get_organization(&self, id: OrganizationId) -> Result<Organization, DirectoryError> {
        self.service.get_organization(id).await
    }

    async fn search_organizations(&self, name: &str) -> Result<Vec<Organization>, DirectoryError> {
        self.service.search_organizations(name).await
    }

    async fn organizations_nearby(
        &self,
        query: NearbyQuery,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.service.organizations_nearby(query).await
    }
}
