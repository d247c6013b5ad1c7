//! Domain service - business logic orchestration

use super::hierarchy;
use super::repository::{ActivityRepository, BuildingRepository, OrganizationRepository};
use super::{geo, validation};
use crate::contract::{
    Activity, ActivityId, Building, BuildingId, DirectoryError, NearbyQuery, NewActivity,
    NewBuilding, NewOrganization, Organization, OrganizationId, OrganizationSummary,
    DEFAULT_NEARBY_RADIUS_M,
};
use sea_orm::{DbErr, SqlErr};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Domain service for the organization directory
pub struct Service {
    building_repo: Arc<dyn BuildingRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    organization_repo: Arc<dyn OrganizationRepository>,
    default_radius_m: f64,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        building_repo: Arc<dyn BuildingRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
        organization_repo: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            building_repo,
            activity_repo,
            organization_repo,
            default_radius_m: DEFAULT_NEARBY_RADIUS_M,
        }
    }

    /// Override the radius used when a nearby query does not carry one
    pub fn with_default_radius(mut self, radius_m: f64) -> Self {
        self.default_radius_m = radius_m;
        self
    }

    // ===== Building Operations =====

    pub async fn create_building(&self, building: NewBuilding) -> Result<Building, DirectoryError> {
        validation::validate_building(&building)?;

        let created = self
            .building_repo
            .create(&building)
            .await
            .map_err(internal("create building"))?;

        tracing::info!(building_id = created.id, "building created");
        Ok(created)
    }

    pub async fn get_building(&self, id: BuildingId) -> Result<Building, DirectoryError> {
        self.building_repo
            .find_by_id(id)
            .await
            .map_err(internal("find building"))?
            .ok_or_else(|| DirectoryError::not_found("building", id))
    }

    pub async fn list_buildings(&self) -> Result<Vec<Building>, DirectoryError> {
        self.building_repo
            .list_all()
            .await
            .map_err(internal("list buildings"))
    }

    pub async fn update_building(
        &self,
        id: BuildingId,
        building: NewBuilding,
    ) -> Result<Building, DirectoryError> {
        validation::validate_building(&building)?;

        self.building_repo
            .update(id, &building)
            .await
            .map_err(internal("update building"))?
            .ok_or_else(|| DirectoryError::not_found("building", id))
    }

    /// Delete a building; its organizations stay with no building
    pub async fn delete_building(&self, id: BuildingId) -> Result<(), DirectoryError> {
        let deleted = self
            .building_repo
            .delete(id)
            .await
            .map_err(internal("delete building"))?;

        if !deleted {
            return Err(DirectoryError::not_found("building", id));
        }
        tracing::info!(building_id = id, "building deleted");
        Ok(())
    }

    /// Organizations located in a building
    pub async fn organizations_in_building(
        &self,
        id: BuildingId,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.get_building(id).await?;

        self.organization_repo
            .find_by_building(id)
            .await
            .map_err(internal("find organizations by building"))
    }

    // ===== Activity Operations =====

    /// Create an activity under an optional parent
    ///
    /// The name must not exist yet (exact match) and the new node must not
    /// sit deeper than the hierarchy allows.
    pub async fn create_activity(&self, activity: NewActivity) -> Result<Activity, DirectoryError> {
        validation::validate_activity(&activity)?;
        self.ensure_activity_name_free(&activity.name).await?;

        let depth = hierarchy::depth_for_new(self.activity_repo.as_ref(), activity.parent_id).await?;

        let created = self
            .activity_repo
            .create(&activity)
            .await
            .map_err(|e| duplicate_name_or_internal(e, &activity.name))?;

        tracing::info!(
            activity_id = created.id,
            parent_id = ?created.parent_id,
            depth,
            "activity created"
        );
        Ok(created)
    }

    pub async fn get_activity(&self, id: ActivityId) -> Result<Activity, DirectoryError> {
        self.activity_repo
            .find_by_id(id)
            .await
            .map_err(internal("find activity"))?
            .ok_or_else(|| DirectoryError::not_found("activity", id))
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>, DirectoryError> {
        self.activity_repo
            .list_all()
            .await
            .map_err(internal("list activities"))
    }

    /// Rename an activity; its place in the tree never changes
    pub async fn rename_activity(
        &self,
        id: ActivityId,
        name: String,
    ) -> Result<Activity, DirectoryError> {
        validation::validate_not_blank("name", &name)?;

        let current = self.get_activity(id).await?;
        if current.name == name {
            return Ok(current);
        }
        self.ensure_activity_name_free(&name).await?;

        self.activity_repo
            .rename(id, &name)
            .await
            .map_err(|e| duplicate_name_or_internal(e, &name))?
            .ok_or_else(|| DirectoryError::not_found("activity", id))
    }

    /// Delete an activity together with its whole subtree
    pub async fn delete_activity(&self, id: ActivityId) -> Result<(), DirectoryError> {
        let subtree = hierarchy::collect_descendants(self.activity_repo.as_ref(), id).await?;
        let ids: Vec<ActivityId> = subtree.into_iter().collect();

        let deleted = self
            .activity_repo
            .delete_many(&ids)
            .await
            .map_err(internal("delete activities"))?;

        tracing::info!(activity_id = id, deleted, "activity subtree deleted");
        Ok(())
    }

    /// The activity id plus every descendant id within the depth bound
    pub async fn activity_descendants(
        &self,
        id: ActivityId,
    ) -> Result<BTreeSet<ActivityId>, DirectoryError> {
        let ids = hierarchy::collect_descendants(self.activity_repo.as_ref(), id).await?;
        Ok(ids.into_iter().collect())
    }

    /// Organizations linked to an activity or any of its descendants
    pub async fn organizations_by_activity(
        &self,
        id: ActivityId,
    ) -> Result<Vec<Organization>, DirectoryError> {
        let ids: Vec<ActivityId> = self.activity_descendants(id).await?.into_iter().collect();
        tracing::debug!(activity_id = id, subtree = ?ids, "organizations by activity");

        self.organization_repo
            .find_by_activities(&ids)
            .await
            .map_err(internal("find organizations by activity"))
    }

    // ===== Organization Operations =====

    /// Create an organization with its phones and activity links
    pub async fn create_organization(
        &self,
        organization: NewOrganization,
    ) -> Result<Organization, DirectoryError> {
        let organization = self.prepare_organization(organization).await?;

        let created = self
            .organization_repo
            .create(&organization)
            .await
            .map_err(internal("create organization"))?;

        tracing::info!(organization_id = created.id, "organization created");
        Ok(created)
    }

    pub async fn get_organization(
        &self,
        id: OrganizationId,
    ) -> Result<Organization, DirectoryError> {
        self.organization_repo
            .find_by_id(id)
            .await
            .map_err(internal("find organization"))?
            .ok_or_else(|| DirectoryError::not_found("organization", id))
    }

    /// All organizations in summary projection
    pub async fn list_organizations(&self) -> Result<Vec<OrganizationSummary>, DirectoryError> {
        let organizations = self
            .organization_repo
            .list_all()
            .await
            .map_err(internal("list organizations"))?;

        Ok(organizations.into_iter().map(Into::into).collect())
    }

    /// Case-insensitive substring search on the organization name
    pub async fn search_organizations(
        &self,
        name: &str,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.organization_repo
            .search_by_name(name)
            .await
            .map_err(internal("search organizations"))
    }

    /// Replace every field of an organization
    pub async fn update_organization(
        &self,
        id: OrganizationId,
        organization: NewOrganization,
    ) -> Result<Organization, DirectoryError> {
        let organization = self.prepare_organization(organization).await?;

        let updated = self
            .organization_repo
            .update(id, &organization)
            .await
            .map_err(internal("update organization"))?
            .ok_or_else(|| DirectoryError::not_found("organization", id))?;

        tracing::info!(organization_id = id, "organization updated");
        Ok(updated)
    }

    /// Delete an organization with its phones and activity links
    pub async fn delete_organization(&self, id: OrganizationId) -> Result<(), DirectoryError> {
        let deleted = self
            .organization_repo
            .delete(id)
            .await
            .map_err(internal("delete organization"))?;

        if !deleted {
            return Err(DirectoryError::not_found("organization", id));
        }
        tracing::info!(organization_id = id, "organization deleted");
        Ok(())
    }

    /// Organizations whose building lies within the query radius
    ///
    /// Scans every organization that has a building; there is no spatial index.
    pub async fn organizations_nearby(
        &self,
        query: NearbyQuery,
    ) -> Result<Vec<Organization>, DirectoryError> {
        let radius_m = query.radius_m.unwrap_or(self.default_radius_m);
        validation::validate_nearby(query.center, radius_m)?;

        let candidates = self
            .organization_repo
            .list_with_building()
            .await
            .map_err(internal("list organizations with building"))?;

        let nearby: Vec<Organization> = candidates
            .into_iter()
            .filter(|org| {
                org.building
                    .as_ref()
                    .is_some_and(|b| geo::within_radius(query.center, b, radius_m))
            })
            .collect();

        tracing::debug!(
            latitude = query.center.latitude,
            longitude = query.center.longitude,
            radius_m,
            found = nearby.len(),
            "nearby organizations"
        );
        Ok(nearby)
    }

    // ===== Helper Methods =====

    async fn ensure_activity_name_free(&self, name: &str) -> Result<(), DirectoryError> {
        let existing = self
            .activity_repo
            .find_by_name(name)
            .await
            .map_err(internal("find activity by name"))?;

        if existing.is_some() {
            return Err(duplicate_activity_name(name));
        }
        Ok(())
    }

    /// Validate the payload and check every referenced entity exists
    async fn prepare_organization(
        &self,
        mut organization: NewOrganization,
    ) -> Result<NewOrganization, DirectoryError> {
        validation::validate_organization(&organization)?;

        if let Some(building_id) = organization.building_id {
            self.get_building(building_id).await?;
        }

        let unique: BTreeSet<ActivityId> = organization.activity_ids.iter().copied().collect();
        for activity_id in &unique {
            self.get_activity(*activity_id).await?;
        }
        organization.activity_ids = unique.into_iter().collect();

        Ok(organization)
    }
}

fn duplicate_activity_name(name: &str) -> DirectoryError {
    DirectoryError::validation(format!("activity with name '{name}' already exists"))
}

/// Log a store failure and hide it behind `DirectoryError::Internal`
fn internal(operation: &'static str) -> impl Fn(anyhow::Error) -> DirectoryError {
    move |error| {
        tracing::error!(operation, error = ?error, "storage operation failed");
        DirectoryError::Internal
    }
}

// Two concurrent creates can both pass the name pre-check; the unique index
// decides and the loser gets the same validation error.
fn duplicate_name_or_internal(error: anyhow::Error, name: &str) -> DirectoryError {
    let unique_violation = error
        .downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)));

    if unique_violation {
        return duplicate_activity_name(name);
    }
    internal("write activity")(error)
}
