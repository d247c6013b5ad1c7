//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::Problem,
    extract::{ApiJson, ApiPath, ApiQuery},
};
use crate::domain::Service;
use axum::{http::StatusCode, Extension, Json};
use std::sync::Arc;

type ApiResult<T> = Result<T, Problem>;

fn organizations(items: Vec<crate::contract::Organization>) -> Json<Vec<OrganizationDto>> {
    Json(items.into_iter().map(Into::into).collect())
}

// ===== Organization Handlers =====

/// Create an organization with phones and activity links
pub async fn create_organization(
    Extension(service): Extension<Arc<Service>>,
    ApiJson(req): ApiJson<UpsertOrganizationRequest>,
) -> ApiResult<(StatusCode, Json<OrganizationDto>)> {
    let organization = service.create_organization(req.into()).await?;
    Ok((StatusCode::CREATED, Json(organization.into())))
}

pub async fn get_organization(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<OrganizationDto>> {
    let organization = service.get_organization(id).await?;
    Ok(Json(organization.into()))
}

/// List all organizations (summary projection)
pub async fn list_organizations(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<OrganizationSummaryDto>>> {
    let summaries = service.list_organizations().await?;
    Ok(Json(summaries.into_iter().map(Into::into).collect()))
}

/// Case-insensitive substring search by name
pub async fn search_organizations(
    Extension(service): Extension<Arc<Service>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<OrganizationDto>>> {
    Ok(organizations(service.search_organizations(&query.name).await?))
}

/// Organizations within a radius of a point
pub async fn organizations_nearby(
    Extension(service): Extension<Arc<Service>>,
    ApiQuery(query): ApiQuery<NearbyQueryParams>,
) -> ApiResult<Json<Vec<OrganizationDto>>> {
    Ok(organizations(service.organizations_nearby(query.into()).await?))
}

pub async fn update_organization(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpsertOrganizationRequest>,
) -> ApiResult<Json<OrganizationDto>> {
    let organization = service.update_organization(id, req.into()).await?;
    Ok(Json(organization.into()))
}

pub async fn delete_organization(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    service.delete_organization(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Building Handlers =====

pub async fn create_building(
    Extension(service): Extension<Arc<Service>>,
    ApiJson(req): ApiJson<UpsertBuildingRequest>,
) -> ApiResult<(StatusCode, Json<BuildingDto>)> {
    let building = service.create_building(req.into()).await?;
    Ok((StatusCode::CREATED, Json(building.into())))
}

pub async fn get_building(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<BuildingDto>> {
    let building = service.get_building(id).await?;
    Ok(Json(building.into()))
}

pub async fn list_buildings(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<BuildingDto>>> {
    let buildings = service.list_buildings().await?;
    Ok(Json(buildings.into_iter().map(Into::into).collect()))
}

pub async fn update_building(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpsertBuildingRequest>,
) -> ApiResult<Json<BuildingDto>> {
    let building = service.update_building(id, req.into()).await?;
    Ok(Json(building.into()))
}

pub async fn delete_building(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    service.delete_building(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Organizations located in a building
pub async fn organizations_in_building(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Vec<OrganizationDto>>> {
    Ok(organizations(service.organizations_in_building(id).await?))
}

// ===== Activity Handlers =====

/// Create an activity (unique name, nesting limited)
pub async fn create_activity(
    Extension(service): Extension<Arc<Service>>,
    ApiJson(req): ApiJson<CreateActivityRequest>,
) -> ApiResult<(StatusCode, Json<ActivityDto>)> {
    let activity = service.create_activity(req.into()).await?;
    Ok((StatusCode::CREATED, Json(activity.into())))
}

pub async fn get_activity(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<ActivityDto>> {
    let activity = service.get_activity(id).await?;
    Ok(Json(activity.into()))
}

pub async fn list_activities(
    Extension(service): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<ActivityDto>>> {
    let activities = service.list_activities().await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

pub async fn rename_activity(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<RenameActivityRequest>,
) -> ApiResult<Json<ActivityDto>> {
    let activity = service.rename_activity(id, req.name).await?;
    Ok(Json(activity.into()))
}

pub async fn delete_activity(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    service.delete_activity(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Organizations under an activity or any of its descendants
pub async fn organizations_by_activity(
    Extension(service): Extension<Arc<Service>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Vec<OrganizationDto>>> {
    Ok(organizations(service.organizations_by_activity(id).await?))
}
