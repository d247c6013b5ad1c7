//! OpenAPI document for the REST surface

use super::{dto::*, error::Problem};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Organization Directory API",
        description = "Organizations, buildings and the activity taxonomy"
    ),
    components(schemas(
        BuildingDto,
        UpsertBuildingRequest,
        ActivityDto,
        CreateActivityRequest,
        RenameActivityRequest,
        OrganizationDto,
        OrganizationSummaryDto,
        PhoneDto,
        UpsertOrganizationRequest,
        Problem,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
