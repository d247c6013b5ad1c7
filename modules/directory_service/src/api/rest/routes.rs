//! Route registration

use super::{
    auth::{require_api_key, ApiKeyGuard},
    handlers, openapi,
};
use crate::domain::Service;
use axum::{
    middleware,
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

/// Register all REST routes behind the API key guard
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    guard: ApiKeyGuard,
) -> anyhow::Result<Router> {
    let routes = Router::new()
        // Organization endpoints
        .route(
            "/organizations/",
            get(handlers::list_organizations).post(handlers::create_organization),
        )
        .route("/organizations/search/", get(handlers::search_organizations))
        .route("/organizations/nearby/", get(handlers::organizations_nearby))
        .route(
            "/organizations/{id}",
            get(handlers::get_organization)
                .put(handlers::update_organization)
                .delete(handlers::delete_organization),
        )
        // Building endpoints
        .route(
            "/buildings/",
            get(handlers::list_buildings).post(handlers::create_building),
        )
        .route(
            "/buildings/{id}",
            get(handlers::get_building)
                .put(handlers::update_building)
                .delete(handlers::delete_building),
        )
        .route(
            "/buildings/{id}/organizations/",
            get(handlers::organizations_in_building),
        )
        // Activity endpoints
        .route(
            "/activities/",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        .route(
            "/activities/{id}",
            get(handlers::get_activity)
                .put(handlers::rename_activity)
                .delete(handlers::delete_activity),
        )
        .route(
            "/activities/{id}/organizations/",
            get(handlers::organizations_by_activity),
        )
        .route("/openapi.json", get(openapi::openapi_json))
        // Only matched routes are guarded; unknown paths stay plain 404s
        .route_layer(middleware::from_fn_with_state(guard, require_api_key))
        // Add service as extension for handlers
        .layer(Extension(service));

    Ok(router.merge(routes))
}
