//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;

// ===== Building conversions =====

impl From<contract::Building> for BuildingDto {
    fn from(building: contract::Building) -> Self {
        Self {
            id: building.id,
            address: building.address,
            latitude: building.latitude,
            longitude: building.longitude,
        }
    }
}

impl From<UpsertBuildingRequest> for contract::NewBuilding {
    fn from(req: UpsertBuildingRequest) -> Self {
        Self {
            address: req.address,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

// ===== Activity conversions =====

impl From<contract::Activity> for ActivityDto {
    fn from(activity: contract::Activity) -> Self {
        Self {
            id: activity.id,
            name: activity.name,
            parent_id: activity.parent_id,
        }
    }
}

impl From<CreateActivityRequest> for contract::NewActivity {
    fn from(req: CreateActivityRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
        }
    }
}

// ===== Organization conversions =====

impl From<contract::Organization> for OrganizationDto {
    fn from(org: contract::Organization) -> Self {
        Self {
            phones: org.phone_numbers(),
            id: org.id,
            name: org.name,
            building: org.building.map(Into::into),
            activities: org.activities.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::Phone> for PhoneDto {
    fn from(phone: contract::Phone) -> Self {
        Self {
            id: phone.id,
            number: phone.number,
        }
    }
}

impl From<contract::OrganizationSummary> for OrganizationSummaryDto {
    fn from(summary: contract::OrganizationSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            phones: summary.phones.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<UpsertOrganizationRequest> for contract::NewOrganization {
    fn from(req: UpsertOrganizationRequest) -> Self {
        Self {
            name: req.name,
            building_id: req.building_id,
            phones: req.phones,
            activity_ids: req.activities_ids,
        }
    }
}

impl From<NearbyQueryParams> for contract::NearbyQuery {
    fn from(params: NearbyQueryParams) -> Self {
        Self {
            center: contract::GeoPoint::new(params.latitude, params.longitude),
            radius_m: params.radius_m,
        }
    }
}
