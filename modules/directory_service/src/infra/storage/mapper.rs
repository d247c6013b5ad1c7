//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{activity, building, phone};
use crate::contract::{Activity, Building, NewActivity, NewBuilding, Phone};
use anyhow::Context;
use rust_decimal::Decimal;
use std::str::FromStr;

// ===== Building Conversions =====

impl TryFrom<building::Model> for Building {
    type Error = anyhow::Error;

    fn try_from(entity: building::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            latitude: parse_coordinate(&entity.latitude)
                .with_context(|| format!("building {} latitude", entity.id))?,
            longitude: parse_coordinate(&entity.longitude)
                .with_context(|| format!("building {} longitude", entity.id))?,
            id: entity.id,
            address: entity.address,
        })
    }
}

impl From<&NewBuilding> for building::ActiveModel {
    fn from(model: &NewBuilding) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            address: Set(model.address.clone()),
            latitude: Set(model.latitude.to_string()),
            longitude: Set(model.longitude.to_string()),
        }
    }
}

fn parse_coordinate(text: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(text).with_context(|| format!("stored coordinate '{text}' is not a decimal"))
}

// ===== Activity Conversions =====

impl From<activity::Model> for Activity {
    fn from(entity: activity::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            parent_id: entity.parent_id,
        }
    }
}

impl From<&NewActivity> for activity::ActiveModel {
    fn from(model: &NewActivity) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            name: Set(model.name.clone()),
            parent_id: Set(model.parent_id),
        }
    }
}

// ===== Phone Conversions =====

impl From<phone::Model> for Phone {
    fn from(entity: phone::Model) -> Self {
        Self {
            id: entity.id,
            number: entity.number,
        }
    }
}
