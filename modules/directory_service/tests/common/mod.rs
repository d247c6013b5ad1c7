//! Shared fixtures: an in-memory SQLite database with the schema applied
#![allow(dead_code)]

use directory_service::config::Config;
use directory_service::domain::Service;
use directory_service::{DirectoryServiceModule, NewBuilding, NewOrganization};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database};
use std::str::FromStr;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-key";

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

/// Fresh module backed by a private in-memory database
pub async fn setup_module() -> DirectoryServiceModule {
    // one pooled connection, otherwise every connection sees its own empty database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    let module = DirectoryServiceModule::new(Config {
        api_key: TEST_API_KEY.to_string(),
        ..Config::default()
    });
    module.migrate(&db).await.unwrap();
    module.init(db).unwrap();
    module
}

pub async fn setup_service() -> Arc<Service> {
    setup_module().await.service().unwrap()
}

pub fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn new_building(address: &str, latitude: &str, longitude: &str) -> NewBuilding {
    NewBuilding {
        address: address.to_string(),
        latitude: decimal(latitude),
        longitude: decimal(longitude),
    }
}

pub fn new_organization(
    name: &str,
    building_id: Option<i32>,
    phones: &[&str],
    activity_ids: &[i32],
) -> NewOrganization {
    NewOrganization {
        name: name.to_string(),
        building_id,
        phones: phones.iter().map(|p| p.to_string()).collect(),
        activity_ids: activity_ids.to_vec(),
    }
}
