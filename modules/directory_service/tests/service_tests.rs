//! Integration tests for the directory service over a real SQLite schema

mod common;

use common::*;
use directory_service::contract::*;
use directory_service::domain::Service;

async fn activity(service: &Service, name: &str, parent_id: Option<i32>) -> Activity {
    service
        .create_activity(NewActivity {
            name: name.to_string(),
            parent_id,
        })
        .await
        .unwrap()
}

// ===== Activity hierarchy =====

#[tokio::test]
async fn test_activity_nesting_stops_at_three_levels() {
    print_test_header(
        "test_activity_nesting_stops_at_three_levels",
        "Food → Meat → Beef is accepted, a fourth level is rejected",
    );
    let service = setup_service().await;

    let food = activity(&service, "Food", None).await;
    let meat = activity(&service, "Meat", Some(food.id)).await;
    let beef = activity(&service, "Beef", Some(meat.id)).await;
    assert_eq!(beef.parent_id, Some(meat.id));

    let err = service
        .create_activity(NewActivity {
            name: "Ground Beef".to_string(),
            parent_id: Some(beef.id),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }), "{err:?}");

    // nothing was written for the rejected level
    assert_eq!(service.list_activities().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_activity_unknown_parent_is_not_found() {
    let service = setup_service().await;

    let err = service
        .create_activity(NewActivity {
            name: "Orphan".to_string(),
            parent_id: Some(42),
        })
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::not_found("parent activity", 42));
}

#[tokio::test]
async fn test_activity_name_is_unique() {
    let service = setup_service().await;
    activity(&service, "Food", None).await;

    let err = service
        .create_activity(NewActivity {
            name: "Food".to_string(),
            parent_id: None,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DirectoryError::validation("activity with name 'Food' already exists")
    );

    // comparison is exact, a different case is another name
    let lower = activity(&service, "food", None).await;
    assert_eq!(lower.name, "food");
}

#[tokio::test]
async fn test_activity_descendants() {
    let service = setup_service().await;
    let food = activity(&service, "Food", None).await;
    let meat = activity(&service, "Meat", Some(food.id)).await;
    let dairy = activity(&service, "Dairy", Some(food.id)).await;
    let beef = activity(&service, "Beef", Some(meat.id)).await;
    let cars = activity(&service, "Cars", None).await;

    let all = service.activity_descendants(food.id).await.unwrap();
    assert_eq!(
        all.into_iter().collect::<Vec<_>>(),
        vec![food.id, meat.id, dairy.id, beef.id]
    );

    let leaf = service.activity_descendants(beef.id).await.unwrap();
    assert_eq!(leaf.into_iter().collect::<Vec<_>>(), vec![beef.id]);

    assert!(!service
        .activity_descendants(food.id)
        .await
        .unwrap()
        .contains(&cars.id));

    let err = service.activity_descendants(999).await.unwrap_err();
    assert_eq!(err, DirectoryError::not_found("activity", 999));
}

#[tokio::test]
async fn test_rename_activity() {
    let service = setup_service().await;
    let food = activity(&service, "Food", None).await;
    let meat = activity(&service, "Meat", Some(food.id)).await;

    let renamed = service
        .rename_activity(meat.id, "Meat products".to_string())
        .await
        .unwrap();
    assert_eq!(renamed.name, "Meat products");
    assert_eq!(renamed.parent_id, Some(food.id));

    // same name is a no-op, not a duplicate
    let same = service
        .rename_activity(food.id, "Food".to_string())
        .await
        .unwrap();
    assert_eq!(same, food);

    let err = service
        .rename_activity(food.id, "Meat products".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));
}

#[tokio::test]
async fn test_delete_activity_removes_subtree_and_links() {
    print_test_header(
        "test_delete_activity_removes_subtree_and_links",
        "Deleting a root drops every descendant and the organization links",
    );
    let service = setup_service().await;
    let food = activity(&service, "Food", None).await;
    let meat = activity(&service, "Meat", Some(food.id)).await;
    let beef = activity(&service, "Beef", Some(meat.id)).await;
    let cars = activity(&service, "Cars", None).await;

    let org = service
        .create_organization(new_organization("Butcher", None, &["111"], &[beef.id, cars.id]))
        .await
        .unwrap();

    service.delete_activity(food.id).await.unwrap();

    let remaining = service.list_activities().await.unwrap();
    assert_eq!(remaining, vec![cars.clone()]);

    let org = service.get_organization(org.id).await.unwrap();
    assert_eq!(org.activities, vec![cars]);

    let err = service.delete_activity(food.id).await.unwrap_err();
    assert_eq!(err, DirectoryError::not_found("activity", food.id));
}

// ===== Buildings =====

#[tokio::test]
async fn test_building_round_trip_keeps_coordinates() {
    let service = setup_service().await;

    let created = service
        .create_building(new_building("Moscow, Tverskaya 1", "55.7558", "37.6173"))
        .await
        .unwrap();
    let fetched = service.get_building(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.latitude.to_string(), "55.7558");
    assert_eq!(fetched.longitude.to_string(), "37.6173");
}

#[tokio::test]
async fn test_building_rejects_out_of_range_coordinates() {
    let service = setup_service().await;

    let err = service
        .create_building(new_building("Nowhere", "91", "0"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));

    let err = service
        .create_building(new_building("Nowhere", "0", "-180.5"))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));
}

#[tokio::test]
async fn test_update_building() {
    let service = setup_service().await;
    let building = service
        .create_building(new_building("Old address", "10", "20"))
        .await
        .unwrap();

    let updated = service
        .update_building(building.id, new_building("New address", "11.5", "21.25"))
        .await
        .unwrap();
    assert_eq!(updated.id, building.id);
    assert_eq!(updated.address, "New address");
    assert_eq!(updated.latitude, decimal("11.5"));

    let err = service
        .update_building(999, new_building("x", "0", "0"))
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::not_found("building", 999));
}

#[tokio::test]
async fn test_delete_building_detaches_organizations() {
    let service = setup_service().await;
    let building = service
        .create_building(new_building("Moscow, Tverskaya 1", "55.7558", "37.6173"))
        .await
        .unwrap();
    let org = service
        .create_organization(new_organization("Tenant", Some(building.id), &["1"], &[]))
        .await
        .unwrap();
    assert_eq!(org.building.as_ref().map(|b| b.id), Some(building.id));

    service.delete_building(building.id).await.unwrap();

    let org = service.get_organization(org.id).await.unwrap();
    assert!(org.building.is_none());
    assert_eq!(org.phone_numbers(), vec!["1"]);

    let err = service.get_building(building.id).await.unwrap_err();
    assert_eq!(err, DirectoryError::not_found("building", building.id));
}

#[tokio::test]
async fn test_organizations_in_building() {
    let service = setup_service().await;
    let first = service
        .create_building(new_building("First", "1", "1"))
        .await
        .unwrap();
    let second = service
        .create_building(new_building("Second", "2", "2"))
        .await
        .unwrap();

    let a = service
        .create_organization(new_organization("A", Some(first.id), &["1"], &[]))
        .await
        .unwrap();
    service
        .create_organization(new_organization("B", Some(second.id), &["2"], &[]))
        .await
        .unwrap();

    let found = service.organizations_in_building(first.id).await.unwrap();
    assert_eq!(found, vec![a]);

    let err = service.organizations_in_building(999).await.unwrap_err();
    assert_eq!(err, DirectoryError::not_found("building", 999));
}

// ===== Organizations =====

#[tokio::test]
async fn test_create_organization_without_building() {
    let service = setup_service().await;

    let org = service
        .create_organization(new_organization("Acme", None, &["111", "222"], &[]))
        .await
        .unwrap();

    assert_eq!(org.name, "Acme");
    assert!(org.building.is_none());
    assert!(org.activities.is_empty());
    assert_eq!(org.phone_numbers(), vec!["111", "222"]);

    let fetched = service.get_organization(org.id).await.unwrap();
    assert_eq!(fetched, org);
}

#[tokio::test]
async fn test_create_organization_validates_references() {
    let service = setup_service().await;

    let err = service
        .create_organization(new_organization("Ghost", Some(7), &["1"], &[]))
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::not_found("building", 7));

    let err = service
        .create_organization(new_organization("Ghost", None, &["1"], &[8]))
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::not_found("activity", 8));

    let err = service
        .create_organization(new_organization("  ", None, &["1"], &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));

    let err = service
        .create_organization(new_organization("No phones", None, &[], &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));

    // nothing half-written
    assert!(service.list_organizations().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_activity_ids_are_linked_once() {
    let service = setup_service().await;
    let food = activity(&service, "Food", None).await;

    let org = service
        .create_organization(new_organization("Deli", None, &["1"], &[food.id, food.id]))
        .await
        .unwrap();
    assert_eq!(org.activities, vec![food]);
}

#[tokio::test]
async fn test_update_organization_replaces_children() {
    let service = setup_service().await;
    let food = activity(&service, "Food", None).await;
    let cars = activity(&service, "Cars", None).await;
    let building = service
        .create_building(new_building("Somewhere", "10", "10"))
        .await
        .unwrap();

    let org = service
        .create_organization(new_organization("Shop", None, &["1", "2"], &[food.id]))
        .await
        .unwrap();

    let updated = service
        .update_organization(
            org.id,
            new_organization("Garage", Some(building.id), &["3"], &[cars.id]),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, org.id);
    assert_eq!(updated.name, "Garage");
    assert_eq!(updated.building, Some(building));
    assert_eq!(updated.phone_numbers(), vec!["3"]);
    assert_eq!(updated.activities, vec![cars]);

    let err = service
        .update_organization(999, new_organization("x", None, &["1"], &[]))
        .await
        .unwrap_err();
    assert_eq!(err, DirectoryError::not_found("organization", 999));
}

#[tokio::test]
async fn test_delete_organization() {
    let service = setup_service().await;
    let org = service
        .create_organization(new_organization("Acme", None, &["111"], &[]))
        .await
        .unwrap();

    service.delete_organization(org.id).await.unwrap();

    let err = service.get_organization(org.id).await.unwrap_err();
    assert_eq!(err, DirectoryError::not_found("organization", org.id));
    let err = service.delete_organization(org.id).await.unwrap_err();
    assert_eq!(err, DirectoryError::not_found("organization", org.id));
}

#[tokio::test]
async fn test_list_organizations_summary() {
    let service = setup_service().await;
    service
        .create_organization(new_organization("Acme", None, &["111", "222"], &[]))
        .await
        .unwrap();
    service
        .create_organization(new_organization("Globex", None, &["333"], &[]))
        .await
        .unwrap();

    let summaries = service.list_organizations().await.unwrap();
    let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Globex"]);
    assert_eq!(summaries[0].phones.len(), 2);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let service = setup_service().await;
    let acme = service
        .create_organization(new_organization("ACME Trading", None, &["1"], &[]))
        .await
        .unwrap();
    let horns = service
        .create_organization(new_organization("Рога и Копыта", None, &["2"], &[]))
        .await
        .unwrap();

    assert_eq!(service.search_organizations("acme").await.unwrap(), vec![acme]);
    assert_eq!(service.search_organizations("РОГА").await.unwrap(), vec![horns]);
    assert!(service.search_organizations("globex").await.unwrap().is_empty());
    assert_eq!(service.search_organizations("").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_organizations_by_activity_include_descendants() {
    print_test_header(
        "test_organizations_by_activity_include_descendants",
        "An organization tagged Beef is found when querying Food",
    );
    let service = setup_service().await;
    let food = activity(&service, "Food", None).await;
    let meat = activity(&service, "Meat", Some(food.id)).await;
    let beef = activity(&service, "Beef", Some(meat.id)).await;
    let cars = activity(&service, "Cars", None).await;

    let butcher = service
        .create_organization(new_organization("Butcher", None, &["1"], &[beef.id]))
        .await
        .unwrap();
    let grocer = service
        .create_organization(new_organization("Grocer", None, &["2"], &[food.id, meat.id]))
        .await
        .unwrap();
    service
        .create_organization(new_organization("Dealer", None, &["3"], &[cars.id]))
        .await
        .unwrap();

    let found = service.organizations_by_activity(food.id).await.unwrap();
    let ids: Vec<_> = found.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![butcher.id, grocer.id]);

    let found = service.organizations_by_activity(beef.id).await.unwrap();
    assert_eq!(found, vec![butcher]);

    let err = service.organizations_by_activity(999).await.unwrap_err();
    assert_eq!(err, DirectoryError::not_found("activity", 999));
}

// ===== Nearby =====

#[tokio::test]
async fn test_organizations_nearby() {
    print_test_header(
        "test_organizations_nearby",
        "Radius filter with explicit, zero and default radius",
    );
    let service = setup_service().await;
    let kremlin = service
        .create_building(new_building("Red Square", "55.7558", "37.6173"))
        .await
        .unwrap();
    // roughly 500 m away
    let close = service
        .create_building(new_building("Nearby street", "55.7600", "37.6200"))
        .await
        .unwrap();
    let spb = service
        .create_building(new_building("Nevsky 1", "59.9343", "30.3351"))
        .await
        .unwrap();

    let a = service
        .create_organization(new_organization("A", Some(kremlin.id), &["1"], &[]))
        .await
        .unwrap();
    let b = service
        .create_organization(new_organization("B", Some(close.id), &["2"], &[]))
        .await
        .unwrap();
    service
        .create_organization(new_organization("C", Some(spb.id), &["3"], &[]))
        .await
        .unwrap();
    service
        .create_organization(new_organization("Homeless", None, &["4"], &[]))
        .await
        .unwrap();

    let center = GeoPoint::new(55.7558, 37.6173);

    let exact = service
        .organizations_nearby(NearbyQuery {
            center,
            radius_m: Some(0.0),
        })
        .await
        .unwrap();
    assert_eq!(exact, vec![a.clone()]);

    let by_default = service
        .organizations_nearby(NearbyQuery {
            center,
            radius_m: None,
        })
        .await
        .unwrap();
    assert_eq!(by_default, vec![a.clone(), b]);

    let country = service
        .organizations_nearby(NearbyQuery {
            center,
            radius_m: Some(700_000.0),
        })
        .await
        .unwrap();
    assert_eq!(country.len(), 3);

    let err = service
        .organizations_nearby(NearbyQuery {
            center,
            radius_m: Some(-1.0),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Validation { .. }));
}

// ===== Native client =====

#[tokio::test]
async fn test_native_client_delegates_to_service() {
    let module = setup_module().await;
    let client = module.client().unwrap();

    let building = client
        .create_building(new_building("Client street", "1", "2"))
        .await
        .unwrap();
    let food = client
        .create_activity(NewActivity {
            name: "Food".to_string(),
            parent_id: None,
        })
        .await
        .unwrap();
    let org = client
        .create_organization(new_organization("Via client", Some(building.id), &["5"], &[food.id]))
        .await
        .unwrap();

    assert_eq!(client.get_organization(org.id).await.unwrap(), org);
    assert_eq!(
        client.organizations_in_building(building.id).await.unwrap(),
        vec![org.clone()]
    );
    assert_eq!(
        client.organizations_by_activity(food.id).await.unwrap(),
        vec![org.clone()]
    );
    assert_eq!(client.search_organizations("client").await.unwrap(), vec![org]);
}
