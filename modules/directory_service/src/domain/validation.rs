//! Field constraints for inbound payloads

use crate::contract::{DirectoryError, GeoPoint, NewActivity, NewBuilding, NewOrganization};
use rust_decimal::Decimal;

const MAX_LATITUDE: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const MAX_LONGITUDE: Decimal = Decimal::from_parts(180, 0, 0, false, 0);

/// Validate a required text field is not blank
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), DirectoryError> {
    if value.trim().is_empty() {
        return Err(DirectoryError::validation(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(())
}

pub fn validate_building(building: &NewBuilding) -> Result<(), DirectoryError> {
    validate_not_blank("address", &building.address)?;

    if building.latitude.abs() > MAX_LATITUDE {
        return Err(DirectoryError::validation(format!(
            "latitude {} is outside [-90, 90]",
            building.latitude
        )));
    }
    if building.longitude.abs() > MAX_LONGITUDE {
        return Err(DirectoryError::validation(format!(
            "longitude {} is outside [-180, 180]",
            building.longitude
        )));
    }
    Ok(())
}

pub fn validate_activity(activity: &NewActivity) -> Result<(), DirectoryError> {
    validate_not_blank("name", &activity.name)
}

/// Validate an organization payload
///
/// Phones are required and each number must carry text. Activity ids may
/// repeat; duplicates collapse to one link.
pub fn validate_organization(organization: &NewOrganization) -> Result<(), DirectoryError> {
    validate_not_blank("name", &organization.name)?;

    if organization.phones.is_empty() {
        return Err(DirectoryError::validation(
            "phones must contain at least one number",
        ));
    }
    if let Some(position) = organization
        .phones
        .iter()
        .position(|number| number.trim().is_empty())
    {
        return Err(DirectoryError::validation(format!(
            "phones[{position}] cannot be empty"
        )));
    }
    Ok(())
}

/// Validate a proximity query point and radius
pub fn validate_nearby(center: GeoPoint, radius_m: f64) -> Result<(), DirectoryError> {
    if !center.latitude.is_finite() || center.latitude.abs() > 90.0 {
        return Err(DirectoryError::validation(format!(
            "latitude {} is outside [-90, 90]",
            center.latitude
        )));
    }
    if !center.longitude.is_finite() || center.longitude.abs() > 180.0 {
        return Err(DirectoryError::validation(format!(
            "longitude {} is outside [-180, 180]",
            center.longitude
        )));
    }
    if !radius_m.is_finite() || radius_m < 0.0 {
        return Err(DirectoryError::validation(format!(
            "radius_m must be a non-negative number, got {radius_m}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn building(lat: &str, lon: &str) -> NewBuilding {
        NewBuilding {
            address: "Lenina 1".to_string(),
            latitude: Decimal::from_str(lat).unwrap(),
            longitude: Decimal::from_str(lon).unwrap(),
        }
    }

    fn organization(phones: &[&str]) -> NewOrganization {
        NewOrganization {
            name: "Acme".to_string(),
            building_id: None,
            phones: phones.iter().map(|p| p.to_string()).collect(),
            activity_ids: vec![],
        }
    }

    #[test]
    fn test_building_coordinates_in_range() {
        assert!(validate_building(&building("55.7558", "37.6173")).is_ok());
        assert!(validate_building(&building("-90", "180")).is_ok());
        assert!(validate_building(&building("90.0001", "0")).is_err());
        assert!(validate_building(&building("0", "-180.5")).is_err());
    }

    #[test]
    fn test_building_requires_address() {
        let mut b = building("0", "0");
        b.address = "  ".to_string();
        assert!(matches!(
            validate_building(&b),
            Err(DirectoryError::Validation { .. })
        ));
    }

    #[test]
    fn test_activity_requires_name() {
        let activity = NewActivity {
            name: String::new(),
            parent_id: None,
        };
        assert!(validate_activity(&activity).is_err());
    }

    #[test]
    fn test_organization_phones() {
        assert!(validate_organization(&organization(&["111", "222"])).is_ok());
        assert!(validate_organization(&organization(&[])).is_err());

        let err = validate_organization(&organization(&["111", " "])).unwrap_err();
        assert_eq!(
            err,
            DirectoryError::validation("phones[1] cannot be empty")
        );
    }

    #[test]
    fn test_nearby_bounds() {
        assert!(validate_nearby(GeoPoint::new(55.75, 37.61), 0.0).is_ok());
        assert!(validate_nearby(GeoPoint::new(91.0, 0.0), 10.0).is_err());
        assert!(validate_nearby(GeoPoint::new(0.0, 181.0), 10.0).is_err());
        assert!(validate_nearby(GeoPoint::new(0.0, 0.0), -1.0).is_err());
        assert!(validate_nearby(GeoPoint::new(0.0, 0.0), f64::NAN).is_err());
    }
}
