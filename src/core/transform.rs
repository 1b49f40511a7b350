use crate::domain::model::{Address, RawAddressRecord};
use crate::utils::error::{AppError, Result};
use std::collections::HashMap;

fn required_text(value: Option<&serde_json::Value>, index: usize, field: &'static str) -> Result<String> {
    match value.and_then(serde_json::Value::as_str).map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(AppError::MalformedAddress { index, field }),
    }
}

/// Coordinates arrive either as JSON numbers or as strings.
fn required_coordinate(
    value: Option<&serde_json::Value>,
    index: usize,
    field: &'static str,
) -> Result<String> {
    match value {
        Some(serde_json::Value::Number(number)) => Ok(number.to_string()),
        Some(text @ serde_json::Value::String(_)) => required_text(Some(text), index, field),
        _ => Err(AppError::MalformedAddress { index, field }),
    }
}

fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn address_id(house_number: &str, lat: &str, long: &str) -> String {
    format!("{}-{}-{}", house_number, lat, long)
}

/// Maps one lookup candidate onto an [`Address`]. `index` is only used to
/// point at the offending record in errors.
pub fn transform_address(raw: &RawAddressRecord, house_number: &str, index: usize) -> Result<Address> {
    let street = required_text(raw.street.as_ref(), index, "street")?;
    let city = required_text(raw.city.as_ref(), index, "city")?;
    let postcode = normalize_postcode(&required_text(raw.postcode.as_ref(), index, "postcode")?);
    let lat = required_coordinate(raw.lat.as_ref(), index, "lat")?;
    let long = required_coordinate(raw.long.as_ref(), index, "long")?;
    let house_number = house_number.trim().to_string();

    Ok(Address {
        id: address_id(&house_number, &lat, &long),
        house_number,
        street,
        city,
        postcode,
        lat,
        long,
    })
}

/// All-or-nothing: one bad record fails the whole batch so the listed
/// results always match what can be selected.
pub fn transform_all(raws: &[RawAddressRecord], house_number: &str) -> Result<Vec<Address>> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(raws.len());
    let mut addresses = Vec::with_capacity(raws.len());

    for (index, raw) in raws.iter().enumerate() {
        let address = transform_address(raw, house_number, index)?;
        if let Some(&first) = seen.get(&address.id) {
            return Err(AppError::DuplicateAddress {
                id: address.id,
                first,
                second: index,
            });
        }
        seen.insert(address.id.clone(), index);
        addresses.push(address);
    }

    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawAddressRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_transform_normalizes_fields() {
        let record = raw(json!({
            "street": "  Storgata ",
            "city": "Oslo ",
            "postcode": " ab 12 ",
            "lat": 59.91,
            "long": "10.75"
        }));

        let address = transform_address(&record, " 350 ", 0).unwrap();

        assert_eq!(address.id, "350-59.91-10.75");
        assert_eq!(address.house_number, "350");
        assert_eq!(address.street, "Storgata");
        assert_eq!(address.city, "Oslo");
        assert_eq!(address.postcode, "AB12");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let record = raw(json!({
            "street": "Storgata", "city": "Oslo", "postcode": "1345", "lat": 1.5, "long": 2.5
        }));

        assert_eq!(
            transform_address(&record, "7", 0).unwrap(),
            transform_address(&record, "7", 3).unwrap()
        );
    }

    #[test]
    fn test_transform_rejects_missing_fields() {
        let record = raw(json!({ "street": "Storgata", "postcode": "1345", "lat": 1, "long": 2 }));
        let err = transform_address(&record, "7", 2).unwrap_err();
        assert!(matches!(err, AppError::MalformedAddress { index: 2, field: "city" }));

        let record = raw(json!({ "street": "Storgata", "city": "Oslo", "postcode": "1345", "lat": null, "long": 2 }));
        let err = transform_address(&record, "7", 0).unwrap_err();
        assert!(matches!(err, AppError::MalformedAddress { field: "lat", .. }));

        let record = raw(json!({ "street": " ", "city": "Oslo", "postcode": "1345", "lat": 1, "long": 2 }));
        assert!(transform_address(&record, "7", 0).is_err());
    }

    #[test]
    fn test_transform_rejects_mistyped_fields() {
        let record = raw(json!({ "street": 42, "city": "Oslo", "postcode": "1345", "lat": 1, "long": 2 }));
        let err = transform_address(&record, "7", 0).unwrap_err();
        assert!(matches!(err, AppError::MalformedAddress { index: 0, field: "street" }));

        let record = raw(json!({ "street": "A", "city": "Oslo", "postcode": ["1345"], "lat": 1, "long": 2 }));
        let err = transform_address(&record, "7", 4).unwrap_err();
        assert!(matches!(err, AppError::MalformedAddress { index: 4, field: "postcode" }));

        let record = raw(json!({ "street": "A", "city": "Oslo", "postcode": "1345", "lat": true, "long": 2 }));
        assert!(matches!(
            transform_address(&record, "7", 0).unwrap_err(),
            AppError::MalformedAddress { field: "lat", .. }
        ));
    }

    #[test]
    fn test_transform_all_keeps_order_and_fails_whole_batch() {
        let good = vec![
            raw(json!({ "street": "A", "city": "Oslo", "postcode": "1345", "lat": 1, "long": 1 })),
            raw(json!({ "street": "B", "city": "Oslo", "postcode": "1345", "lat": 2, "long": 2 })),
        ];
        let addresses = transform_all(&good, "350").unwrap();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].street, "A");
        assert_eq!(addresses[1].street, "B");

        let mut bad = good.clone();
        bad.push(raw(json!({ "city": "Oslo" })));
        assert!(matches!(
            transform_all(&bad, "350").unwrap_err(),
            AppError::MalformedAddress { index: 2, field: "street" }
        ));
    }

    #[test]
    fn test_transform_all_rejects_duplicate_ids() {
        let records = vec![
            raw(json!({ "street": "A", "city": "Oslo", "postcode": "1345", "lat": 1, "long": 1 })),
            raw(json!({ "street": "B", "city": "Oslo", "postcode": "1345", "lat": 1, "long": 1 })),
        ];

        match transform_all(&records, "350").unwrap_err() {
            AppError::DuplicateAddress { id, first, second } => {
                assert_eq!(id, "350-1-1");
                assert_eq!((first, second), (0, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
