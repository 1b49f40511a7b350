use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    PostCode,
    HouseNumber,
    FirstName,
    LastName,
    SelectedAddress,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::PostCode,
        FieldName::HouseNumber,
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::SelectedAddress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::PostCode => "postCode",
            FieldName::HouseNumber => "houseNumber",
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::SelectedAddress => "selectedAddress",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = FieldName::ALL.iter().map(FieldName::as_str).collect();
                format!("unknown field '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

/// Current value of every form field. Each field is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSet {
    pub post_code: String,
    pub house_number: String,
    pub first_name: String,
    pub last_name: String,
    pub selected_address: String,
}

/// One candidate from the lookup service, as received. Values are kept
/// untyped; the transformer decides whether a record is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAddressRecord {
    #[serde(default)]
    pub street: Option<serde_json::Value>,
    #[serde(default)]
    pub city: Option<serde_json::Value>,
    #[serde(default)]
    pub postcode: Option<serde_json::Value>,
    #[serde(default)]
    pub lat: Option<serde_json::Value>,
    #[serde(default)]
    pub long: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub house_number: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub lat: String,
    pub long: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {}",
            self.street, self.house_number, self.postcode, self.city
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookEntry {
    #[serde(flatten)]
    pub address: Address,
    pub first_name: String,
    pub last_name: String,
}

impl AddressBookEntry {
    pub fn new(address: Address, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            address,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiStatus {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Succeeded,
    Failed,
}

/// Issued when a search starts; its outcome is only applied while the
/// ticket is still the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub attempt: u64,
    pub post_code: String,
    pub house_number: String,
}

/// Wire shape of the lookup endpoint body.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errormessage: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_round_trips_through_str() {
        for name in FieldName::ALL {
            assert_eq!(name.as_str().parse::<FieldName>().unwrap(), name);
        }
        assert!("postcode".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_field_set_serializes_every_key() {
        let json = serde_json::to_value(FieldSet::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for name in FieldName::ALL {
            assert_eq!(object.get(name.as_str()).unwrap(), "");
        }
    }

    #[test]
    fn test_raw_record_keeps_provider_attributes() {
        let raw: RawAddressRecord = serde_json::from_value(serde_json::json!({
            "street": "Main St",
            "city": "Oslo",
            "postcode": "1345",
            "lat": 59.91,
            "long": "10.75",
            "municipality": "Bærum"
        }))
        .unwrap();

        assert_eq!(raw.street, Some(serde_json::json!("Main St")));
        assert_eq!(raw.extra.get("municipality").unwrap(), "Bærum");
        assert!(!raw.extra.contains_key("street"));
    }

    #[test]
    fn test_raw_record_accepts_mistyped_fields() {
        let raw: RawAddressRecord =
            serde_json::from_value(serde_json::json!({ "street": 42, "city": null })).unwrap();

        assert_eq!(raw.street, Some(serde_json::json!(42)));
        assert_eq!(raw.city, None);
    }

    #[test]
    fn test_entry_serializes_flat() {
        let entry = AddressBookEntry::new(
            Address {
                id: "350-1-2".to_string(),
                house_number: "350".to_string(),
                street: "Main St".to_string(),
                city: "Oslo".to_string(),
                postcode: "1345".to_string(),
                lat: "1".to_string(),
                long: "2".to_string(),
            },
            "Ada",
            "Lovelace",
        );

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "350-1-2");
        assert_eq!(json["houseNumber"], "350");
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
    }
}
