pub mod controller;
pub mod enrollment;
pub mod fields;
pub mod lookup;
pub mod transform;

pub use crate::domain::model::{
    Address, AddressBookEntry, FieldName, FieldSet, RawAddressRecord, SearchPhase, SearchTicket,
    UiStatus,
};
pub use crate::domain::ports::{AddressBook, AddressLookup, ConfigProvider};
pub use crate::utils::error::Result;
