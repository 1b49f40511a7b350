use crate::domain::model::{AddressBookEntry, RawAddressRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote address lookup. Service-level refusals come back as
/// `AppError::Service`, everything else that goes wrong as a transport error.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn find_addresses(
        &self,
        post_code: &str,
        house_number: &str,
    ) -> Result<Vec<RawAddressRecord>>;
}

/// Ordered collection of committed entries.
pub trait AddressBook: Send {
    fn add(&mut self, entry: AddressBookEntry);
    fn remove(&mut self, address_id: &str) -> usize;
    fn remove_all(&mut self);
    fn entries(&self) -> &[AddressBookEntry];

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn lookup_path(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}
