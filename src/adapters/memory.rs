use crate::domain::model::AddressBookEntry;
use crate::domain::ports::AddressBook;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressBook {
    entries: Vec<AddressBookEntry>,
}

impl InMemoryAddressBook {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddressBook for InMemoryAddressBook {
    fn add(&mut self, entry: AddressBookEntry) {
        self.entries.push(entry);
    }

    fn remove(&mut self, address_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.address.id != address_id);
        before - self.entries.len()
    }

    fn remove_all(&mut self) {
        self.entries.clear();
    }

    fn entries(&self) -> &[AddressBookEntry] {
        &self.entries
    }
}
