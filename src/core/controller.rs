use crate::core::enrollment::validate_enrollment;
use crate::core::lookup::LookupWorkflow;
use crate::domain::model::{
    Address, AddressBookEntry, FieldName, FieldSet, RawAddressRecord, SearchPhase, SearchTicket,
    UiStatus,
};
use crate::domain::ports::{AddressBook, AddressLookup};
use crate::utils::error::{Result, ValidationError};
use std::sync::Arc;

/// Owns every piece of form state. All changes go through these methods.
pub struct FormController<L: AddressLookup, B: AddressBook> {
    fields: FieldSet,
    lookup_workflow: LookupWorkflow,
    lookup: Arc<L>,
    book: B,
}

impl<L: AddressLookup, B: AddressBook> FormController<L, B> {
    pub fn new(lookup: L, book: B) -> Self {
        Self::with_shared_lookup(Arc::new(lookup), book)
    }

    pub fn with_shared_lookup(lookup: Arc<L>, book: B) -> Self {
        Self {
            fields: FieldSet::default(),
            lookup_workflow: LookupWorkflow::new(),
            lookup,
            book,
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn results(&self) -> &[Address] {
        self.lookup_workflow.results()
    }

    pub fn status(&self) -> &UiStatus {
        self.lookup_workflow.status()
    }

    pub fn phase(&self) -> SearchPhase {
        self.lookup_workflow.phase()
    }

    pub fn address_book(&self) -> &B {
        &self.book
    }

    /// Handle for running a lookup outside of `&mut self`.
    pub fn lookup(&self) -> Arc<L> {
        Arc::clone(&self.lookup)
    }

    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.fields.set_field(name, value);
    }

    /// Selection only makes sense for an address in the current results, but
    /// like any other field it is stored unchecked.
    pub fn select_address(&mut self, address_id: impl Into<String>) {
        self.fields.set_field(FieldName::SelectedAddress, address_id);
    }

    /// Start a search with the current postcode and house number. The
    /// previous selection is dropped together with the results it pointed at.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.fields.set_field(FieldName::SelectedAddress, "");
        self.lookup_workflow
            .begin(&self.fields.post_code, &self.fields.house_number)
    }

    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<RawAddressRecord>>,
    ) -> bool {
        self.lookup_workflow.complete(ticket, outcome)
    }

    pub async fn submit_search(&mut self) -> bool {
        let ticket = self.begin_search();
        let outcome = self
            .lookup
            .find_addresses(&ticket.post_code, &ticket.house_number)
            .await;
        self.complete_search(&ticket, outcome)
    }

    /// Validate the person form and commit it to the address book. On
    /// failure the message is also placed in the status banner.
    pub fn submit_enrollment(&mut self) -> std::result::Result<(), ValidationError> {
        let outcome = validate_enrollment(
            &self.fields.selected_address,
            &self.fields.first_name,
            &self.fields.last_name,
            self.lookup_workflow.results(),
        );

        match outcome {
            Ok(entry) => {
                self.lookup_workflow.set_error(None);
                tracing::info!(address_id = %entry.address.id, "address book entry added");
                self.book.add(entry);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "enrollment rejected");
                self.lookup_workflow.set_error(Some(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn remove_entry(&mut self, address_id: &str) -> usize {
        let removed = self.book.remove(address_id);
        tracing::debug!(address_id, removed, "address book entries removed");
        removed
    }

    pub fn entries(&self) -> &[AddressBookEntry] {
        self.book.entries()
    }

    pub fn clear_all(&mut self) {
        self.lookup_workflow.reset();
        self.fields.reset_all();
        self.book.remove_all();
        tracing::info!("form and address book cleared");
    }
}
