use crate::domain::model::{Address, AddressBookEntry};
use crate::utils::error::ValidationError;

/// Checks the person form against the current search results. The first
/// failing check decides the error.
pub fn validate_enrollment(
    selected_address_id: &str,
    first_name: &str,
    last_name: &str,
    current_results: &[Address],
) -> Result<AddressBookEntry, ValidationError> {
    if selected_address_id.is_empty() || current_results.is_empty() {
        return Err(ValidationError::NoAddressSelected);
    }

    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(ValidationError::NamesMissing);
    }

    // Reachable when the selection outlived the result set it came from.
    let address = current_results
        .iter()
        .find(|address| address.id == selected_address_id)
        .ok_or(ValidationError::SelectedAddressNotFound)?;

    Ok(AddressBookEntry::new(address.clone(), first_name, last_name))
}
