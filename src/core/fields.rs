use crate::domain::model::{FieldName, FieldSet};

impl FieldSet {
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::PostCode => &self.post_code,
            FieldName::HouseNumber => &self.house_number,
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::SelectedAddress => &self.selected_address,
        }
    }

    /// Unvalidated; checks happen when a form is submitted.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        let slot = match name {
            FieldName::PostCode => &mut self.post_code,
            FieldName::HouseNumber => &mut self.house_number,
            FieldName::FirstName => &mut self.first_name,
            FieldName::LastName => &mut self.last_name,
            FieldName::SelectedAddress => &mut self.selected_address,
        };
        *slot = value.into();
    }

    pub fn reset_all(&mut self) {
        *self = FieldSet::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}
