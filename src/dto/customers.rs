//! DTOs shaped for the desk templates and the JSON snapshot.

use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::types::CustomerId;
use crate::forms::customer::{CustomerField, CustomerForm, FieldErrors};

/// One optional message per form field, always serialized with every key.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct FieldMessages {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
}

impl FieldMessages {
    /// Message for `field`, if any.
    pub fn get(&self, field: CustomerField) -> Option<&str> {
        match field {
            CustomerField::Email => self.email.as_deref(),
            CustomerField::Name => self.name.as_deref(),
            CustomerField::Age => self.age.as_deref(),
        }
    }
}

impl From<&FieldErrors> for FieldMessages {
    fn from(errors: &FieldErrors) -> Self {
        let message = |field| errors.get(field).map(str::to_string);
        Self {
            email: message(CustomerField::Email),
            name: message(CustomerField::Name),
            age: message(CustomerField::Age),
        }
    }
}

/// Everything the desk page renders.
#[derive(Debug, Serialize)]
pub struct DeskPageData {
    /// Cached list snapshot shown in the table.
    pub customers: Vec<Customer>,
    /// Current draft values echoed into the inputs.
    pub draft: CustomerForm,
    /// Draft revision echoed back by the form.
    pub revision: u64,
    /// Messages for touched fields.
    pub errors: FieldMessages,
    /// Row being edited, if any.
    pub editing_id: Option<CustomerId>,
    /// "Add Customer" or "Update Customer".
    pub submit_label: &'static str,
    /// Success banner text while the banner is visible.
    pub banner: Option<&'static str>,
}

/// Data for the delete confirmation page.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmationData {
    pub customer: Customer,
    pub prompt: &'static str,
}
