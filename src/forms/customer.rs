//! The customer form and the draft the desk keeps while it is mounted.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::{
    CustomerAge, CustomerEmail, CustomerName, MAX_AGE, MAX_NAME_CHARS, TypeConstraintError,
};
use crate::forms::FormError;

/// Message attached to the email field when the directory reports a clash.
pub const EMAIL_TAKEN_MESSAGE: &str = "Email is already taken.";

/// Fields of the customer form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerField {
    Email,
    Name,
    Age,
}

impl CustomerField {
    pub const ALL: [CustomerField; 3] = [Self::Email, Self::Name, Self::Age];

    /// Name of the field as used in HTML forms and validation errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Age => "age",
        }
    }

    /// Looks a field up by its form name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_email_field(value: &str) -> Result<(), ValidationError> {
    match CustomerEmail::new(value) {
        Ok(_) => Ok(()),
        Err(TypeConstraintError::EmptyString) => {
            Err(field_error("required", "Must enter email".to_string()))
        }
        Err(_) => Err(field_error("email", "Invalid email".to_string())),
    }
}

fn validate_name_field(value: &str) -> Result<(), ValidationError> {
    match CustomerName::new(value) {
        Ok(_) => Ok(()),
        Err(TypeConstraintError::EmptyString) => {
            Err(field_error("required", "Must enter a name".to_string()))
        }
        Err(_) => Err(field_error(
            "max",
            format!("name must be at most {MAX_NAME_CHARS} characters"),
        )),
    }
}

fn validate_age_field(value: &str) -> Result<(), ValidationError> {
    match CustomerAge::parse(value) {
        Ok(_) => Ok(()),
        Err(TypeConstraintError::EmptyString) => {
            Err(field_error("required", "Must enter age".to_string()))
        }
        Err(TypeConstraintError::NonPositive) => Err(field_error(
            "positive",
            "age must be a positive number".to_string(),
        )),
        Err(TypeConstraintError::NotInteger) => {
            Err(field_error("integer", "age must be an integer".to_string()))
        }
        Err(TypeConstraintError::AboveMaximum { .. }) => Err(field_error(
            "max",
            format!("age must be less than or equal to {MAX_AGE}"),
        )),
        Err(_) => Err(field_error("type", "Enter a number".to_string())),
    }
}

/// Free-text values of the customer form, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerForm {
    #[serde(default)]
    #[validate(custom(function = "validate_email_field"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_name_field"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_age_field"))]
    pub age: String,
}

impl CustomerForm {
    /// Current text of `field`.
    pub fn get(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Email => &self.email,
            CustomerField::Name => &self.name,
            CustomerField::Age => &self.age,
        }
    }

    fn slot(&mut self, field: CustomerField) -> &mut String {
        match field {
            CustomerField::Email => &mut self.email,
            CustomerField::Name => &mut self.name,
            CustomerField::Age => &mut self.age,
        }
    }
}

impl From<&Customer> for CustomerForm {
    /// Copies a directory record verbatim; a missing age becomes empty text.
    fn from(customer: &Customer) -> Self {
        Self {
            email: customer.email.clone(),
            name: customer.name.clone(),
            age: customer.age.map(|age| age.to_string()).unwrap_or_default(),
        }
    }
}

/// Customer form as posted by the desk page.
///
/// `revision` names the draft the page was rendered from; browsers always
/// send it, other clients may leave it out.
#[derive(Debug, Deserialize)]
pub struct SubmitCustomerForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub revision: Option<u64>,
}

impl SubmitCustomerForm {
    /// Splits the post into draft values and the revision they were typed on.
    pub fn into_parts(self) -> (CustomerForm, Option<u64>) {
        let form = CustomerForm {
            email: self.email,
            name: self.name,
            age: self.age,
        };
        (form, self.revision)
    }
}

impl TryFrom<&CustomerForm> for CustomerPayload {
    type Error = FormError;

    fn try_from(form: &CustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = CustomerName::new(form.name.as_str()).map_err(|_| FormError::InvalidName)?;
        let email = CustomerEmail::new(form.email.as_str()).map_err(|_| FormError::InvalidEmail)?;
        let age = CustomerAge::parse(&form.age).map_err(|_| FormError::InvalidAge)?;

        Ok(CustomerPayload::new(name, email, age))
    }
}

/// Field-scoped error messages, at most one per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<CustomerField, String>);

impl FieldErrors {
    /// Message for `field`, if it has one.
    pub fn get(&self, field: CustomerField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Sets the message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: CustomerField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages in display order.
    pub fn iter(&self) -> impl Iterator<Item = (CustomerField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut result = FieldErrors::default();
        for (key, field_errors) in errors.field_errors() {
            let Some(field) = CustomerField::from_key(&key) else {
                continue;
            };
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                result.insert(field, message);
            }
        }
        result
    }
}

/// In-progress form values with touched tracking.
///
/// Errors are recomputed for every field on each change, but only touched
/// fields expose theirs through [`CustomerDraft::visible_errors`]. The
/// revision advances every time the draft is replaced wholesale.
#[derive(Clone, Debug, Default)]
pub struct CustomerDraft {
    values: CustomerForm,
    touched: BTreeSet<CustomerField>,
    errors: FieldErrors,
    revision: u64,
}

impl CustomerDraft {
    /// Values as typed.
    pub fn values(&self) -> &CustomerForm {
        &self.values
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the user has changed `field` since the last reset.
    pub fn is_touched(&self, field: CustomerField) -> bool {
        self.touched.contains(&field)
    }

    /// Updates one field, marks it touched and re-validates the draft.
    pub fn set_field(&mut self, field: CustomerField, value: impl Into<String>) {
        *self.values.slot(field) = value.into();
        self.touched.insert(field);
        self.revalidate();
    }

    /// Applies every posted value that differs from the current draft.
    pub fn apply(&mut self, form: CustomerForm) {
        for field in CustomerField::ALL {
            let value = form.get(field);
            if value != self.values.get(field) {
                self.set_field(field, value);
            }
        }
    }

    /// Replaces the values wholesale, forgetting touched fields and errors.
    pub fn reset_to(&mut self, values: CustomerForm) {
        self.values = values;
        self.touched.clear();
        self.errors = FieldErrors::default();
        self.revision = self.revision.wrapping_add(1);
    }

    /// Empties every field.
    pub fn clear(&mut self) {
        self.reset_to(CustomerForm::default());
    }

    /// Touches every field and validates, as a submit attempt does.
    pub fn validate_for_submit(&mut self) -> Result<CustomerPayload, FieldErrors> {
        self.touched.extend(CustomerField::ALL);
        self.revalidate();
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        CustomerPayload::try_from(&self.values).map_err(|err| {
            log::error!("Draft passed field validation but not payload conversion: {err}");
            self.errors.clone()
        })
    }

    /// Attaches an error reported by the directory rather than by validation.
    pub fn set_error(&mut self, field: CustomerField, message: impl Into<String>) {
        self.touched.insert(field);
        self.errors.insert(field, message);
    }

    /// Errors for touched fields only.
    pub fn visible_errors(&self) -> FieldErrors {
        let mut visible = FieldErrors::default();
        for (field, message) in self.errors.iter() {
            if self.is_touched(field) {
                visible.insert(field, message);
            }
        }
        visible
    }

    fn revalidate(&mut self) {
        self.errors = match self.values.validate() {
            Ok(()) => FieldErrors::default(),
            Err(errors) => FieldErrors::from(&errors),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CustomerId;

    fn form(email: &str, name: &str, age: &str) -> CustomerForm {
        CustomerForm {
            email: email.to_string(),
            name: name.to_string(),
            age: age.to_string(),
        }
    }

    fn errors_of(values: CustomerForm) -> FieldErrors {
        let mut draft = CustomerDraft::default();
        draft.reset_to(values);
        draft
            .validate_for_submit()
            .expect_err("draft should be rejected")
    }

    #[test]
    fn valid_form_converts_to_payload() {
        let payload = CustomerPayload::try_from(&form("Ada@Example.com", " Ada ", "36"))
            .expect("valid form");

        assert_eq!(payload.email.as_str(), "ada@example.com");
        assert_eq!(payload.name.as_str(), "Ada");
        assert_eq!(payload.age.get(), 36);
    }

    #[test]
    fn empty_form_reports_required_messages() {
        let errors = errors_of(CustomerForm::default());

        assert_eq!(errors.get(CustomerField::Email), Some("Must enter email"));
        assert_eq!(errors.get(CustomerField::Name), Some("Must enter a name"));
        assert_eq!(errors.get(CustomerField::Age), Some("Must enter age"));
    }

    #[test]
    fn long_name_is_rejected() {
        let errors = errors_of(form("ada@example.com", "Augusta Ada King", "36"));

        assert_eq!(
            errors.get(CustomerField::Name),
            Some("name must be at most 15 characters")
        );
        assert_eq!(errors.get(CustomerField::Email), None);
        assert_eq!(errors.get(CustomerField::Age), None);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors = errors_of(form("ada.example.com", "Ada", "36"));

        assert_eq!(errors.get(CustomerField::Email), Some("Invalid email"));
    }

    #[test]
    fn age_rules_produce_distinct_messages() {
        let cases = [
            ("abc", "Enter a number"),
            ("0", "age must be a positive number"),
            ("-1", "age must be a positive number"),
            ("2.5", "age must be an integer"),
            ("126", "age must be less than or equal to 125"),
        ];

        for (age, expected) in cases {
            let errors = errors_of(form("ada@example.com", "Ada", age));
            assert_eq!(errors.get(CustomerField::Age), Some(expected), "age {age:?}");
        }
    }

    #[test]
    fn errors_are_hidden_until_a_field_is_touched() {
        let mut draft = CustomerDraft::default();

        draft.set_field(CustomerField::Name, "Ada");

        let visible = draft.visible_errors();
        assert!(visible.is_empty());

        draft.set_field(CustomerField::Age, "x");
        let visible = draft.visible_errors();
        assert_eq!(visible.get(CustomerField::Age), Some("Enter a number"));
        assert_eq!(visible.get(CustomerField::Email), None);
    }

    #[test]
    fn changing_a_touched_field_clears_its_error() {
        let mut draft = CustomerDraft::default();

        draft.set_field(CustomerField::Age, "200");
        assert!(draft.visible_errors().get(CustomerField::Age).is_some());

        draft.set_field(CustomerField::Age, "20");
        assert_eq!(draft.visible_errors().get(CustomerField::Age), None);
    }

    #[test]
    fn apply_only_touches_changed_fields() {
        let mut draft = CustomerDraft::default();

        draft.apply(form("", "Ada", ""));

        assert!(draft.is_touched(CustomerField::Name));
        assert!(!draft.is_touched(CustomerField::Email));
        assert!(!draft.is_touched(CustomerField::Age));
    }

    #[test]
    fn server_error_is_visible_and_replaced_on_next_change() {
        let mut draft = CustomerDraft::default();
        draft.reset_to(form("ada@example.com", "Ada", "36"));

        draft.set_error(CustomerField::Email, EMAIL_TAKEN_MESSAGE);
        assert_eq!(
            draft.visible_errors().get(CustomerField::Email),
            Some(EMAIL_TAKEN_MESSAGE)
        );

        draft.set_field(CustomerField::Email, "ada2@example.com");
        assert_eq!(draft.visible_errors().get(CustomerField::Email), None);
    }

    #[test]
    fn name_length_counts_typed_spaces() {
        let errors = errors_of(form("ada@example.com", "Ada Lovelace    ", "36"));

        assert_eq!(
            errors.get(CustomerField::Name),
            Some("name must be at most 15 characters")
        );
    }

    #[test]
    fn only_wholesale_resets_advance_the_revision() {
        let mut draft = CustomerDraft::default();
        let start = draft.revision();

        draft.set_field(CustomerField::Name, "Ada");
        draft.set_error(CustomerField::Email, EMAIL_TAKEN_MESSAGE);
        let _ = draft.validate_for_submit();
        assert_eq!(draft.revision(), start);

        draft.clear();
        assert_eq!(draft.revision(), start + 1);
        draft.reset_to(form("ada@example.com", "Ada", "36"));
        assert_eq!(draft.revision(), start + 2);
    }

    #[test]
    fn form_copies_customer_verbatim() {
        let customer = Customer {
            id: CustomerId::new(7).unwrap(),
            name: "Grace".to_string(),
            email: "Grace@Navy.mil".to_string(),
            age: Some(85),
        };

        assert_eq!(
            CustomerForm::from(&customer),
            form("Grace@Navy.mil", "Grace", "85")
        );
    }
}
