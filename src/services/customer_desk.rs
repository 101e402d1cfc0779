//! The customer desk: list snapshot, draft, edit mode and success banner.
//!
//! A [`CustomerDesk`] lives for as long as the page it backs. Every operation
//! takes `&mut self`, so callers sharing a desk serialize their events through
//! one lock and the state only ever changes one event at a time.

use std::sync::Arc;

use crate::directory::CustomerDirectory;
use crate::domain::customer::Customer;
use crate::domain::types::CustomerId;
use crate::dto::customers::{DeleteConfirmationData, DeskPageData, FieldMessages};
use crate::forms::customer::{
    CustomerDraft, CustomerField, CustomerForm, EMAIL_TAKEN_MESSAGE, FieldErrors,
};
use crate::services::banner::{BannerKind, SuccessBanner};
use crate::services::{ServiceError, ServiceResult};

/// Desk shared between request handlers; the lock orders UI events.
pub type SharedDesk = tokio::sync::Mutex<CustomerDesk>;

/// Question asked before a customer is deleted.
pub const DELETE_PROMPT: &str = "Delete this customer?";

/// Answers a yes/no question before a destructive action.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Whether the draft creates a customer or updates an existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DraftMode {
    #[default]
    Idle,
    Editing(CustomerId),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Blocked(FieldErrors),
    /// The directory created the customer.
    Created,
    /// The directory updated the edited customer.
    Updated,
    /// The directory refused the email address.
    EmailTaken,
    /// The directory call failed for any other reason.
    Dropped,
    /// The post was typed on a draft that has since been replaced.
    Stale,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Declined,
    Deleted,
    /// The directory call failed.
    Failed,
}

pub struct CustomerDesk {
    directory: Arc<dyn CustomerDirectory>,
    customers: Vec<Customer>,
    draft: CustomerDraft,
    mode: DraftMode,
    banner: SuccessBanner,
}

impl CustomerDesk {
    /// Creates an idle desk with an empty list and the default banner.
    pub fn new(directory: Arc<dyn CustomerDirectory>) -> Self {
        Self::with_banner(directory, SuccessBanner::default())
    }

    /// Creates an idle desk that shows successes on `banner`.
    pub fn with_banner(directory: Arc<dyn CustomerDirectory>, banner: SuccessBanner) -> Self {
        Self {
            directory,
            customers: Vec::new(),
            draft: CustomerDraft::default(),
            mode: DraftMode::Idle,
            banner,
        }
    }

    /// Creates an idle desk and performs the initial load.
    ///
    /// A failed initial load leaves the desk with an empty list.
    pub async fn mount(directory: Arc<dyn CustomerDirectory>) -> Self {
        let mut desk = Self::new(directory);
        if let Ok(count) = desk.reload().await {
            log::info!("Desk mounted with {count} customers");
        }
        desk
    }

    /// Replaces the snapshot with the directory's current list.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&mut self) -> ServiceResult<usize> {
        let customers = self.directory.list_customers().await.map_err(|err| {
            log::warn!("Failed to load customers: {err}");
            err
        })?;
        self.customers = customers;
        Ok(self.customers.len())
    }

    /// Cached list snapshot.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn draft(&self) -> &CustomerDraft {
        &self.draft
    }

    /// Whether a submit would create or update.
    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    /// Row being edited, if any.
    pub fn editing_target(&self) -> Option<CustomerId> {
        match self.mode {
            DraftMode::Idle => None,
            DraftMode::Editing(customer_id) => Some(customer_id),
        }
    }

    /// Banner currently on screen.
    pub fn banner(&self) -> Option<BannerKind> {
        self.banner.current()
    }

    /// Types `value` into one field of the draft.
    pub fn set_field(&mut self, field: CustomerField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    /// Applies the fields a browser posted, touching the ones that changed.
    pub fn apply_form(&mut self, form: CustomerForm) {
        self.draft.apply(form);
    }

    /// Applies a posted form and submits it.
    ///
    /// A post that names an older draft revision is ignored, so the same
    /// page posted twice sends the customer once.
    pub async fn submit_posted(
        &mut self,
        form: CustomerForm,
        revision: Option<u64>,
    ) -> SubmitOutcome {
        let current = self.draft.revision();
        if revision.is_some_and(|revision| revision != current) {
            log::info!("Ignoring submit typed on draft {revision:?}, current is {current}");
            return SubmitOutcome::Stale;
        }

        self.apply_form(form);
        self.submit().await
    }

    /// Validates the draft and sends it as a create or an update.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.draft.validate_for_submit() {
            Ok(payload) => payload,
            Err(errors) => return SubmitOutcome::Blocked(errors),
        };

        let result = match self.mode {
            DraftMode::Idle => self
                .directory
                .create_customer(&payload)
                .await
                .map(|()| BannerKind::Added),
            DraftMode::Editing(customer_id) => self
                .directory
                .update_customer(customer_id, &payload)
                .await
                .map(|()| BannerKind::Updated),
        };

        match result {
            Ok(kind) => {
                self.draft.clear();
                self.mode = DraftMode::Idle;
                self.banner.show(kind);
                // Stale list is tolerated; reload already logged the failure.
                let _ = self.reload().await;
                match kind {
                    BannerKind::Added => SubmitOutcome::Created,
                    BannerKind::Updated => SubmitOutcome::Updated,
                }
            }
            Err(err) if err.is_email_conflict() => {
                log::info!("Directory refused email {}: {err}", payload.email);
                self.draft
                    .set_error(CustomerField::Email, EMAIL_TAKEN_MESSAGE);
                SubmitOutcome::EmailTaken
            }
            Err(err) => {
                log::warn!("Failed to save customer: {err}");
                SubmitOutcome::Dropped
            }
        }
    }

    /// Loads the row into the draft and targets it for update.
    ///
    /// Any unsaved input, including an edit of another row, is discarded.
    pub fn edit(&mut self, customer_id: CustomerId) -> ServiceResult<()> {
        let customer = self.find(customer_id)?;
        let values = CustomerForm::from(customer);
        self.draft.reset_to(values);
        self.mode = DraftMode::Editing(customer_id);
        Ok(())
    }

    /// Leaves edit mode and empties the draft.
    pub fn cancel(&mut self) {
        self.mode = DraftMode::Idle;
        self.draft.clear();
    }

    /// Deletes the customer once `confirmation` agrees, then reloads.
    pub async fn delete<C>(&mut self, customer_id: CustomerId, confirmation: &C) -> DeleteOutcome
    where
        C: Confirmation + ?Sized,
    {
        if !confirmation.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Declined;
        }

        match self.directory.delete_customer(customer_id).await {
            Ok(()) => {
                let _ = self.reload().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                log::warn!("Failed to delete customer {customer_id}: {err}");
                DeleteOutcome::Failed
            }
        }
    }

    /// Row and prompt for the confirmation page.
    pub fn delete_confirmation(
        &self,
        customer_id: CustomerId,
    ) -> ServiceResult<DeleteConfirmationData> {
        let customer = self.find(customer_id)?.clone();
        Ok(DeleteConfirmationData {
            customer,
            prompt: DELETE_PROMPT,
        })
    }

    /// Everything the desk page renders.
    pub fn page_data(&self) -> DeskPageData {
        let errors = FieldMessages::from(&self.draft.visible_errors());
        let submit_label = match self.mode {
            DraftMode::Idle => "Add Customer",
            DraftMode::Editing(_) => "Update Customer",
        };

        DeskPageData {
            customers: self.customers.clone(),
            draft: self.draft.values().clone(),
            revision: self.draft.revision(),
            errors,
            editing_id: self.editing_target(),
            submit_label,
            banner: self.banner().map(BannerKind::message),
        }
    }

    fn find(&self, customer_id: CustomerId) -> ServiceResult<&Customer> {
        self.customers
            .iter()
            .find(|customer| customer.id == customer_id)
            .ok_or(ServiceError::NotFound)
    }
}
