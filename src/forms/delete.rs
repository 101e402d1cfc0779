use serde::Deserialize;

use crate::services::customer_desk::Confirmation;

/// Answer posted from the delete confirmation page.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteCustomerForm {
    #[serde(default)]
    pub answer: String,
}

impl Confirmation for DeleteCustomerForm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.answer.trim().eq_ignore_ascii_case("yes")
    }
}
