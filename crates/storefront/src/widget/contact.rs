//! Contact form stub.
//!
//! Submissions are intercepted and acknowledged locally; nothing is sent.

use super::CartWidget;
use crate::page::ElementId;
use crate::storage::Storage;
use crate::toast::ToastKind;

/// Toast shown after the contact form is submitted.
pub const CONTACT_SENT_MESSAGE: &str = "✉️ Message sent! I'll get back to you soon.";

impl<S: Storage> CartWidget<S> {
    pub(super) fn submit_contact(&mut self) {
        self.show_toast(CONTACT_SENT_MESSAGE, ToastKind::Success);
        if let Some(form) = self.page.get_mut(ElementId::ContactForm) {
            form.reset_fields();
        }
        tracing::info!("Contact form submitted");
    }
}
