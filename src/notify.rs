use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

/// Blocking (modal) error notification. The UI stays usable once it is dismissed.
pub async fn show_error(title: &str, message: &str) {
    AsyncMessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}
