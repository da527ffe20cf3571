use cv_agent_core::models::DocumentFile;
use cv_agent_core::Conversation;
use dioxus::prelude::*;
use dioxus_free_icons::{icons::fi_icons, Icon};
use rfd::AsyncFileDialog;

#[component]
pub fn UploadCard(on_file: EventHandler<DocumentFile>) -> Element {
    let conversation = use_context::<Signal<Conversation>>();
    let upload = conversation.read().upload.clone();
    let file_name = upload.file_name.clone().unwrap_or_default();
    let busy_class = if upload.uploading { "uploading" } else { "" };

    let choose_file = move |_| {
        spawn(async move {
            // A cancelled dialog is not an error; there is just nothing to upload.
            let Some(handle) = AsyncFileDialog::new()
                .set_title("Choose a résumé")
                .add_filter("PDF", &["pdf"])
                .pick_file()
                .await
            else {
                return;
            };
            let bytes = handle.read().await;
            on_file.call(DocumentFile::new(handle.file_name(), bytes));
        });
    };

    rsx! {
        div {
            class: "upload-section",
            div {
                class: "upload-card",
                div { class: "upload-icon", "📄" }
                h2 { "Résumé upload" }
                button {
                    class: "upload-button {busy_class}",
                    disabled: upload.uploading,
                    onclick: choose_file,
                    if upload.uploading {
                        div { class: "spinner" }
                        "Processing with the agent..."
                    } else {
                        Icon { width: 18, height: 18, icon: fi_icons::FiUploadCloud }
                        " Choose PDF file"
                    }
                }
                if upload.uploaded {
                    div {
                        class: "upload-success",
                        div { class: "success-icon", "✅" }
                        div {
                            class: "success-text",
                            strong { "CV processed successfully!" }
                            br {}
                            small { "File: {file_name}" }
                        }
                    }
                }
            }
        }
    }
}
