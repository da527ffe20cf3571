use crate::api::Endpoints;

pub const IMAGE_LOAD_ERROR: &str = "Could not load the graph image";

/// Show/hide state of the workflow diagram. The image itself is fetched by the
/// webview; this only decides which URL it points at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphPreview {
    pub visible: bool,
    pub image_url: Option<String>,
    pub error: Option<String>,
}

impl GraphPreview {
    /// Flips visibility. The first reveal generates the image URL.
    pub fn toggle(&mut self, endpoints: &Endpoints, now_millis: i64) {
        self.visible = !self.visible;
        if self.visible && self.image_url.is_none() {
            self.refresh(endpoints, now_millis);
        }
    }

    /// New cache-busting URL; also the retry path after a failed load.
    pub fn refresh(&mut self, endpoints: &Endpoints, now_millis: i64) {
        let url = endpoints.graph_image(now_millis);
        tracing::debug!(%url, "Graph image URL generated");
        self.image_url = Some(url);
        self.error = None;
    }

    pub fn mark_load_failed(&mut self) {
        self.error = Some(IMAGE_LOAD_ERROR.to_string());
    }
}
