//! Render targets and the view collaborator.

use serde::{Deserialize, Serialize};

/// The view a request should produce, and with which status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderTarget {
    pub view: String,
    pub status: u16,
}

/// Produces the response for a request. Template engines, JSON
/// serializers and test recorders all fit behind this.
pub trait Renderer {
    fn render(&mut self, view: &str, status: u16);
}

/// Renderer that remembers every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub rendered: Vec<RenderTarget>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderTarget> {
        self.rendered.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &str, status: u16) {
        self.rendered.push(RenderTarget {
            view: view.to_string(),
            status,
        });
    }
}
