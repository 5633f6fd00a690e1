//! Documented HTTP status outcomes (`hydra:possibleStatus`).

use serde_json::{json, Value};

use super::iris::HYDRA_CORE_CONTEXT;

/// Rendered discriminator of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// An ordinary documented outcome.
    Status,
    /// An error response body.
    Error,
}

impl StatusKind {
    /// Returns the `@type` value used when rendering.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Status => "Status",
            StatusKind::Error => "Error",
        }
    }
}

/// A `possibleStatus` entry attachable to a document or an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraStatus {
    /// HTTP status code.
    pub code: u16,
    /// Optional id of the status node.
    pub id: Option<String>,
    /// Short title; empty when absent.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// Status or error.
    pub kind: StatusKind,
}

impl HydraStatus {
    /// Creates a status with an empty title.
    pub fn new(code: u16, description: impl Into<String>) -> Self {
        Self {
            code,
            id: None,
            title: String::new(),
            description: description.into(),
            kind: StatusKind::Status,
        }
    }

    /// Creates an error status, rendered with `@type: "Error"`.
    pub fn error(code: u16, description: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            ..Self::new(code, description)
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Renders the status. The Hydra core `@context` is always injected,
    /// whatever context the enclosing document carries.
    #[must_use]
    pub fn generate(&self) -> Value {
        let mut node = json!({
            "@context": HYDRA_CORE_CONTEXT,
            "@type": self.kind.as_str(),
            "statusCode": self.code,
            "title": self.title,
            "description": self.description,
        });
        if let Some(id) = &self.id {
            node["@id"] = json!(id);
        }
        node
    }
}
