//! Caller-supplied complaint data.

use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};

/// Reporter trust signal. Unrecognised values on the wire read as `Unverified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReporterTrust {
    Trusted,
    #[serde(other)]
    Unverified,
}

/// One complaint as handed to the engine by the request handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationInput {
    /// Free-text complaint, assumed non-empty by the engine
    pub description: String,
    /// Uploaded evidence, in upload order
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_trust: Option<ReporterTrust>,
}

impl ClassificationInput {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_urls.push(url.into());
        self
    }

    pub fn with_images<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn trusted(mut self) -> Self {
        self.reporter_trust = Some(ReporterTrust::Trusted);
        self
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self.reporter_trust, Some(ReporterTrust::Trusted))
    }

    pub fn has_image_evidence(&self) -> bool {
        !self.image_urls.is_empty()
    }

    /// Request-handler side check. The engine itself never calls this.
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(TriageError::EmptyDescription);
        }
        Ok(())
    }
}
