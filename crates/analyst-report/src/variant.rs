//! Pipeline variant selection
//!
//! Variant selection happens exactly once, at engine construction, from an
//! explicit capability snapshot. A run never switches variant mid-flight.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Minimum embedded vector-store version required by the full pipeline
pub const MIN_VECTOR_STORE_VERSION: (u32, u32, u32) = (3, 35, 0);

/// Which rendition of the report pipeline an engine runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineVariant {
    /// Two-agent pipeline with market facts gathered up front
    Full,
    /// Single direct chat call over the gathered facts
    Simplified,
    /// Canned demo report, no network calls at all
    Static,
}

impl std::fmt::Display for PipelineVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Full => "full",
            Self::Simplified => "simplified",
            Self::Static => "static",
        };
        write!(f, "{name}")
    }
}

/// Snapshot of what the runtime environment supports
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// An API credential was resolved
    pub credential_present: bool,

    /// The multi-agent orchestration layer is usable
    pub orchestration_available: bool,

    /// Direct chat calls are usable
    pub chat_available: bool,

    /// Version of the embedded vector store, if one is linked in
    pub vector_store_version: Option<(u32, u32, u32)>,
}

impl Capabilities {
    /// Capability snapshot of this build: everything is compiled in, so the
    /// only runtime question is whether a credential was resolved.
    pub fn detect(credential_present: bool) -> Self {
        Self {
            credential_present,
            orchestration_available: true,
            chat_available: true,
            vector_store_version: Some(MIN_VECTOR_STORE_VERSION),
        }
    }

    fn vector_store_supported(&self) -> bool {
        self.vector_store_version
            .is_some_and(|v| v >= MIN_VECTOR_STORE_VERSION)
    }
}

/// Select the pipeline variant for a capability snapshot
///
/// A missing credential is a hard stop, not a fallback: without a key no
/// variant can produce a genuine report, and failing loudly beats returning
/// demo text that looks real.
pub fn select_variant(caps: &Capabilities) -> Result<PipelineVariant> {
    if !caps.credential_present {
        return Err(ReportError::CredentialMissing);
    }
    if caps.orchestration_available && caps.vector_store_supported() {
        return Ok(PipelineVariant::Full);
    }
    if caps.chat_available {
        return Ok(PipelineVariant::Simplified);
    }
    Ok(PipelineVariant::Static)
}
