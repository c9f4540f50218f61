//! Render configuration.
//!
//! # Responsibility
//! - Hold the operator-supplied fallbacks and placeholder texts used when a
//!   record field degrades.
//!
//! # Invariants
//! - `fallback_portrait_url` is always an absolute `http(s)` URL once
//!   `validate()` has passed.
//! - Placeholder texts are escaped at render time like any other text.

use crate::render::url::{parse_absolute_url, UrlRejection};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Portrait shown when a team member has no usable image.
pub const DEFAULT_FALLBACK_PORTRAIT_URL: &str = "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&q=80";
pub const DEFAULT_DATE_PLACEHOLDER: &str = "Date TBD";
pub const DEFAULT_RELATIVE_AGE_PLACEHOLDER: &str = "Recently";

/// Tunable render fallbacks. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub fallback_portrait_url: String,
    /// Shown instead of a formatted date that failed to parse.
    pub date_placeholder: String,
    /// Shown instead of a relative age that could not be computed.
    pub relative_age_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fallback_portrait_url: DEFAULT_FALLBACK_PORTRAIT_URL.to_string(),
            date_placeholder: DEFAULT_DATE_PLACEHOLDER.to_string(),
            relative_age_placeholder: DEFAULT_RELATIVE_AGE_PLACEHOLDER.to_string(),
        }
    }
}

impl RenderOptions {
    /// Parses and validates options from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(raw).map_err(OptionsError::Json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads, parses and validates options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(OptionsError::Io)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        parse_absolute_url(&self.fallback_portrait_url)
            .map_err(OptionsError::InvalidFallbackUrl)?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum OptionsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidFallbackUrl(UrlRejection),
}

impl Display for OptionsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read render options: {err}"),
            Self::Json(err) => write!(f, "invalid render options: {err}"),
            Self::InvalidFallbackUrl(err) => write!(f, "invalid fallback_portrait_url: {err}"),
        }
    }
}

impl Error for OptionsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidFallbackUrl(err) => Some(err),
        }
    }
}
