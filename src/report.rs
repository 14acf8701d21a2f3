// src/report.rs
// =============================================================================
// The result of one page analysis, plus its JSON save format.
//
// A Report is built once by the analyzer and never changed afterwards.
// Fields that could be "missing" hold sentinel strings or `false` instead, so
// renderers never have to check for absence.
//
// On disk the report is a single JSON object whose keys are the camelCase
// field names below.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ReportError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub meta_description: String,
    pub load_time_seconds: f64,
    pub images_without_alt: u64,
    pub broken_links: u64,
    #[serde(rename = "canonicalURL")]
    pub canonical_url: String,
    pub sitemap_found: bool,
    pub robots_found: bool,
    pub tls_configured: bool,
    pub headers: BTreeMap<String, String>,
}

impl Report {
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the report as indented JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
