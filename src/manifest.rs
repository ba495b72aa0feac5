//! Companion manifests: JSON descriptions of the companions a binding
//! generator emitted for one package, checked without compiling the
//! generated code.

use crate::choice::DynamicChoice;
use crate::companion::ContractTypeCompanion;
use crate::error::{BindingError, Result};
use crate::types::Identifier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Stand-in contract type for companions built from a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicContract;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionKind {
    Template,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub module_name: String,
    pub entity_name: String,
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionManifest {
    pub package_id: String,
    #[serde(default)]
    pub templates: Vec<ManifestEntry>,
    #[serde(default)]
    pub interfaces: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedError {
    pub code: &'static str,
    pub message: String,
    pub exit_code: i32,
}

impl From<&BindingError> for ReportedError {
    fn from(error: &BindingError) -> Self {
        Self {
            code: error.code(),
            message: error.to_string(),
            exit_code: error.exit_code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryReport {
    pub kind: CompanionKind,
    pub template_id: String,
    pub choice_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportedError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub package_id: String,
    pub entries: Vec<EntryReport>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|entry| entry.error.is_none())
    }

    #[must_use]
    pub fn first_error(&self) -> Option<&ReportedError> {
        self.entries.iter().find_map(|entry| entry.error.as_ref())
    }

    /// 0 for a valid report, else the exit code of the first failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.first_error().map_or(0, |error| error.exit_code)
    }
}

impl CompanionManifest {
    /// # Errors
    ///
    /// Returns `BindingError::SerializationError` on malformed JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(BindingError::from)
    }

    /// # Errors
    ///
    /// Returns `BindingError::IoError` if the file cannot be read, or
    /// `BindingError::SerializationError` on malformed JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            templates = manifest.templates.len(),
            interfaces = manifest.interfaces.len(),
            "Loaded companion manifest"
        );
        Ok(manifest)
    }

    /// Templates first, then interfaces, each in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (CompanionKind, &ManifestEntry)> {
        self.templates
            .iter()
            .map(|entry| (CompanionKind::Template, entry))
            .chain(
                self.interfaces
                    .iter()
                    .map(|entry| (CompanionKind::Interface, entry)),
            )
    }

    /// # Errors
    ///
    /// Returns `BindingError::InvalidIdentifier` for empty or malformed names.
    pub fn identifier(&self, entry: &ManifestEntry) -> Result<Identifier> {
        Identifier::try_new(
            self.package_id.as_str(),
            entry.module_name.as_str(),
            entry.entity_name.as_str(),
        )
    }

    /// # Errors
    ///
    /// Returns `BindingError::InvalidIdentifier` or `BindingError::DuplicateChoice`.
    pub fn companion(&self, entry: &ManifestEntry) -> Result<ContractTypeCompanion<DynamicContract>> {
        let template_id = self.identifier(entry)?;
        ContractTypeCompanion::new(
            template_id,
            entry
                .choices
                .iter()
                .map(|name| DynamicChoice::<DynamicContract>::named(name.as_str()).erase()),
        )
    }

    #[must_use]
    pub fn find(&self, template_id: &Identifier) -> Option<(CompanionKind, &ManifestEntry)> {
        if template_id.package_id() != self.package_id {
            return None;
        }
        self.entries().find(|(_, entry)| {
            entry.module_name == template_id.module_name()
                && entry.entity_name == template_id.entity_name()
        })
    }

    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut seen = HashSet::new();
        let entries: Vec<EntryReport> = self
            .entries()
            .map(|(kind, entry)| {
                let outcome = self.identifier(entry).and_then(|id| {
                    if seen.insert(id.clone()) {
                        self.companion(entry)
                    } else {
                        Err(BindingError::DuplicateCompanion(id))
                    }
                });
                let display_id = format!(
                    "{}:{}:{}",
                    self.package_id, entry.module_name, entry.entity_name
                );
                match outcome {
                    Ok(companion) => EntryReport {
                        kind,
                        template_id: display_id,
                        choice_count: companion.choices().size(),
                        fingerprint: Some(companion.fingerprint()),
                        error: None,
                    },
                    Err(error) => EntryReport {
                        kind,
                        template_id: display_id,
                        choice_count: entry.choices.len(),
                        fingerprint: None,
                        error: Some(ReportedError::from(&error)),
                    },
                }
            })
            .collect();

        let report = ValidationReport {
            package_id: self.package_id.clone(),
            entries,
        };
        info!(
            package_id = %report.package_id,
            companions = report.entries.len(),
            valid = report.is_valid(),
            "Validated companion manifest"
        );
        report
    }
}
