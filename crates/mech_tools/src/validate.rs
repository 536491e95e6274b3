//! Data validation utilities.
//!
//! Every `.ron` file in a data directory is parsed as an equipment catalog
//! and checked for data-quality issues. Ids must also be unique across
//! files, since the engine loads them into one registry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mech_core::equipment::{CatalogIssue, EquipmentRegistry};
use mech_core::error::RulesError;
use serde::Serialize;
use thiserror::Error;

/// Failures that stop validation outright.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// A file or directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A data file did not parse or contained duplicate ids.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// The directory holds no data files.
    #[error("No .ron data files found in {}", .0.display())]
    NoDataFiles(PathBuf),
}

/// Result type alias using [`ValidateError`].
pub type Result<T> = std::result::Result<T, ValidateError>;

/// Findings for one data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File name as given to the parser.
    pub source_name: String,
    /// Number of entries.
    pub entries: usize,
    /// Data-quality issues.
    pub issues: Vec<CatalogIssue>,
}

/// An id defined in more than one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossFileDuplicate {
    /// Duplicated id.
    pub id: String,
    /// File that defined it first.
    pub first: String,
    /// File that defined it again.
    pub second: String,
}

/// Findings for a whole data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Per-file findings, in file name order.
    pub files: Vec<FileReport>,
    /// Ids defined in several files.
    pub duplicates: Vec<CrossFileDuplicate>,
}

impl ValidationReport {
    /// Total number of problems.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.files.iter().map(|f| f.issues.len()).sum::<usize>() + self.duplicates.len()
    }

    /// Whether nothing was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

/// Parse one catalog text and collect its issues.
///
/// # Errors
///
/// Returns an error if the text does not parse or repeats an id.
pub fn validate_catalog_text(source_name: &str, text: &str) -> Result<(EquipmentRegistry, FileReport)> {
    let registry = EquipmentRegistry::from_ron_str(source_name, text)?;
    let issues = registry.issues();
    for issue in &issues {
        tracing::warn!(source_name, "{issue}");
    }
    let report = FileReport {
        source_name: source_name.to_string(),
        entries: registry.len(),
        issues,
    };
    Ok((registry, report))
}

/// Validate all RON data files in a directory, or a single file.
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed, or if a directory
/// holds no data files.
pub fn validate_data_directory(path: &Path) -> Result<ValidationReport> {
    let files = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        data_files(path)?
    };
    if files.is_empty() {
        return Err(ValidateError::NoDataFiles(path.to_path_buf()));
    }

    let mut report = ValidationReport::default();
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for file in files {
        let text = std::fs::read_to_string(&file).map_err(|source| ValidateError::Io {
            path: file.clone(),
            source,
        })?;
        let source_name = file
            .file_name()
            .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
        tracing::debug!(%source_name, "Validating data file");

        let (registry, file_report) = validate_catalog_text(&source_name, &text)?;
        for definition in registry.iter() {
            if let Some(first) = seen.get(&definition.id) {
                tracing::warn!(id = %definition.id, %first, second = %source_name, "Duplicate equipment id");
                report.duplicates.push(CrossFileDuplicate {
                    id: definition.id.clone(),
                    first: first.clone(),
                    second: source_name.clone(),
                });
            } else {
                seen.insert(definition.id.clone(), source_name.clone());
            }
        }
        report.files.push(file_report);
    }
    Ok(report)
}

/// `.ron` files directly inside `dir`, sorted by path.
fn data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| ValidateError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
