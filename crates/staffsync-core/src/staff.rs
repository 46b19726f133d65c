//! Staff directory: the email → staff member lookup table.
//!
//! Locations carry an "assigned staff" email on their contacts' customer
//! metafield. The directory translates that email into the Shopify staff
//! member GID used by the assignment mutation, with one default staff member
//! for unknown or missing emails.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffEntry {
    pub email: String,
    pub staff_member_id: String,
}

/// On-disk YAML shape of the staff directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDirectoryFile {
    pub default_staff_id: String,
    #[serde(default)]
    pub staff: Vec<StaffEntry>,
}

/// Why a particular staff member was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaffSource {
    /// The email matched an entry in the directory.
    Mapped { email: String },
    /// An email was found but it is not in the directory.
    UnknownEmail { email: String },
    /// No contact carried an email.
    NoCandidate,
}

impl StaffSource {
    /// Short label for logs and API responses.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            StaffSource::Mapped { .. } => "mapped",
            StaffSource::UnknownEmail { .. } => "unknown_email",
            StaffSource::NoCandidate => "no_candidate",
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        !matches!(self, StaffSource::Mapped { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffAssignment {
    pub staff_member_id: String,
    pub source: StaffSource,
}

/// Read-only lookup table shared across requests.
#[derive(Debug, Clone)]
pub struct StaffDirectory {
    by_email: HashMap<String, String>,
    default_staff_id: String,
}

impl StaffDirectory {
    /// Builds a directory from a parsed file, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a blank default id, blank
    /// entries, or duplicate emails (compared case-insensitively).
    pub fn from_file(file: StaffDirectoryFile) -> Result<Self, ConfigError> {
        let default_staff_id = file.default_staff_id.trim().to_string();
        if default_staff_id.is_empty() {
            return Err(ConfigError::Validation(
                "default_staff_id must be non-empty".to_string(),
            ));
        }

        let mut by_email = HashMap::with_capacity(file.staff.len());
        for entry in file.staff {
            let email = normalize_email(&entry.email);
            let staff_member_id = entry.staff_member_id.trim().to_string();
            if email.is_empty() {
                return Err(ConfigError::Validation(
                    "staff entry email must be non-empty".to_string(),
                ));
            }
            if staff_member_id.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "staff entry '{email}' has an empty staff_member_id"
                )));
            }
            if by_email.insert(email.clone(), staff_member_id).is_some() {
                return Err(ConfigError::Validation(format!(
                    "duplicate staff email: '{email}'"
                )));
            }
        }

        Ok(Self {
            by_email,
            default_staff_id,
        })
    }

    #[must_use]
    pub fn default_staff_id(&self) -> &str {
        &self.default_staff_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }

    /// Picks the staff member for a resolved email, falling back to the
    /// default for unknown or missing emails.
    #[must_use]
    pub fn staff_for(&self, email: Option<&str>) -> StaffAssignment {
        let Some(raw) = email.filter(|e| !e.trim().is_empty()) else {
            return StaffAssignment {
                staff_member_id: self.default_staff_id.clone(),
                source: StaffSource::NoCandidate,
            };
        };

        let email = normalize_email(raw);
        match self.by_email.get(&email) {
            Some(id) => StaffAssignment {
                staff_member_id: id.clone(),
                source: StaffSource::Mapped { email },
            },
            None => StaffAssignment {
                staff_member_id: self.default_staff_id.clone(),
                source: StaffSource::UnknownEmail { email },
            },
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Load and validate the staff directory from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_staff_directory(path: &Path) -> Result<StaffDirectory, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StaffDirectoryIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: StaffDirectoryFile =
        serde_yaml::from_str(&content).map_err(ConfigError::StaffDirectoryParse)?;

    StaffDirectory::from_file(file)
}

#[cfg(test)]
#[path = "staff_test.rs"]
mod tests;
