use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a member import. Returned even when some rows have been rejected.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct ImportSummary {
    users_created: usize,
    memberships_created: usize,
    errors: Vec<String>,
}

impl ImportSummary {
    pub fn new(users_created: usize, memberships_created: usize, errors: Vec<String>) -> Self {
        Self {
            users_created,
            memberships_created,
            errors,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct ImportRequest {
    members_csv_path: PathBuf,
    address_csv_path: PathBuf,
}

impl ImportRequest {
    pub fn new(members_csv_path: PathBuf, address_csv_path: PathBuf) -> Self {
        Self {
            members_csv_path,
            address_csv_path,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct ImportReport {
    success: bool,
    #[serde(flatten)]
    summary: ImportSummary,
}

impl From<ImportSummary> for ImportReport {
    fn from(summary: ImportSummary) -> Self {
        Self {
            success: true,
            summary,
        }
    }
}
