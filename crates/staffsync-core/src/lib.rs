mod app_config;
mod assignment;
mod config;
mod locations;
mod staff;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, StaffResolution};
pub use assignment::{AssignmentResult, UserError};
pub use config::{load_app_config, load_app_config_from_env};
pub use locations::{detect_new_locations, CompanyRef, LocationRecord};
pub use staff::{
    load_staff_directory, StaffAssignment, StaffDirectory, StaffDirectoryFile, StaffEntry,
    StaffSource,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read staff directory {path}: {source}")]
    StaffDirectoryIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse staff directory: {0}")]
    StaffDirectoryParse(#[source] serde_yaml::Error),

    #[error("staff directory validation failed: {0}")]
    Validation(String),
}
