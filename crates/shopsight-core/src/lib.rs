pub mod brand;
pub mod config;

use thiserror::Error;

pub use brand::{
    BrandContext, Category, CategoryStatus, CompetitorSet, ContactDetails, ImportantLink,
    Platform, Price, Product, QaPair, SocialHandle,
};
pub use config::{load_app_config, load_app_config_from_env, AppConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
