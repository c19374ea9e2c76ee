//! # LoadQuote Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - SQLite-backed repositories for every persistence port
//! - Static rate tables (fuel by country, toll by country and truck class)
//! - The template content enhancer standing behind the enhancement port
//! - Configuration loading from environment variables and files
//!
//! ## Architecture
//! - Implements traits defined in `loadquote-core`
//! - Depends on `loadquote-domain` and `loadquote-core`
//! - Contains all "impure" code (I/O, database access)

pub mod config;
pub mod content;
pub mod database;
pub mod errors;
pub mod rates;

pub use config::AppConfig;
pub use content::TemplateContentEnhancer;
pub use database::DbManager;
pub use errors::InfraError;
pub use rates::fuel::StaticFuelRateSource;
pub use rates::toll::{BusinessTollOverride, TableTollCalculator};
