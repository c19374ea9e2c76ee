//! # LoadQuote Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The rate catalog and rate validation
//! - Cost settings management and the cost calculation engine
//! - Offer lifecycle (pricing, enhancement, status audit)
//! - The offer finalization saga with compensating rollback
//! - Status transition tables shared by the saga and manual updates
//!
//! ## Architecture Principles
//! - Only depends on `loadquote-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod cargo;
pub mod costing;
pub mod offers;
pub mod rates;
pub mod settings;
pub mod status;

// Re-export specific items to avoid ambiguity
pub use cargo::ports::CargoRepository;
pub use cargo::{CargoDraft, CargoPage, CargoService, CargoUpdate};
pub use costing::ports::{
    BusinessRepository, CostBreakdownRepository, EmptyDrivingRepository, RouteRepository,
    TollCalculator, TollOverrides, TransportRepository, TruckTollSpecs,
};
pub use costing::CostCalculationService;
pub use offers::ports::{ContentEnhancer, EnhancedContent, OfferRepository};
pub use offers::OfferService;
pub use rates::ports::RateScheduleRepository;
pub use rates::{RateCatalog, RateValidationReport};
pub use settings::ports::{CostSettingsRepository, FuelRateSource};
pub use settings::CostSettingsService;
