//! Domain data types.

pub mod business;
pub mod cargo;
pub mod cost;
pub mod offer;
pub mod rates;
pub mod route;
pub mod transport;

pub use business::BusinessEntity;
pub use cargo::{Cargo, CargoStatus, CargoStatusHistoryEntry, StatusTrigger};
pub use cost::{
    CostBreakdown, CostComponent, CostSettings, CostSettingsDraft, CostSettingsUpdate,
    DriverCostBreakdown,
};
pub use offer::{Offer, OfferStatus, OfferStatusEvent};
pub use rates::{
    default_validation_schemas, validate_rate, RateType, RateValidationSchema,
};
pub use route::{
    CountrySegment, EmptyDriving, Route, RouteStatus, TimelineEvent, TimelineEventStatus,
};
pub use transport::{DriverSpecification, Transport, TruckSpecification};
