//! Static rate tables standing behind the fuel and toll ports.

pub mod fuel;
pub mod toll;

pub use fuel::StaticFuelRateSource;
pub use toll::{BusinessTollOverride, TableTollCalculator};

/// EU member countries, used for region-based rate fallback.
pub(crate) const EU_COUNTRIES: [&str; 27] = [
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT",
    "LV", "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

pub(crate) fn is_eu_country(country_code: &str) -> bool {
    EU_COUNTRIES.contains(&country_code)
}
