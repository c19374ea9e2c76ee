//! Static per-country fuel rates (EUR per litre).

use async_trait::async_trait;
use loadquote_core::settings::ports::FuelRateSource;
use loadquote_domain::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::is_eu_country;

const EU_DEFAULT_RATE: Decimal = dec!(1.80);
const OTHER_DEFAULT_RATE: Decimal = dec!(1.60);

/// Fuel-rate lookup backed by a compiled table, with region fallback for
/// countries that have no entry.
#[derive(Debug, Default, Clone)]
pub struct StaticFuelRateSource;

impl StaticFuelRateSource {
    pub fn new() -> Self {
        Self
    }

    fn rate_for(country_code: &str) -> Decimal {
        match country_code {
            "DE" => dec!(1.85),
            "FR" => dec!(1.82),
            "PL" => dec!(1.65),
            "NL" => dec!(1.88),
            _ if is_eu_country(country_code) => EU_DEFAULT_RATE,
            _ => OTHER_DEFAULT_RATE,
        }
    }
}

#[async_trait]
impl FuelRateSource for StaticFuelRateSource {
    async fn fuel_rate(&self, country_code: &str) -> Result<Decimal> {
        Ok(Self::rate_for(country_code))
    }
}
