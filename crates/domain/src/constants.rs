//! Domain constants: default rates and physical profiles.
//!
//! These are immutable static configuration, injected where services need
//! them rather than mutated at runtime.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fallback fuel rate (EUR/L) when cost settings carry no `fuel_rate`.
pub const DEFAULT_FUEL_RATE: Decimal = dec!(1.5);

/// Default toll multiplier applied when settings do not override it.
pub const DEFAULT_TOLL_RATE_MULTIPLIER: Decimal = dec!(1.0);

/// Default flat event rate (EUR/event) for the `events` component.
pub const DEFAULT_EVENT_RATE: Decimal = dec!(50.00);

/// Default rates per timeline event type (EUR/event).
pub const DEFAULT_EVENT_RATES: &[(&str, Decimal)] = &[
    ("pickup", dec!(50.00)),
    ("delivery", dec!(50.00)),
    ("rest", dec!(30.00)),
];

/// Flat rate used for event types outside the default table.
pub const DEFAULT_OTHER_EVENT_RATE: Decimal = dec!(50.00);

/// Look up the default rate for a timeline event type.
pub fn default_event_rate(event_type: &str) -> Decimal {
    DEFAULT_EVENT_RATES
        .iter()
        .find(|(ty, _)| *ty == event_type)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_OTHER_EVENT_RATE)
}

/// Default empty-driving profile (distance in km, duration in hours).
pub const DEFAULT_EMPTY_DRIVING_KM: f64 = 200.0;
pub const DEFAULT_EMPTY_DRIVING_HOURS: f64 = 4.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_events_are_cheaper_than_handling_events() {
        assert_eq!(default_event_rate("pickup"), dec!(50.00));
        assert_eq!(default_event_rate("delivery"), dec!(50.00));
        assert_eq!(default_event_rate("rest"), dec!(30.00));
    }

    #[test]
    fn unknown_event_types_fall_back_to_the_flat_rate() {
        assert_eq!(default_event_rate("customs"), DEFAULT_OTHER_EVENT_RATE);
    }
}
