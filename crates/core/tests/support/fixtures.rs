//! Entity fixtures for the behaviour tests.
//!
//! The default route runs DE then PL: 550 km / 9 h in Germany followed by
//! 400 km / 6 h in Poland, with pickup, rest and delivery events.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};
use loadquote_domain::{
    BusinessEntity, Cargo, CargoStatus, CostBreakdown, CountrySegment, DriverCostBreakdown,
    EmptyDriving, Offer, OfferStatus, Route, RouteStatus, TimelineEvent, TimelineEventStatus,
    Transport, TruckSpecification,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

pub fn business(countries: &[&str]) -> BusinessEntity {
    BusinessEntity {
        id: Uuid::new_v4(),
        name: "Baltic Freight GmbH".to_string(),
        certifications: vec!["ISO9001".to_string()],
        operating_countries: countries.iter().map(|c| c.to_string()).collect::<BTreeSet<_>>(),
        cost_overheads: BTreeMap::from([
            ("admin".to_string(), dec!(100.00)),
            ("insurance".to_string(), dec!(250.00)),
        ]),
        is_active: true,
    }
}

pub fn transport(business_entity_id: Uuid) -> Transport {
    Transport {
        id: Uuid::new_v4(),
        transport_type_id: "flatbed_40t".to_string(),
        business_entity_id,
        truck_specs: TruckSpecification {
            fuel_consumption_empty: 0.22,
            fuel_consumption_loaded: 0.29,
            toll_class: "4".to_string(),
            euro_class: "EURO6".to_string(),
            co2_class: "3".to_string(),
            maintenance_rate_per_km: dec!(0.15),
        },
        driver_specs: loadquote_domain::DriverSpecification {
            daily_rate: dec!(200.00),
            driving_time_rate: dec!(25.00),
            overtime_rate_multiplier: dec!(1.5),
            max_driving_hours: 9,
            required_license_type: "CE".to_string(),
            required_certifications: vec!["ADR".to_string()],
        },
        is_active: true,
    }
}

pub fn empty_driving() -> EmptyDriving {
    EmptyDriving { id: Uuid::new_v4(), distance_km: 200.0, duration_hours: 4.0 }
}

pub fn segment(country: &str, distance_km: f64, duration_hours: f64, order: u32) -> CountrySegment {
    CountrySegment {
        country_code: country.to_string(),
        distance_km,
        duration_hours,
        segment_order: order,
    }
}

pub fn event(event_type: &str, order: u32) -> TimelineEvent {
    TimelineEvent {
        id: Uuid::new_v4(),
        event_type: event_type.to_string(),
        planned_time: Utc.with_ymd_and_hms(2026, 3, 10, 6 + order, 0, 0).unwrap(),
        duration_hours: 1.0,
        event_order: order,
        status: TimelineEventStatus::Pending,
        actual_time: None,
    }
}

/// A draft DE→PL route bound to the given transport and business.
pub fn route(transport_id: Uuid, business_entity_id: Uuid, empty_driving_id: Uuid) -> Route {
    Route {
        id: Uuid::new_v4(),
        transport_id,
        business_entity_id,
        cargo_id: None,
        empty_driving_id,
        timeline_events: vec![event("pickup", 0), event("rest", 1), event("delivery", 2)],
        country_segments: vec![segment("DE", 550.0, 9.0, 0), segment("PL", 400.0, 6.0, 1)],
        total_distance_km: 950.0,
        total_duration_hours: 15.0,
        is_feasible: true,
        status: RouteStatus::Draft,
    }
}

pub fn cargo(business_entity_id: Option<Uuid>) -> Cargo {
    let now = Utc::now();
    Cargo {
        id: Uuid::new_v4(),
        business_entity_id,
        weight: 18_500.0,
        volume: 82.0,
        cargo_type: "steel_coils".to_string(),
        value: dec!(45000.00),
        special_requirements: vec![],
        status: CargoStatus::Pending,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn breakdown(route_id: Uuid, total_cost: Decimal) -> CostBreakdown {
    CostBreakdown {
        id: Uuid::new_v4(),
        route_id,
        fuel_costs: BTreeMap::new(),
        toll_costs: BTreeMap::new(),
        driver_costs: DriverCostBreakdown::zero(),
        overhead_costs: Decimal::ZERO,
        timeline_event_costs: BTreeMap::new(),
        total_cost,
    }
}

pub fn draft_offer(route_id: Uuid, cost_breakdown_id: Uuid) -> Offer {
    Offer {
        id: Uuid::new_v4(),
        route_id,
        cost_breakdown_id,
        margin_percentage: dec!(15),
        final_price: dec!(1150.00),
        ai_content: None,
        fun_fact: None,
        status: OfferStatus::Draft,
        created_at: Utc::now(),
        finalized_at: None,
    }
}
