//! Cost calculation engine behaviour: per-component math, coverage check,
//! determinism and persistence.

mod support;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use loadquote_core::CostCalculationService;
use loadquote_domain::{
    BusinessEntity, CostComponent, CostSettings, EmptyDriving, LoadQuoteError, Route,
    Transport,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use support::fixtures;
use support::repositories::{
    MockBusinessRepository, MockCostBreakdownRepository, MockCostSettingsRepository,
    MockEmptyDrivingRepository, MockRouteRepository, MockTollCalculator,
    MockTransportRepository,
};

struct World {
    business: BusinessEntity,
    transport: Transport,
    route: Route,
    service: CostCalculationService,
}

/// Wire the engine up with the default DE→PL route and the given settings.
fn world(
    countries: &[&str],
    enabled: BTreeSet<CostComponent>,
    rates: BTreeMap<String, Decimal>,
    adjust: impl FnOnce(&mut Transport, &mut Route, &mut EmptyDriving),
) -> World {
    let business = fixtures::business(countries);
    let mut transport = fixtures::transport(business.id);
    let mut empty_driving = fixtures::empty_driving();
    let mut route = fixtures::route(transport.id, business.id, empty_driving.id);
    adjust(&mut transport, &mut route, &mut empty_driving);

    let settings = CostSettings {
        id: Uuid::new_v4(),
        route_id: route.id,
        business_entity_id: business.id,
        enabled_components: enabled,
        rates,
    };

    let service = CostCalculationService::new(
        Arc::new(MockCostSettingsRepository::default().with_settings(settings)),
        Arc::new(MockCostBreakdownRepository::default()),
        Arc::new(MockEmptyDrivingRepository::default().with_record(empty_driving)),
        Arc::new(MockTollCalculator::default()),
        Arc::new(MockRouteRepository::default().with_route(route.clone())),
        Arc::new(MockTransportRepository::default().with_transport(transport.clone())),
        Arc::new(MockBusinessRepository::default().with_business(business.clone())),
    );

    World { business, transport, route, service }
}

#[tokio::test]
async fn driver_costs_split_base_regular_and_overtime() {
    // daily 200, hourly 25, overtime x1.5, 9 regular hours, 12 h route:
    // one day's base, 9 regular hours, 3 overtime hours.
    let env = world(
        &["DE", "PL"],
        BTreeSet::from([CostComponent::Driver]),
        BTreeMap::new(),
        |_, route, _| route.total_duration_hours = 12.0,
    );

    let breakdown = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap();

    assert_eq!(breakdown.driver_costs.base_cost, dec!(200.00));
    assert_eq!(breakdown.driver_costs.regular_hours_cost, dec!(225.00));
    assert_eq!(breakdown.driver_costs.overtime_cost, dec!(112.50));
    assert_eq!(breakdown.driver_costs.total_cost, dec!(537.50));
    assert_eq!(breakdown.total_cost, dec!(537.50));
}

#[tokio::test]
async fn fuel_costs_book_the_empty_leg_to_the_first_country() {
    let env = world(
        &["DE", "PL"],
        BTreeSet::from([CostComponent::Fuel]),
        BTreeMap::from([("fuel_rate".to_string(), dec!(1.8))]),
        |transport, _, _| {
            transport.truck_specs.fuel_consumption_loaded = 0.25;
            transport.truck_specs.fuel_consumption_empty = 0.125;
        },
    );

    let breakdown = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap();

    // DE: 550 km x 0.25 L/km + 200 km x 0.125 L/km empty leg, at 1.8/L.
    assert_eq!(breakdown.fuel_costs["DE"], dec!(292.50));
    // PL: 400 km x 0.25 L/km at 1.8/L; no empty-leg share.
    assert_eq!(breakdown.fuel_costs["PL"], dec!(180.00));
}

#[tokio::test]
async fn coverage_violation_names_the_missing_countries() {
    let env = world(
        &["DE"],
        BTreeSet::from([CostComponent::Fuel]),
        BTreeMap::new(),
        |_, _, _| {},
    );

    let err = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap_err();

    assert!(matches!(err, LoadQuoteError::Validation(_)));
    let message = err.to_string();
    assert!(message.contains("does not operate in countries"));
    assert!(message.contains("PL"));
    assert!(!message.contains("DE,"));
}

#[tokio::test]
async fn disabled_components_produce_zero_entries() {
    let env = world(
        &["DE", "PL"],
        BTreeSet::from([CostComponent::Driver]),
        BTreeMap::new(),
        |_, _, _| {},
    );

    let breakdown = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap();

    assert_eq!(breakdown.fuel_costs["DE"], Decimal::ZERO);
    assert_eq!(breakdown.fuel_costs["PL"], Decimal::ZERO);
    assert_eq!(breakdown.toll_costs["DE"], Decimal::ZERO);
    assert_eq!(breakdown.overhead_costs, Decimal::ZERO);
    assert!(breakdown.timeline_event_costs.values().all(|cost| *cost == Decimal::ZERO));
}

#[tokio::test]
async fn repeated_event_types_collapse_into_one_entry() {
    let env = world(
        &["DE", "PL"],
        BTreeSet::from([CostComponent::Events]),
        BTreeMap::new(),
        |_, route, _| {
            route.timeline_events =
                vec![fixtures::event("pickup", 0), fixtures::event("rest", 1),
                    fixtures::event("rest", 2), fixtures::event("delivery", 3)];
        },
    );

    let breakdown = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap();

    // Two rest events, one "rest" cost entry at the default rate.
    assert_eq!(breakdown.timeline_event_costs.len(), 3);
    assert_eq!(breakdown.timeline_event_costs["rest"], dec!(30.00));
    assert_eq!(breakdown.timeline_event_costs["pickup"], dec!(50.00));
    assert_eq!(breakdown.timeline_event_costs["delivery"], dec!(50.00));
}

#[tokio::test]
async fn total_cost_equals_the_component_sum() {
    let env = world(
        &["DE", "PL"],
        CostComponent::ALL.into_iter().collect(),
        BTreeMap::from([("fuel_rate".to_string(), dec!(1.8))]),
        |_, _, _| {},
    );

    let breakdown = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap();

    assert_eq!(breakdown.total_cost, breakdown.component_sum());
    assert!(breakdown.total_cost > Decimal::ZERO);
}

#[tokio::test]
async fn calculation_is_deterministic() {
    let env = world(
        &["DE", "PL"],
        CostComponent::ALL.into_iter().collect(),
        BTreeMap::from([("fuel_rate".to_string(), dec!(1.8))]),
        |_, _, _| {},
    );

    let first = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap();
    let second = env
        .service
        .calculate_costs(&env.route, &env.transport, &env.business)
        .await
        .unwrap();

    assert_eq!(first.total_cost, second.total_cost);
    assert_eq!(first.fuel_costs, second.fuel_costs);
    assert_eq!(first.toll_costs, second.toll_costs);
}

#[tokio::test]
async fn calculate_and_save_resolves_references_and_overwrites() {
    let env = world(
        &["DE", "PL"],
        CostComponent::ALL.into_iter().collect(),
        BTreeMap::from([("fuel_rate".to_string(), dec!(1.8))]),
        |_, _, _| {},
    );

    let first = env.service.calculate_and_save_costs(env.route.id).await.unwrap();
    let second = env.service.calculate_and_save_costs(env.route.id).await.unwrap();

    // Only the latest breakdown is retrievable.
    let stored = env.service.get_cost_breakdown(env.route.id).await.unwrap();
    assert_eq!(stored.id, second.id);
    assert_ne!(first.id, second.id);
    assert_eq!(stored.total_cost, first.total_cost);
}

#[tokio::test]
async fn missing_settings_fail_with_not_found() {
    let business = fixtures::business(&["DE", "PL"]);
    let transport = fixtures::transport(business.id);
    let empty_driving = fixtures::empty_driving();
    let route = fixtures::route(transport.id, business.id, empty_driving.id);

    let service = CostCalculationService::new(
        Arc::new(MockCostSettingsRepository::default()),
        Arc::new(MockCostBreakdownRepository::default()),
        Arc::new(MockEmptyDrivingRepository::default().with_record(empty_driving)),
        Arc::new(MockTollCalculator::default()),
        Arc::new(MockRouteRepository::default().with_route(route.clone())),
        Arc::new(MockTransportRepository::default().with_transport(transport.clone())),
        Arc::new(MockBusinessRepository::default().with_business(business.clone())),
    );

    let err = service.calculate_costs(&route, &transport, &business).await.unwrap_err();
    assert!(matches!(err, LoadQuoteError::NotFound(_)));
}
