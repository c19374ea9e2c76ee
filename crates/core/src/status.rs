//! Status transition tables for Cargo, Route, Offer and Timeline events.
//!
//! The tables are data, shared by the finalization saga and by manual status
//! updates, so both paths enforce identical lifecycles.

use loadquote_domain::{
    CargoStatus, LoadQuoteError, OfferStatus, Result, RouteStatus, TimelineEventStatus,
};

/// Allowed cargo transitions. Delivered and cancelled are terminal.
const CARGO_TRANSITIONS: &[(CargoStatus, &[CargoStatus])] = &[
    (CargoStatus::Pending, &[CargoStatus::InTransit, CargoStatus::Cancelled]),
    (CargoStatus::InTransit, &[CargoStatus::Delivered, CargoStatus::Cancelled]),
    (CargoStatus::Delivered, &[]),
    (CargoStatus::Cancelled, &[]),
];

/// Allowed route transitions. Cancellation is reachable until completion.
const ROUTE_TRANSITIONS: &[(RouteStatus, &[RouteStatus])] = &[
    (RouteStatus::Draft, &[RouteStatus::Planned, RouteStatus::Cancelled]),
    (RouteStatus::Planned, &[RouteStatus::InProgress, RouteStatus::Cancelled]),
    (RouteStatus::InProgress, &[RouteStatus::Completed, RouteStatus::Cancelled]),
    (RouteStatus::Completed, &[]),
    (RouteStatus::Cancelled, &[]),
];

/// Allowed offer transitions. Completed and cancelled are terminal.
const OFFER_TRANSITIONS: &[(OfferStatus, &[OfferStatus])] = &[
    (OfferStatus::Draft, &[OfferStatus::Finalized, OfferStatus::Cancelled]),
    (OfferStatus::Finalized, &[OfferStatus::Completed, OfferStatus::Cancelled]),
    (OfferStatus::Completed, &[]),
    (OfferStatus::Cancelled, &[]),
];

/// Allowed timeline-event transitions.
const TIMELINE_EVENT_TRANSITIONS: &[(TimelineEventStatus, &[TimelineEventStatus])] = &[
    (
        TimelineEventStatus::Pending,
        &[
            TimelineEventStatus::InProgress,
            TimelineEventStatus::Completed,
            TimelineEventStatus::Cancelled,
        ],
    ),
    (
        TimelineEventStatus::InProgress,
        &[TimelineEventStatus::Completed, TimelineEventStatus::Cancelled],
    ),
    (TimelineEventStatus::Completed, &[]),
    (TimelineEventStatus::Cancelled, &[]),
];

fn allowed<S: Copy + PartialEq>(table: &[(S, &[S])], from: S, to: S) -> bool {
    table
        .iter()
        .find(|(state, _)| *state == from)
        .map(|(_, targets)| targets.contains(&to))
        .unwrap_or(false)
}

pub fn cargo_transition_allowed(from: CargoStatus, to: CargoStatus) -> bool {
    allowed(CARGO_TRANSITIONS, from, to)
}

pub fn route_transition_allowed(from: RouteStatus, to: RouteStatus) -> bool {
    allowed(ROUTE_TRANSITIONS, from, to)
}

pub fn offer_transition_allowed(from: OfferStatus, to: OfferStatus) -> bool {
    allowed(OFFER_TRANSITIONS, from, to)
}

pub fn timeline_event_transition_allowed(
    from: TimelineEventStatus,
    to: TimelineEventStatus,
) -> bool {
    allowed(TIMELINE_EVENT_TRANSITIONS, from, to)
}

fn invalid_transition(
    kind: &str,
    from: impl std::fmt::Display,
    to: impl std::fmt::Display,
) -> LoadQuoteError {
    LoadQuoteError::Validation(format!("Invalid {kind} status transition: {from} -> {to}"))
}

pub fn ensure_cargo_transition(from: CargoStatus, to: CargoStatus) -> Result<()> {
    if cargo_transition_allowed(from, to) {
        Ok(())
    } else {
        Err(invalid_transition("cargo", from, to))
    }
}

pub fn ensure_route_transition(from: RouteStatus, to: RouteStatus) -> Result<()> {
    if route_transition_allowed(from, to) {
        Ok(())
    } else {
        Err(invalid_transition("route", from, to))
    }
}

pub fn ensure_offer_transition(from: OfferStatus, to: OfferStatus) -> Result<()> {
    if offer_transition_allowed(from, to) {
        Ok(())
    } else {
        Err(invalid_transition("offer", from, to))
    }
}

pub fn ensure_timeline_event_transition(
    from: TimelineEventStatus,
    to: TimelineEventStatus,
) -> Result<()> {
    if timeline_event_transition_allowed(from, to) {
        Ok(())
    } else {
        Err(invalid_transition("timeline event", from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cargo_terminal_states_have_no_exits() {
        for to in CargoStatus::ALL {
            assert!(!cargo_transition_allowed(CargoStatus::Delivered, to));
            assert!(!cargo_transition_allowed(CargoStatus::Cancelled, to));
        }
    }

    #[test]
    fn route_happy_path_is_linear() {
        assert!(route_transition_allowed(RouteStatus::Draft, RouteStatus::Planned));
        assert!(route_transition_allowed(RouteStatus::Planned, RouteStatus::InProgress));
        assert!(route_transition_allowed(RouteStatus::InProgress, RouteStatus::Completed));
        assert!(!route_transition_allowed(RouteStatus::Draft, RouteStatus::InProgress));
        assert!(!route_transition_allowed(RouteStatus::Completed, RouteStatus::Cancelled));
    }

    #[test]
    fn offer_table_matches_manual_update_rules() {
        assert!(offer_transition_allowed(OfferStatus::Draft, OfferStatus::Finalized));
        assert!(offer_transition_allowed(OfferStatus::Draft, OfferStatus::Cancelled));
        assert!(offer_transition_allowed(OfferStatus::Finalized, OfferStatus::Completed));
        assert!(offer_transition_allowed(OfferStatus::Finalized, OfferStatus::Cancelled));
        for to in OfferStatus::ALL {
            assert!(!offer_transition_allowed(OfferStatus::Completed, to));
            assert!(!offer_transition_allowed(OfferStatus::Cancelled, to));
        }
    }

    #[test]
    fn ensure_helpers_name_the_transition() {
        let err = ensure_offer_transition(OfferStatus::Completed, OfferStatus::Draft).unwrap_err();
        assert!(err.to_string().contains("completed -> draft"));
    }
}
