//! Poll interval selection
//!
//! Maps the current pagination state to the delay before the next request.
//! Only `OData` sources consult the link kind: next-link pagination is
//! usually a burst of pages worth draining quickly, while a delta link marks
//! an already-caught-up stream that can be polled sparsely. Every other kind
//! always uses the standard interval.

use std::time::Duration;

use tidemark_connector::config::IntervalConfig;
use tidemark_connector::state::PaginationState;
use tidemark_connector::types::{LinkKind, PaginationKind};

/// Selects the poll delay for a source from its pagination state.
///
/// Pure: the external scheduler owns all timing; this type only computes the
/// delay. Absent link-specific configuration falls back to the standard
/// interval, never to zero.
#[derive(Debug, Clone)]
pub struct PollIntervalSelector {
    intervals: IntervalConfig,
}

impl PollIntervalSelector {
    /// Create a selector from interval configuration.
    pub fn new(intervals: IntervalConfig) -> Self {
        Self { intervals }
    }

    /// The interval configuration this selector consults.
    pub fn intervals(&self) -> &IntervalConfig {
        &self.intervals
    }

    /// Compute the delay before the next poll for the given state.
    pub fn select(&self, state: &PaginationState) -> Duration {
        if state.kind != PaginationKind::OData {
            return self.intervals.standard_interval();
        }

        match state.link_kind {
            LinkKind::NextLink => self.intervals.next_link_interval(),
            LinkKind::DeltaLink => self.intervals.delta_link_interval(),
            LinkKind::Unknown => self.intervals.standard_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> PollIntervalSelector {
        PollIntervalSelector::new(
            IntervalConfig::new()
                .with_standard_interval_ms(60_000)
                .with_next_link_interval_ms(5_000)
                .with_delta_link_interval_ms(300_000),
        )
    }

    fn odata_state(link_kind: LinkKind) -> PaginationState {
        PaginationState {
            offset_value: Some("token".to_string()),
            kind: PaginationKind::OData,
            link_kind,
            has_more: true,
        }
    }

    #[test]
    fn test_odata_link_kind_selects_interval() {
        let selector = selector();
        assert_eq!(
            selector.select(&odata_state(LinkKind::NextLink)),
            Duration::from_millis(5_000)
        );
        assert_eq!(
            selector.select(&odata_state(LinkKind::DeltaLink)),
            Duration::from_millis(300_000)
        );
        assert_eq!(
            selector.select(&odata_state(LinkKind::Unknown)),
            Duration::from_millis(60_000)
        );
    }

    #[test]
    fn test_non_odata_kinds_ignore_link_intervals() {
        let selector = selector();
        for kind in PaginationKind::all() {
            if *kind == PaginationKind::OData {
                continue;
            }
            let state = PaginationState {
                offset_value: Some("x".to_string()),
                kind: *kind,
                // Even a (wrongly) populated link kind is ignored.
                link_kind: LinkKind::DeltaLink,
                has_more: true,
            };
            assert_eq!(selector.select(&state), Duration::from_millis(60_000));
        }
    }

    #[test]
    fn test_absent_link_intervals_fall_back_to_standard() {
        let selector =
            PollIntervalSelector::new(IntervalConfig::new().with_standard_interval_ms(60_000));

        assert_eq!(
            selector.select(&odata_state(LinkKind::NextLink)),
            Duration::from_millis(60_000)
        );
        assert_eq!(
            selector.select(&odata_state(LinkKind::DeltaLink)),
            Duration::from_millis(60_000)
        );
    }
}
