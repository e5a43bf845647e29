use crate::properties::strategies::{balance_history_strategy, balance_strategy};

use balance_monitor::services::balance::{classify, BaselineTracker, TrackerState};
use proptest::{prelude::*, test_runner::Config};

const ADDRESS: &str = "0x0000000000000000000000000000000000000001";
const MAX_HISTORY: usize = 50;

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_first_observation_never_reports_a_prior(balance in balance_strategy()) {
		let mut tracker = BaselineTracker::new(ADDRESS);

		prop_assert_eq!(tracker.observe(balance), None);
		prop_assert_eq!(tracker.state(), TrackerState::BaselineSet);
		prop_assert_eq!(tracker.baseline(), Some(balance));
	}

	#[test]
	fn test_baseline_tracks_latest_observation(history in balance_history_strategy(MAX_HISTORY)) {
		let mut tracker = BaselineTracker::new(ADDRESS);

		for balance in &history {
			tracker.observe(*balance);
			prop_assert_eq!(tracker.baseline(), Some(*balance));
		}
		prop_assert_eq!(tracker.baseline(), history.last().copied());
	}

	#[test]
	fn test_reported_changes_match_consecutive_pairs(
		baseline in balance_strategy(),
		history in balance_history_strategy(MAX_HISTORY)
	) {
		let mut tracker = BaselineTracker::new(ADDRESS);
		tracker.observe(baseline);

		let mut previous = baseline;
		for (index, balance) in history.iter().enumerate() {
			let prior = tracker.observe(*balance);

			// The first live value after the baseline replaces it silently
			if index == 0 {
				prop_assert_eq!(prior, None);
			} else {
				prop_assert_eq!(prior, Some(previous));
				prop_assert_eq!(
					prior.and_then(|prior| classify(prior, *balance)),
					classify(previous, *balance)
				);
			}
			previous = *balance;
		}
	}
}
