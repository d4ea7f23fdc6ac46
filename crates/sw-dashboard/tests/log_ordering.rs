//! The log table always reads newest first, whatever wrote the rows.

use chrono::{NaiveTime, TimeDelta};
use proptest::prelude::*;
use sw_core::{FixedClock, StdRandom};
use sw_dashboard::{
    Dashboard, DashboardConfig, LogRegistry, RecordingDialogs, SurfaceLayout,
};

fn stepping_clock() -> Box<FixedClock> {
    Box::new(FixedClock::stepping(
        NaiveTime::from_hms_opt(11, 59, 58).unwrap(),
        TimeDelta::seconds(1),
    ))
}

#[test]
fn ticks_and_actions_interleave_newest_first() {
    let mut config = DashboardConfig {
        seed: Some(8),
        ..DashboardConfig::default()
    };
    config.control.enabled = false;
    let mut dash = Dashboard::new(
        config,
        Box::new(StdRandom::seeded(8)),
        stepping_clock(),
        &SurfaceLayout::full(),
    )
    .unwrap();

    dash.startup(0.0);
    dash.start_cleaning(&mut RecordingDialogs::default());
    dash.update(4.0);
    dash.reset_system(&mut RecordingDialogs::answering(false));
    dash.reset_system(&mut RecordingDialogs::answering(true));

    let rows: Vec<_> = dash.log().entries().collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].message, "System reset initiated by user.");
    assert!(rows[1].message.starts_with("Metrics updated: "));
    assert_eq!(rows[2].message, "User triggered cleaning.");
    assert!(rows[3].message.starts_with("Metrics updated: "));

    let stamps: Vec<&str> = rows.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(
        stamps,
        vec!["12:00:01 PM", "12:00:00 PM", "11:59:59 AM", "11:59:58 AM"]
    );
}

proptest! {
    #[test]
    fn entries_are_reverse_insertion_order(messages in prop::collection::vec("[a-z ]{0,12}", 0..40)) {
        let mut log = LogRegistry::new(stepping_clock());
        for m in &messages {
            log.append(m.as_str());
        }
        let read: Vec<String> = log.entries().map(|e| e.message.clone()).collect();
        let expected: Vec<String> = messages.iter().rev().cloned().collect();
        prop_assert_eq!(read, expected);
    }
}
