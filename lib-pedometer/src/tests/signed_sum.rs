use core::time::Duration;
use super::*;

/// Resting at 1 g followed by one sharp dip every half second.
fn dips(depth: f64, count: usize) -> Vec<f64> {
    let mut sums = vec![1.0; 100];
    for _ in 0..count {
        sums.push(depth);
        sums.extend([1.0; 49]);
    }
    sums
}

fn signed_detection() -> StepDetection {
    StepDetection::new(StepConfig::signed_sum()).unwrap()
}

#[test]
fn counts_dips_below_baseline() {
    let mut detection = signed_detection();
    let events = feed(&mut detection, 0, &dips(-1.0, 10));

    assert_eq!(events.len(), 10);
    assert_eq!(events[0].timestamp, at(100));
    assert_eq!(events[9].timestamp, at(550));
    assert_eq!(detection.steps(), 10);
    assert_eq!(detection.bpm(), 120);

    // 0.5 s * 0.3 damping
    assert_eq!(detection.wait_interval(), Duration::from_millis(150));
    assert!(detection.threshold() < -1.2);
}

#[test]
fn shallow_dips_and_upward_spikes_are_ignored() {
    let mut detection = signed_detection();
    assert!(feed(&mut detection, 0, &dips(0.0, 10)).is_empty());
    assert!((detection.threshold() - -1.2).abs() < 1e-12);

    let mut detection = signed_detection();
    assert!(feed(&mut detection, 0, &dips(3.0, 10)).is_empty());
    assert_eq!(detection.steps(), 0);
}

#[test]
fn threshold_tightens_and_relaxes() {
    let mut detection = signed_detection();
    feed(&mut detection, 0, &[1.0; 100]);
    assert_eq!(detection.min_peak(), -1.5);
    assert!((detection.threshold() - -1.2).abs() < 1e-12);

    // The dip itself is compared against the old threshold, it only moves the threshold once
    // it is part of the history.
    let events = feed(&mut detection, 100, &[-2.0]);
    assert_eq!(events.len(), 1);
    assert!((detection.threshold() - -1.2).abs() < 1e-12);

    feed(&mut detection, 101, &[1.0]);
    assert!(detection.min_peak() < -2.9);
    assert!(detection.threshold() < -2.3);

    // Once the dip leaves the peak window the floor takes over again.
    feed(&mut detection, 102, &[1.0; 60]);
    assert_eq!(detection.min_peak(), -1.5);
    assert!((detection.threshold() - -1.2).abs() < 1e-12);
}

#[test]
fn refractory_period_swallows_close_dips() {
    let mut detection = signed_detection();

    let mut sums = vec![1.0; 200];
    // A dip spanning several samples, a second one 0.2 s later and a third 0.4 s later.
    for sum in &mut sums[100..105] {
        *sum = -1.0;
    }
    sums[120] = -1.0;
    sums[140] = -1.0;

    let events = feed(&mut detection, 0, &sums);
    assert_eq!(
        events,
        vec![
            StepEvent { index: 1, timestamp: at(100), inter_arrival: None },
            StepEvent { index: 2, timestamp: at(140), inter_arrival: Some(Duration::from_millis(400)) },
        ]
    );
    assert_eq!(detection.bpm(), 150);
    assert_eq!(detection.wait_interval(), Duration::from_millis(120));
}

#[test]
fn tracks_walking_cadence() {
    let mut detection = signed_detection();
    let events = detection.process_batch(&walking_stream(10, 7));

    assert!((18..=22).contains(&events.len()), "{} steps", events.len());
    assert!((110..=130).contains(&detection.bpm()), "{} bpm", detection.bpm());
}
