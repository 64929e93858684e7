//! End-to-end cycle tests: sample → classify → render → report → pace,
//! driven through `CycleScheduler` with every port mocked.

use soilwatch::app::events::AppEvent;
use soilwatch::config::{CycleConfig, PlantConfig, RunMode, SleepStrategy};
use soilwatch::display::DisplayOrchestrator;
use soilwatch::error::{DisplayError, SensorError};
use soilwatch::power::Pacing;
use soilwatch::scheduler::CycleScheduler;
use soilwatch::sensors::SensorGateway;

use crate::mock_hw::*;

type TestScheduler = CycleScheduler<
    MockSensors,
    MockPanel,
    MockConsole,
    MockDelay,
    Pacing<MockPower, MockDelay>,
>;

// ── Helpers ───────────────────────────────────────────────────

fn plant(name: &str, channel: Option<u8>) -> PlantConfig {
    PlantConfig::new(name, channel).unwrap()
}

fn config(mode: RunMode) -> CycleConfig {
    let mut c = CycleConfig::new(
        &[
            plant("Shorkle", None),
            plant("Atlas", Some(1)),
            plant("<SUBJECT X>", Some(0)),
        ],
        900_000,
    )
    .unwrap();
    c.run_mode = mode;
    c
}

fn build(
    journal: &Journal,
    config: CycleConfig,
    sensors: MockSensors,
    panel: MockPanel,
) -> TestScheduler {
    let display =
        DisplayOrchestrator::new(&config, panel, MockConsole::new(journal), MockDelay::new(journal))
            .unwrap();
    let pacing = Pacing::from_config(&config, MockPower::new(journal), MockDelay::new(journal));
    CycleScheduler::new(config, SensorGateway::new(sensors), display, pacing).unwrap()
}

fn sensors(journal: &Journal) -> MockSensors {
    MockSensors::new(journal).with_raw(0, 275).with_raw(1, 1023)
}

// ── Full render ───────────────────────────────────────────────

#[test]
fn full_cycle_powers_waits_paints_waits_and_powers_down() {
    let journal = Journal::default();
    let mut s = build(
        &journal,
        config(RunMode::Full),
        sensors(&journal),
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();

    let report = s.run_cycle(&mut sink);

    assert_eq!(report.render, Ok(()));
    assert_eq!(
        journal.calls(),
        vec![
            Call::Sample(1),
            Call::Sample(0),
            Call::SampleEnvironment,
            Call::PowerUp,
            Call::Wait(1000),
            Call::Paint { cycle: 1, rows: 3 },
            Call::Wait(1000),
            Call::PowerDown,
        ]
    );
    assert!(!s.display().panel().powered);
}

#[test]
fn every_sample_precedes_any_panel_activity() {
    let journal = Journal::default();
    let mut s = build(
        &journal,
        config(RunMode::Full),
        sensors(&journal),
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();
    s.run_cycle(&mut sink);

    let first_panel = journal.position(&Call::PowerUp).unwrap();
    let last_sample = journal.position(&Call::SampleEnvironment).unwrap();
    assert!(last_sample < first_panel);
}

#[test]
fn saturated_and_dry_probes_classify_end_to_end() {
    let journal = Journal::default();
    let mut s = build(
        &journal,
        config(RunMode::Calibrate),
        sensors(&journal),
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();

    let report = s.run_cycle(&mut sink);

    assert_eq!(report.measured, 2);
    assert_eq!(report.unavailable, 1);
    assert_eq!(report.thirsty, 1);
    assert_eq!(
        journal.lines(),
        vec![
            "--- cycle 1 ---".to_string(),
            "Shorkle: unavailable (not connected)".to_string(),
            "Atlas: raw=1023 moisture=0.0% NEEDS WATER".to_string(),
            "<SUBJECT X>: raw=275 moisture=100.0% OK".to_string(),
            "environment: 21.5C 40.0%RH".to_string(),
        ]
    );
}

// ── Calibrate render ──────────────────────────────────────────

#[test]
fn calibrate_mode_never_touches_the_panel() {
    let journal = Journal::default();
    let mut s = build(
        &journal,
        config(RunMode::Calibrate),
        sensors(&journal),
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();

    for _ in 0..3 {
        s.run_cycle(&mut sink);
    }

    assert!(journal.panel_calls().is_empty());
    assert!(!journal.calls().iter().any(|c| matches!(c, Call::Wait(_))));
    assert_eq!(journal.lines().len(), 3 * 5);
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn one_faulty_probe_does_not_stop_the_cycle() {
    let journal = Journal::default();
    let sensors = MockSensors::new(&journal)
        .with_fault(1, SensorError::Timeout)
        .with_raw(0, 600);
    let mut s = build(
        &journal,
        config(RunMode::Full),
        sensors,
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();

    let report = s.run_cycle(&mut sink);

    assert_eq!(report.measured, 1);
    assert_eq!(report.unavailable, 2);
    assert_eq!(report.render, Ok(()));
    assert!(journal.calls().contains(&Call::Paint { cycle: 1, rows: 3 }));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::PlantUnavailable { .. })),
        2
    );
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::PlantUnavailable {
            error: SensorError::Timeout,
            ..
        }
    )));
}

#[test]
fn missing_environment_reading_is_reported_and_rendered() {
    let journal = Journal::default();
    let sensors = sensors(&journal).with_environment(Err(SensorError::Checksum));
    let mut s = build(
        &journal,
        config(RunMode::Calibrate),
        sensors,
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();

    let report = s.run_cycle(&mut sink);

    assert!(!report.environment_ok);
    assert!(sink.events.contains(&AppEvent::EnvironmentUnavailable {
        cycle: 1,
        error: SensorError::Checksum,
    }));
    assert_eq!(
        journal.lines().last().map(String::as_str),
        Some("environment: unavailable (checksum mismatch)")
    );
}

// ── Display faults ────────────────────────────────────────────

#[test]
fn render_failure_is_reported_and_next_cycle_proceeds() {
    let journal = Journal::default();
    let mut panel = MockPanel::new(&journal);
    panel.reject_paint_on = vec![1];
    let mut s = build(&journal, config(RunMode::Full), sensors(&journal), panel);
    let mut sink = RecordingSink::new();

    let first = s.step(&mut sink);
    assert_eq!(first.render, Err(DisplayError::PaintRejected));
    assert!(sink.events.contains(&AppEvent::RenderFailed {
        cycle: 1,
        error: DisplayError::PaintRejected,
    }));
    // Still powered down after the rejected paint.
    assert!(!s.display().panel().powered);

    journal.clear();
    let second = s.step(&mut sink);
    assert_eq!(second.cycle, 2);
    assert_eq!(second.render, Ok(()));
    assert_eq!(
        journal.panel_calls(),
        vec![
            Call::PowerUp,
            Call::Paint { cycle: 2, rows: 3 },
            Call::PowerDown
        ]
    );
}

#[test]
fn failed_power_up_skips_paint_but_still_powers_down() {
    let journal = Journal::default();
    let mut panel = MockPanel::new(&journal);
    panel.fail_power_up = true;
    let mut s = build(&journal, config(RunMode::Full), sensors(&journal), panel);
    let mut sink = RecordingSink::new();

    let report = s.run_cycle(&mut sink);

    assert_eq!(report.render, Err(DisplayError::PowerUpFailed));
    assert_eq!(journal.panel_calls(), vec![Call::PowerUp, Call::PowerDown]);
}

// ── Reporting and pacing ──────────────────────────────────────

#[test]
fn events_follow_cycle_order() {
    let journal = Journal::default();
    let mut s = build(
        &journal,
        config(RunMode::Full),
        sensors(&journal),
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();

    s.start(&mut sink);
    s.step(&mut sink);

    assert!(matches!(
        sink.events.first(),
        Some(AppEvent::Started {
            plants: 3,
            run_mode: RunMode::Full,
            sleep_strategy: SleepStrategy::BusyDelay,
        })
    ));
    let n = sink.events.len();
    assert!(matches!(sink.events[n - 2], AppEvent::CycleCompleted(_)));
    assert_eq!(
        sink.events[n - 1],
        AppEvent::Sleeping {
            strategy: SleepStrategy::BusyDelay,
            interval_ms: 900_000,
        }
    );
    assert_eq!(journal.calls().last(), Some(&Call::Wait(900_000)));
}

#[test]
fn cycle_numbers_increase_across_steps() {
    let journal = Journal::default();
    let mut s = build(
        &journal,
        config(RunMode::Calibrate),
        sensors(&journal),
        MockPanel::new(&journal),
    );
    let mut sink = RecordingSink::new();

    let cycles: Vec<u32> = (0..4).map(|_| s.step(&mut sink).cycle).collect();
    assert_eq!(cycles, [1, 2, 3, 4]);
    assert_eq!(s.cycle_count(), 4);
}
