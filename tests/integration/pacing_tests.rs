//! Pacing between cycles: busy delay vs. low-power light sleep.

use soilwatch::config::{CycleConfig, PlantConfig, RunMode, SleepStrategy};
use soilwatch::display::DisplayOrchestrator;
use soilwatch::power::{LowPowerSleep, Pacer, Pacing};
use soilwatch::scheduler::CycleScheduler;
use soilwatch::sensors::SensorGateway;

use crate::mock_hw::*;

fn low_power_config() -> CycleConfig {
    let mut c = CycleConfig::new(&[PlantConfig::new("Atlas", Some(0)).unwrap()], 60_000).unwrap();
    c.run_mode = RunMode::Calibrate;
    c.sleep_strategy = SleepStrategy::LowPowerSleep;
    c.wake_settle_ms = 250;
    c
}

#[test]
fn low_power_sleep_suspends_sleeps_resumes_and_settles() {
    let journal = Journal::default();
    let mut pacer = LowPowerSleep::new(MockPower::new(&journal), MockDelay::new(&journal), 250);

    pacer.pause(60_000);

    assert_eq!(
        journal.calls(),
        vec![
            Call::Suspend,
            Call::Sleep(60_000),
            Call::Resume,
            Call::Wait(250),
        ]
    );
}

#[test]
fn rejected_sleep_falls_back_to_blocking_wait() {
    let journal = Journal::default();
    let mut power = MockPower::new(&journal);
    power.reject_sleep = true;
    let mut pacer = LowPowerSleep::new(power, MockDelay::new(&journal), 250);

    pacer.pause(60_000);

    assert_eq!(
        journal.calls(),
        vec![
            Call::Suspend,
            Call::Sleep(60_000),
            Call::Wait(60_000),
            Call::Resume,
            Call::Wait(250),
        ]
    );
}

#[test]
fn busy_delay_never_touches_board_power() {
    let journal = Journal::default();
    let mut pacer = Pacing::new(
        SleepStrategy::BusyDelay,
        MockPower::new(&journal),
        MockDelay::new(&journal),
        250,
    );

    pacer.pause(5_000);

    assert_eq!(pacer.strategy(), SleepStrategy::BusyDelay);
    assert_eq!(journal.calls(), vec![Call::Wait(5_000)]);
}

#[test]
fn next_cycle_samples_only_after_waking() {
    let journal = Journal::default();
    let config = low_power_config();
    let display = DisplayOrchestrator::new(
        &config,
        MockPanel::new(&journal),
        MockConsole::new(&journal),
        MockDelay::new(&journal),
    )
    .unwrap();
    let pacing = Pacing::from_config(&config, MockPower::new(&journal), MockDelay::new(&journal));
    let sensors = MockSensors::new(&journal).with_raw(0, 700);
    let mut s = CycleScheduler::new(config, SensorGateway::new(sensors), display, pacing).unwrap();
    let mut sink = RecordingSink::new();

    s.step(&mut sink);
    s.step(&mut sink);

    let calls = journal.calls();
    let resume = calls.iter().position(|c| *c == Call::Resume).unwrap();
    let second_sample = calls.iter().rposition(|c| *c == Call::Sample(0)).unwrap();
    assert!(resume < second_sample);
    assert_eq!(calls[resume + 1], Call::Wait(250));
}
