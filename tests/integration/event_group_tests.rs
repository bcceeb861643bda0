//! Button classifier → event group → coordinator, end to end on the host.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use battpwr::app::coordinator::PowerCoordinator;
use battpwr::app::ports::Rail;
use battpwr::config::PowerConfig;
use battpwr::drivers::button::ButtonDriver;
use battpwr::events::{ButtonEvent, ButtonEventGroup, BUTTON_BITS};
use battpwr::fsm::PowerArmState;

use crate::mock_hw::{Call, MockHardware, RecordingSink};

/// Fast timing so the coordinator's bounded waits stay short.
fn fast_config() -> PowerConfig {
    PowerConfig {
        event_wait_timeout_ms: 50,
        ..PowerConfig::default()
    }
}

/// Classifier that has seen the start-up release (released for t = 0..=50).
fn settled_driver() -> ButtonDriver {
    let mut driver = ButtonDriver::new(&PowerConfig::default());
    for t in (0..=50).step_by(10) {
        assert_eq!(driver.tick(t, false), None);
    }
    assert!(driver.is_ready());
    driver
}

/// Feed a press of `hold_ms` followed by a release through the
/// classifier, posting whatever it emits.
fn press(group: &ButtonEventGroup, driver: &mut ButtonDriver, start: u32, hold_ms: u32) -> u32 {
    let mut t = start;
    while t <= start + hold_ms {
        if let Some(e) = driver.tick(t, true) {
            group.post(e);
        }
        t += 10;
    }
    let release_end = t + 100;
    while t <= release_end {
        if let Some(e) = driver.tick(t, false) {
            group.post(e);
        }
        t += 10;
    }
    t
}

#[test]
fn long_press_posts_both_bits_and_long_press_wins() {
    let group = ButtonEventGroup::new();
    let mut driver = settled_driver();
    press(&group, &mut driver, 100, 2000);

    assert_eq!(group.peek(), BUTTON_BITS);

    let mut c = PowerCoordinator::new(&fast_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut source = &group;

    assert_eq!(c.poll(&mut source, &mut hw, &mut sink), PowerArmState::Disarmed);
    // The release observed alongside was consumed with the long press.
    assert_eq!(group.peek(), 0);
    assert_eq!(c.poll(&mut source, &mut hw, &mut sink), PowerArmState::Disarmed);
    assert_eq!(hw.count(&Call::RailOff(Rail::Vbat)), 1);
}

#[test]
fn short_press_never_powers_down() {
    let group = ButtonEventGroup::new();
    let mut driver = settled_driver();
    press(&group, &mut driver, 100, 300);

    let mut c = PowerCoordinator::new(&fast_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    c.poll(&mut &group, &mut hw, &mut sink);
    assert_eq!(c.state(), PowerArmState::Armed);
    assert!(hw.calls.is_empty());
}

#[test]
fn release_after_observed_long_press_rearms() {
    let group = ButtonEventGroup::new();
    let mut driver = settled_driver();
    let mut c = PowerCoordinator::new(&fast_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    // Hold past the threshold; the coordinator sees the long press while
    // the button is still down.
    let mut t = 100;
    while t <= 1700 {
        if let Some(e) = driver.tick(t, true) {
            group.post(e);
        }
        t += 10;
    }
    c.poll(&mut &group, &mut hw, &mut sink);
    assert_eq!(c.state(), PowerArmState::Disarmed);

    // Power stayed up (e.g. on USB); the release now re-arms.
    for step in 0..10 {
        if let Some(e) = driver.tick(t + step * 10, false) {
            group.post(e);
        }
    }
    c.poll(&mut &group, &mut hw, &mut sink);
    assert_eq!(c.state(), PowerArmState::Armed);
}

#[test]
fn power_on_hold_is_not_a_power_off_gesture() {
    let group = ButtonEventGroup::new();
    let mut driver = ButtonDriver::new(&PowerConfig::default());
    let mut c = PowerCoordinator::new(&fast_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.bring_up(&mut hw, &mut sink);
    c.start(&mut hw, &mut sink);

    // The button that switched the board on is still down when sampling
    // starts, and stays down past the long-press threshold.
    let mut t = 0;
    while t <= 1600 {
        if let Some(e) = driver.tick(t, true) {
            group.post(e);
        }
        t += 10;
    }
    assert_eq!(group.peek(), 0);

    assert_eq!(c.poll(&mut &group, &mut hw, &mut sink), PowerArmState::Armed);
    assert_eq!(hw.count(&Call::RailOff(Rail::Vbat)), 0);

    // Letting go arms the classifier; the next long press powers down.
    press(&group, &mut driver, t, 0);
    assert_eq!(group.peek(), 0);
    press(&group, &mut driver, t + 200, 1600);
    assert_eq!(c.poll(&mut &group, &mut hw, &mut sink), PowerArmState::Disarmed);
    assert_eq!(hw.count(&Call::RailOff(Rail::Vbat)), 1);
}

#[test]
fn coordinator_thread_wakes_on_producer_post() {
    let group = Arc::new(ButtonEventGroup::new());
    let producer = Arc::clone(&group);

    let consumer = thread::spawn({
        let group = Arc::clone(&group);
        move || {
            let mut c = PowerCoordinator::new(&PowerConfig::default());
            let mut hw = MockHardware::new();
            let mut sink = RecordingSink::new();
            let state = c.poll(&mut &*group, &mut hw, &mut sink);
            (state, hw.calls)
        }
    });

    thread::sleep(Duration::from_millis(20));
    producer.post(ButtonEvent::LongPress);

    let (state, calls) = consumer.join().unwrap();
    assert_eq!(state, PowerArmState::Disarmed);
    assert_eq!(calls.last(), Some(&Call::RailOff(Rail::Vbat)));
}
