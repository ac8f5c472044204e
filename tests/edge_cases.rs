//! Edge case and boundary condition tests for the mecanum control core

use mecanum_drive::{
    config::{Config, DriveConfig, LinkConfig},
    hal::{ConnectionLed, MockActuator, MockPin, MockSink, MockTransport, SinkEvent},
    traits::StatusSink,
    CommandRouter, Dispatch, DriveEngine, EncoderCounterBank, FrameOutcome, LinkEvent,
    LinkSession, Maneuver, MecanumRobot, StatusScreen, UnknownReason, Wheel, WheelSet,
    FIRMWARE_VERSION,
};

fn router(bank: &EncoderCounterBank) -> CommandRouter<'_, MockActuator, MockSink> {
    CommandRouter::new(DriveEngine::new(MockActuator::new()), bank, MockSink::new())
}

// ============================================================================
// Boundary Value Tests
// ============================================================================

#[test]
fn speed_zero_while_moving_commits_zero_frame() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);
    r.dispatch("forward");

    let result = r.dispatch("speed:0");

    assert_eq!(
        result,
        Dispatch::SpeedSet {
            percent: 0,
            reapplied: Some(Maneuver::Forward)
        }
    );
    assert_eq!(r.engine().frame(), WheelSet::splat(0));
    assert!(!r.engine().is_running());
    assert_eq!(r.engine().current_maneuver(), Maneuver::Forward);
}

#[test]
fn speed_prefix_only_matches_at_start() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);

    assert!(!r.dispatch("myspeed:50").accepted());
    assert!(!r.dispatch("speed50").accepted());
    assert!(!r.dispatch("sp€ed:50").accepted());
    assert_eq!(r.engine().speed_percent(), 50);
}

#[test]
fn speed_value_may_carry_inner_whitespace() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);

    assert_eq!(
        r.dispatch("speed:  30 "),
        Dispatch::SpeedSet {
            percent: 30,
            reapplied: None
        }
    );
}

#[test]
fn channel_and_bank_share_one_counter() {
    let bank = EncoderCounterBank::new();
    let channel = bank.channel(Wheel::RearLeft);

    channel.edge(false);
    assert_eq!(bank.take(Wheel::RearLeft), -1);

    for _ in 0..3 {
        channel.edge(true);
    }
    assert_eq!(bank.get(Wheel::RearLeft), 3);
    assert_eq!(channel.wheel(), Wheel::RearLeft);
}

#[test]
fn default_full_scale_is_capped_for_signed_frames() {
    let engine = DriveEngine::with_max_duty(MockActuator::new(), u16::MAX);
    assert_eq!(engine.max_duty(), i16::MAX as u16);
}

// ============================================================================
// Boundary Not Ready
// ============================================================================

#[test]
fn maneuver_before_actuator_init_is_a_reported_noop() {
    let bank = EncoderCounterBank::new();
    let mut r = CommandRouter::new(
        DriveEngine::new(MockActuator::uninitialized()),
        &bank,
        MockSink::new(),
    );

    assert_eq!(
        r.dispatch("forward"),
        Dispatch::Maneuver {
            maneuver: Maneuver::Forward,
            outcome: FrameOutcome::BoundaryUnavailable
        }
    );
    assert_eq!(r.sink().motor_updates(), vec![(Maneuver::Stop, 50, false)]);
}

// ============================================================================
// Link Edge Cases
// ============================================================================

#[test]
fn empty_write_is_dropped_silently() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);
    let mut link = LinkSession::new(MockTransport::new(), LinkConfig::default());
    link.on_peer_connected(&mut r);
    r.sink_mut().clear();

    assert_eq!(link.on_bytes_received(b"", &mut r), None);
    assert!(r.sink().events.is_empty());
    assert_eq!(link.transport().sent.len(), 1);
}

#[test]
fn whitespace_only_message_is_echoed_but_ignored() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);
    let mut link = LinkSession::new(MockTransport::new(), LinkConfig::default());
    link.on_peer_connected(&mut r);

    let result = link.on_bytes_received(b"   ", &mut r);

    assert_eq!(result, Some(Dispatch::Ignored(UnknownReason::Empty)));
    assert_eq!(
        link.transport().sent_text().last().map(String::as_str),
        Some("Received:    ")
    );
}

#[test]
fn zero_settle_readvertises_on_disconnect() {
    let bank = EncoderCounterBank::new();
    let config = Config::default().with_link(LinkConfig::default().with_settle_ms(0));
    let mut robot = MecanumRobot::new(
        &config,
        MockActuator::new(),
        &bank,
        MockSink::new(),
        MockTransport::new(),
    );

    robot.handle(LinkEvent::PeerConnected, 0);
    robot.handle(LinkEvent::PeerDisconnected, 42);

    assert_eq!(robot.link().transport().advertise_count, 1);
    assert!(!robot.link().readvertise_pending());
}

#[test]
fn settle_deadline_survives_clock_wrap() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);
    let mut link = LinkSession::new(MockTransport::new(), LinkConfig::default());
    link.on_peer_connected(&mut r);

    link.on_peer_disconnected(&mut r, u64::MAX - 100);
    assert!(!link.poll(u64::MAX));
    assert!(!link.poll(398));
    assert!(link.poll(399));
}

#[test]
fn failed_sends_do_not_break_the_session() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);
    let mut transport = MockTransport::new();
    transport.fail_sends = true;
    let mut link = LinkSession::new(transport, LinkConfig::default());

    link.on_peer_connected(&mut r);
    let result = link.on_bytes_received(b"left", &mut r);

    assert_eq!(
        result,
        Some(Dispatch::Maneuver {
            maneuver: Maneuver::StrafeLeft,
            outcome: FrameOutcome::Committed
        })
    );
    assert!(link.is_connected());
}

// ============================================================================
// Status Screen
// ============================================================================

#[test]
fn long_message_wraps_and_elides() {
    let mut screen = StatusScreen::new();
    screen.message_received("abcdefghijklmnopqrstuvwxyz0123456789");

    assert_eq!(screen.row(2), "Received:");
    assert_eq!(screen.row(3), "abcdefghijklmnop");
    assert_eq!(screen.row(4), "qrstuvwxyz012...");
}

#[test]
fn exactly_two_rows_of_message_is_not_elided() {
    let mut screen = StatusScreen::new();
    screen.message_received("0123456789ABCDEF0123456789abcdef");

    assert_eq!(screen.row(3), "0123456789ABCDEF");
    assert_eq!(screen.row(4), "0123456789abcdef");
}

#[test]
fn encoder_view_shows_front_counts_in_hundreds() {
    let mut screen = StatusScreen::new();
    screen.motor_status_changed(Maneuver::Forward, 50, true);
    screen.encoder_snapshot(&WheelSet::new(1234, -560, 9, 9));
    assert_eq!(screen.row(7), "Status: RUNNING");

    assert!(screen.toggle_encoder_view());
    assert_eq!(screen.row(7), "FL:12 FR:-5");

    assert!(!screen.toggle_encoder_view());
    assert_eq!(screen.row(7), "Status: RUNNING");
}

#[test]
fn dirty_flag_reports_each_change_once() {
    let mut screen = StatusScreen::new();
    assert!(screen.take_dirty());
    assert!(!screen.take_dirty());

    screen.connection_changed(false);
    assert!(screen.take_dirty());
    assert!(!screen.take_dirty());
}

#[test]
fn router_feeds_a_real_screen() {
    let bank = EncoderCounterBank::new();
    let mut screen = StatusScreen::new();
    {
        let mut r = CommandRouter::new(DriveEngine::new(MockActuator::new()), &bank, &mut screen);
        r.dispatch("speed:80");
        r.dispatch("rotate_right");
    }

    assert_eq!(screen.row(3), "rotate_right");
    assert_eq!(screen.row(5), "Dir: ROT_RIGHT");
    assert_eq!(screen.row(6), "Speed: 80%");
    assert_eq!(screen.row(7), "Status: RUNNING");
}

#[test]
fn connection_led_follows_the_link() {
    let bank = EncoderCounterBank::new();
    let mut robot = MecanumRobot::new(
        &Config::default(),
        MockActuator::new(),
        &bank,
        ConnectionLed::new(MockSink::new(), MockPin::new()),
        MockTransport::new(),
    );

    robot.handle(LinkEvent::PeerConnected, 0);
    assert!(robot.router().sink().pin().is_high());
    robot.handle(LinkEvent::text("forward"), 1);
    assert!(robot.router().sink().pin().is_high());

    robot.handle(LinkEvent::PeerDisconnected, 2);
    let led = robot.router().sink();
    assert!(!led.pin().is_high());
    assert_eq!(led.pin().levels, vec![false, true, false]);
    assert_eq!(led.inner().messages(), vec!["forward"]);
}

// ============================================================================
// Configuration and Version
// ============================================================================

#[test]
fn default_speed_from_config_is_applied() {
    let bank = EncoderCounterBank::new();
    let config =
        Config::default().with_drive(DriveConfig::default().with_default_speed_percent(30));
    let robot = MecanumRobot::new(
        &config,
        MockActuator::new(),
        &bank,
        MockSink::new(),
        MockTransport::new(),
    );

    assert_eq!(robot.router().engine().speed_percent(), 30);
}

#[test]
fn device_name_is_configured_once_on_the_link() {
    let bank = EncoderCounterBank::new();
    let config = Config::default().with_link(LinkConfig::default().with_device_name("Bench Bot"));
    let robot = MecanumRobot::new(
        &config,
        MockActuator::new(),
        &bank,
        MockSink::new(),
        MockTransport::new(),
    );

    assert_eq!(robot.link().config().device_name.as_str(), "Bench Bot");
}

#[test]
fn greeting_is_configurable() {
    let bank = EncoderCounterBank::new();
    let mut r = router(&bank);
    let mut link =
        LinkSession::new(MockTransport::new(), LinkConfig::default().with_greeting("hi"));

    link.on_peer_connected(&mut r);

    assert_eq!(link.transport().sent_text(), vec!["hi"]);
    assert_eq!(r.sink().events[0], SinkEvent::Connection(true));
}

#[test]
fn firmware_version_reports_semver() {
    assert_eq!(FIRMWARE_VERSION.to_string(), "v1.0.0");
    assert!(FIRMWARE_VERSION.is_compatible(1, 0, 0));
    assert!(!FIRMWARE_VERSION.is_compatible(2, 0, 0));
}
