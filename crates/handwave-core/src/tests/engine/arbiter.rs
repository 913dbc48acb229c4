use crate::{
    ActivationState, EngineConfig, Gesture, GestureActionMap, GestureEngine, HandSide, ManualClock,
    tests::support::{
        FRAME_STEP, engine_on_manual_clock, engine_with_map, fist, hand, landmarks_for, one_finger,
        open_palm, signature, step_frame, three_fingers, two_fingers,
    },
};

/// Holds OpenPalm on the given sides through a full two-second arming hold.
fn arm_sides(engine: &mut GestureEngine, clock: &ManualClock, sides: &[HandSide]) {
    let hands: Vec<_> = sides
        .iter()
        .map(|side| hand(*side, open_palm()))
        .collect();
    let requests = engine.process_frame(&hands);
    assert!(requests.is_empty());
    for _ in 0..60 {
        let requests = step_frame(engine, clock, &hands);
        assert!(requests.is_empty());
    }
    let snapshot = engine.snapshot();
    for side in sides {
        let channel = match side {
            HandSide::Left => snapshot.left,
            HandSide::Right => snapshot.right,
        };
        assert_eq!(channel.state, ActivationState::Active, "{side} should be armed");
    }
}

/// WHAT: The full 30 fps storyline: arm, trigger on the tenth frame,
///       deactivate on one Fist
/// WHY: This is the end-to-end contract every layer must add up to
#[test]
fn given_thirty_fps_feed_when_arming_triggering_and_fisting_then_protocol_follows() {
    // Given: Stock configuration on a manual 30 fps clock
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());

    // When: Frames 0-60 hold OpenPalm, 61-70 hold OneFinger, 71 shows Fist
    for frame in 0_u32..=71 {
        if frame > 0 {
            clock.advance(FRAME_STEP);
        }
        let landmarks = match frame {
            0..=60 => open_palm(),
            61..=70 => one_finger(),
            _ => fist(),
        };
        let requests = engine.process_frame(&[hand(HandSide::Right, landmarks)]);

        // Then: The channel arms at frame 60, fires exactly at frame 70, and
        // deactivates at frame 71
        match frame {
            59 => {
                assert!(requests.is_empty());
                assert_eq!(engine.snapshot().right.state, ActivationState::Activating);
            }
            60 => {
                assert!(requests.is_empty());
                assert_eq!(engine.snapshot().right.state, ActivationState::Active);
            }
            70 => {
                assert_eq!(requests.len(), 1);
                assert_eq!(requests[0].side, HandSide::Right);
                assert_eq!(requests[0].gesture, Gesture::OneFinger);
                assert_eq!(requests[0].action, "open_brave");
            }
            71 => {
                assert!(requests.is_empty());
                assert_eq!(engine.snapshot().right.state, ActivationState::Inactive);
            }
            _ => assert!(requests.is_empty(), "unexpected request at frame {frame}"),
        }
    }
}

/// WHAT: Distinct stable gestures on both armed hands fire together
/// WHY: The two channels are independent input lanes, not alternates
#[test]
fn given_both_hands_armed_when_distinct_gestures_stable_then_both_fire() {
    // Given: Both channels armed
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    arm_sides(&mut engine, &clock, &[HandSide::Left, HandSide::Right]);

    // When: Right holds OneFinger and left holds TwoFingers for ten frames
    let mut final_requests = Vec::new();
    for _ in 0..10 {
        final_requests = step_frame(
            &mut engine,
            &clock,
            &[
                hand(HandSide::Right, one_finger()),
                hand(HandSide::Left, two_fingers()),
            ],
        );
    }

    // Then: The tenth frame carries both actions, right first
    assert_eq!(final_requests.len(), 2);
    assert_eq!(final_requests[0].side, HandSide::Right);
    assert_eq!(final_requests[0].action, "open_brave");
    assert_eq!(final_requests[1].side, HandSide::Left);
    assert_eq!(final_requests[1].action, "volume_down");
}

/// WHAT: Matching gestures on both hands fire only the right action
/// WHY: Symmetric poses must not double-fire through both lanes
#[test]
fn given_both_hands_armed_when_same_gesture_stable_then_only_right_fires() {
    // Given: Both channels armed
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    arm_sides(&mut engine, &clock, &[HandSide::Left, HandSide::Right]);

    // When: Both hands hold OneFinger for ten frames
    let mut final_requests = Vec::new();
    for _ in 0..10 {
        final_requests = step_frame(
            &mut engine,
            &clock,
            &[
                hand(HandSide::Right, one_finger()),
                hand(HandSide::Left, one_finger()),
            ],
        );
    }

    // Then: Only the right-hand binding dispatches
    assert_eq!(final_requests.len(), 1);
    assert_eq!(final_requests[0].side, HandSide::Right);
    assert_eq!(final_requests[0].action, "open_brave");
}

/// WHAT: With both hands visible, the left lane needs an armed right channel
/// WHY: Right is the canonical arming channel; left is activity-gated
#[test]
fn given_right_visible_but_unarmed_when_left_stable_then_left_suppressed() {
    // Given: Only the left channel armed while a right hand stays visible
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    let arming = [
        hand(HandSide::Left, open_palm()),
        hand(HandSide::Right, one_finger()),
    ];
    engine.process_frame(&arming);
    for _ in 0..60 {
        step_frame(&mut engine, &clock, &arming);
    }
    assert_eq!(engine.snapshot().left.state, ActivationState::Active);
    assert_eq!(engine.snapshot().right.state, ActivationState::Inactive);

    // When: The left hand holds TwoFingers to stability
    let mut all_requests = Vec::new();
    for _ in 0..15 {
        let requests = step_frame(
            &mut engine,
            &clock,
            &[
                hand(HandSide::Left, two_fingers()),
                hand(HandSide::Right, one_finger()),
            ],
        );
        all_requests.extend(requests);
    }

    // Then: Nothing dispatches from either lane
    assert!(all_requests.is_empty());
}

/// WHAT: A lone left hand drives its own channel end to end
/// WHY: The right-channel gate applies only while both hands are visible
#[test]
fn given_left_hand_alone_when_stable_then_left_fires_ungated() {
    // Given: Only the left hand, armed
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    arm_sides(&mut engine, &clock, &[HandSide::Left]);

    // When: It holds TwoFingers for ten frames
    let mut final_requests = Vec::new();
    for _ in 0..10 {
        final_requests = step_frame(&mut engine, &clock, &[hand(HandSide::Left, two_fingers())]);
    }

    // Then: The left binding dispatches without any right-channel gate
    assert_eq!(final_requests.len(), 1);
    assert_eq!(final_requests[0].side, HandSide::Left);
    assert_eq!(final_requests[0].action, "volume_down");
}

/// WHAT: A right-channel cooldown holds the left lane closed until it ends
/// WHY: The gate reads the right channel as the frame began, keeping the
///      two-hand lane conservative without stalling it forever
#[test]
fn given_right_cooldown_open_when_left_stable_then_left_waits_for_expiry() {
    // Given: Both channels armed, then a right trigger at frame 70
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    arm_sides(&mut engine, &clock, &[HandSide::Left, HandSide::Right]);
    let mut fired_at = Vec::new();
    for frame in 61_u32..=70 {
        let requests = step_frame(
            &mut engine,
            &clock,
            &[
                hand(HandSide::Right, one_finger()),
                hand(HandSide::Left, open_palm()),
            ],
        );
        if !requests.is_empty() {
            fired_at.push(frame);
        }
    }
    assert_eq!(fired_at, vec![70]);

    // When: Right parks on ThumbsUp while left holds TwoFingers from frame 71
    let mut left_fired_at = Vec::new();
    for frame in 71_u32..=115 {
        let requests = step_frame(
            &mut engine,
            &clock,
            &[
                hand(HandSide::Right, landmarks_for(signature(true, false, false, false, false))),
                hand(HandSide::Left, two_fingers()),
            ],
        );
        for request in requests {
            assert_eq!(request.side, HandSide::Left);
            left_fired_at.push(frame);
        }
    }

    // Then: The left dispatch lands only once the right cooldown from frame
    // 70 has fully elapsed
    assert_eq!(left_fired_at, vec![110]);
}

/// WHAT: A malformed hand is dropped without disturbing the other channel
/// WHY: One bad detection must degrade that side only, never the session
#[test]
fn given_malformed_landmark_set_when_processing_then_only_that_side_degrades() {
    // Given: Both sides partway through their arming holds
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    let arming = [
        hand(HandSide::Left, open_palm()),
        hand(HandSide::Right, open_palm()),
    ];
    engine.process_frame(&arming);
    for _ in 0..10 {
        step_frame(&mut engine, &clock, &arming);
    }
    assert_eq!(engine.snapshot().right.state, ActivationState::Activating);

    // When: The right hand arrives with a truncated landmark set
    let mut truncated = open_palm();
    truncated.pop();
    let requests = step_frame(
        &mut engine,
        &clock,
        &[
            hand(HandSide::Left, open_palm()),
            hand(HandSide::Right, truncated),
        ],
    );

    // Then: The right hold cancels as if the hand vanished; left continues
    assert!(requests.is_empty());
    assert_eq!(engine.snapshot().right.state, ActivationState::Inactive);
    assert_eq!(engine.snapshot().left.state, ActivationState::Activating);
}

/// WHAT: An empty frame still advances existing channels
/// WHY: Arming timers must stay honest when the detector drops out
#[test]
fn given_no_hands_when_processing_then_existing_channels_still_advance() {
    // Given: A right channel partway through arming
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    let arming = [hand(HandSide::Right, open_palm())];
    engine.process_frame(&arming);
    for _ in 0..10 {
        step_frame(&mut engine, &clock, &arming);
    }
    assert_eq!(engine.snapshot().right.state, ActivationState::Activating);

    // When: The next frame holds no hands at all
    let requests = step_frame(&mut engine, &clock, &[]);

    // Then: The hold cancels; an armed channel would have been left alone
    assert!(requests.is_empty());
    assert_eq!(engine.snapshot().right.state, ActivationState::Inactive);
}

/// WHAT: A stable gesture with no binding produces no request
/// WHY: Unmapped gestures are ignored, not errors
#[test]
fn given_unmapped_gesture_when_stable_then_no_request() {
    // Given: An armed right channel; ThreeFingers has no right-hand binding
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    arm_sides(&mut engine, &clock, &[HandSide::Right]);

    // When: ThreeFingers is held well past stability
    let mut all_requests = Vec::new();
    for _ in 0..15 {
        let requests = step_frame(&mut engine, &clock, &[hand(HandSide::Right, three_fingers())]);
        all_requests.extend(requests);
    }

    // Then: No request is ever emitted
    assert!(all_requests.is_empty());
}

/// WHAT: Snapshots default for unseen sides and track arming progress
/// WHY: Status consumers render both channels from the first frame
#[test]
fn given_partial_session_when_snapshotting_then_progress_and_defaults_reported() {
    // Given: A fresh engine
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());

    // Then: Both sides report the default view
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.left.state, ActivationState::Inactive);
    assert_eq!(snapshot.right.state, ActivationState::Inactive);
    assert_eq!(snapshot.right.last_gesture, None);
    assert!(snapshot.right.activation_progress.abs() < f32::EPSILON);

    // When: The right hand holds OpenPalm for half the arming duration
    engine.process_frame(&[hand(HandSide::Right, open_palm())]);
    for _ in 0..30 {
        step_frame(&mut engine, &clock, &[hand(HandSide::Right, open_palm())]);
    }

    // Then: Right reports half progress while left stays at the default
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.right.state, ActivationState::Activating);
    assert!((snapshot.right.activation_progress - 0.5).abs() < 0.01);
    assert_eq!(snapshot.left.state, ActivationState::Inactive);
}

/// WHAT: reset_side forces one channel down and leaves the other alone
/// WHY: User-initiated resets target a single misbehaving channel
#[test]
fn given_armed_channels_when_resetting_one_side_then_other_side_kept() {
    // Given: Both channels armed
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    arm_sides(&mut engine, &clock, &[HandSide::Left, HandSide::Right]);

    // When: Resetting only the right channel
    engine.reset_side(HandSide::Right);

    // Then: Right is fully down, left still armed
    assert_eq!(engine.snapshot().right.state, ActivationState::Inactive);
    assert_eq!(engine.snapshot().left.state, ActivationState::Active);

    // When: Resetting everything
    engine.reset();

    // Then: Both channels are down
    assert_eq!(engine.snapshot().left.state, ActivationState::Inactive);
}

/// WHAT: A hot-swapped action map takes effect on the next trigger
/// WHY: Configuration reloads must not require a new engine
#[test]
fn given_swapped_action_map_when_trigger_fires_then_new_binding_used() {
    // Given: An armed right channel, then a swapped map
    let (mut engine, clock) = engine_on_manual_clock(EngineConfig::default());
    arm_sides(&mut engine, &clock, &[HandSide::Right]);
    let mut replacement = GestureActionMap::new();
    replacement.bind(HandSide::Right, Gesture::OneFinger, "launch_editor");
    engine.set_action_map(replacement);

    // When: OneFinger reaches stability
    let mut final_requests = Vec::new();
    for _ in 0..10 {
        final_requests = step_frame(&mut engine, &clock, &[hand(HandSide::Right, one_finger())]);
    }

    // Then: The new binding dispatches
    assert_eq!(final_requests.len(), 1);
    assert_eq!(final_requests[0].action, "launch_editor");
}

/// WHAT: Two hands mapping to the same action id dispatch twice
/// WHY: Deduplication is the executor's call; the engine reports intent
#[test]
fn given_both_hands_bound_to_same_action_when_both_fire_then_two_requests() {
    // Given: Both channels armed with both gestures bound to "mute"
    let mut map = GestureActionMap::new();
    map.bind(HandSide::Right, Gesture::OneFinger, "mute");
    map.bind(HandSide::Left, Gesture::TwoFingers, "mute");
    let (mut engine, clock) = engine_with_map(EngineConfig::default(), map);
    arm_sides(&mut engine, &clock, &[HandSide::Left, HandSide::Right]);

    // When: Both gestures reach stability in the same frame
    let mut final_requests = Vec::new();
    for _ in 0..10 {
        final_requests = step_frame(
            &mut engine,
            &clock,
            &[
                hand(HandSide::Right, one_finger()),
                hand(HandSide::Left, two_fingers()),
            ],
        );
    }

    // Then: Both identical action ids are dispatched independently
    assert_eq!(final_requests.len(), 2);
    assert!(final_requests.iter().all(|request| request.action == "mute"));
}

/// WHAT: Invalid configuration is rejected at construction
/// WHY: A bad setup must fail before the first frame, not during one
#[test]
fn given_invalid_config_when_building_engine_then_constructor_fails() {
    // Given: A zero stability threshold
    let config = EngineConfig {
        stability_threshold: 0,
        ..EngineConfig::default()
    };

    // When: Constructing the engine
    let result = GestureEngine::new(config, GestureActionMap::with_defaults());

    // Then: Construction is refused
    assert!(result.is_err());
}
