// Host-side tests for the reduced-motion controller.

mod common;

use common::{viewport, Harness};
use starfield_core::motion::transition;
use starfield_core::{MotionMode, SurfaceSize, Transition, Viewport};
use std::time::Duration;

#[test]
fn transition_table() {
    use MotionMode::*;
    assert_eq!(transition(Animated, true), Transition::Dispose);
    assert_eq!(transition(Animated, false), Transition::Stay);
    assert_eq!(transition(Static, false), Transition::Animate);
    assert_eq!(transition(Static, true), Transition::Stay);
    assert_eq!(transition(Disposed, false), Transition::Animate);
    assert_eq!(transition(Disposed, true), Transition::Stay);
}

#[test]
fn reduced_start_draws_one_still_frame_and_never_schedules() {
    let mut h = Harness::new();
    h.controller.start(true, viewport());
    assert_eq!(h.controller.mode(), MotionMode::Static);
    assert!(!h.controller.is_animating());
    assert_eq!(h.controller.live_sessions(), 1);
    assert_eq!(h.gpu.borrow().draws, 1);
    assert_eq!(h.clock.borrow().requested, 0);
    assert_eq!(h.listeners.get(), 2);
    assert!(!h.fire(16));
    assert_eq!(h.gpu.borrow().draws, 1);
}

#[test]
fn animated_start_draws_on_each_frame() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    assert_eq!(h.controller.mode(), MotionMode::Animated);
    assert!(h.controller.has_pending_frame());
    assert_eq!(h.gpu.borrow().draws, 0);

    for i in 1..=5 {
        assert!(h.fire(i * 16));
        assert_eq!(h.gpu.borrow().draws, i as usize);
        assert_eq!(h.clock.borrow().pending.len(), 1);
    }
    assert_eq!(h.clock.borrow().requested, 6);
}

#[test]
fn turning_on_reduced_motion_tears_everything_down() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.fire(16);
    h.controller.set_reduced_motion(true, viewport());

    assert_eq!(h.controller.mode(), MotionMode::Disposed);
    assert_eq!(h.controller.live_sessions(), 0);
    assert!(!h.controller.is_animating());
    assert!(!h.controller.has_pending_frame());
    assert!(h.clock.borrow().pending.is_empty());
    assert_eq!(h.clock.borrow().cancelled.len(), 1);
    assert_eq!(h.listeners.get(), 0);
    let g = h.gpu.borrow();
    assert_eq!(g.live_surfaces, 0);
    // nothing is drawn after the teardown
    assert_eq!(g.draws, 1);
}

#[test]
fn turning_reduced_motion_off_again_restores_one_session() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.set_reduced_motion(true, viewport());
    h.controller.set_reduced_motion(false, viewport());

    assert_eq!(h.controller.mode(), MotionMode::Animated);
    assert_eq!(h.controller.live_sessions(), 1);
    assert!(h.controller.is_animating());
    assert_eq!(h.clock.borrow().pending.len(), 1);
    assert_eq!(h.listeners.get(), 2);
    assert_eq!(h.gpu.borrow().live_surfaces, 1);
}

#[test]
fn rapid_toggling_never_leaks() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    for round in 0..25u64 {
        h.fire(round * 16);
        h.controller.set_reduced_motion(true, viewport());
        assert_eq!(h.controller.live_sessions(), 0);
        assert!(h.clock.borrow().pending.is_empty());
        assert_eq!(h.listeners.get(), 0);
        assert_eq!(h.gpu.borrow().live_surfaces, 0);

        h.controller.set_reduced_motion(false, viewport());
        assert_eq!(h.controller.live_sessions(), 1);
        assert_eq!(h.clock.borrow().pending.len(), 1);
        assert_eq!(h.listeners.get(), 2);
        assert_eq!(h.gpu.borrow().live_surfaces, 1);
    }
    let g = h.gpu.borrow();
    assert_eq!(g.created, 26);
    assert_eq!(g.released, 25);
}

#[test]
fn repeated_notifications_are_idempotent() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.set_reduced_motion(false, viewport());
    h.controller.set_reduced_motion(false, viewport());
    assert_eq!(h.gpu.borrow().created, 1);
    assert_eq!(h.clock.borrow().requested, 1);

    h.controller.set_reduced_motion(true, viewport());
    h.controller.set_reduced_motion(true, viewport());
    assert_eq!(h.gpu.borrow().released, 1);
    assert_eq!(h.controller.mode(), MotionMode::Disposed);
}

#[test]
fn stale_frame_after_dispose_is_ignored() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.set_reduced_motion(true, viewport());
    // a callback that slipped past the cancel
    h.controller.frame(Duration::from_millis(500));
    assert_eq!(h.gpu.borrow().draws, 0);
    assert_eq!(h.clock.borrow().requested, 1);
}

#[test]
fn static_session_switches_to_animation_with_a_fresh_session() {
    let mut h = Harness::new();
    h.controller.start(true, viewport());
    let first = h.controller.session().unwrap().id();
    h.controller.set_reduced_motion(true, viewport());
    assert_eq!(h.controller.mode(), MotionMode::Static);

    h.controller.set_reduced_motion(false, viewport());
    assert_eq!(h.controller.mode(), MotionMode::Animated);
    assert_ne!(h.controller.session().unwrap().id(), first);
    assert_eq!(h.controller.live_sessions(), 1);
    assert_eq!(h.listeners.get(), 2);
    let g = h.gpu.borrow();
    assert_eq!((g.created, g.released, g.live_surfaces), (2, 1, 1));
}

#[test]
fn static_resize_redraws_the_still_frame() {
    let mut h = Harness::new();
    h.controller.start(true, viewport());
    h.controller.resized(Viewport::new(1024.0, 768.0));
    let g = h.gpu.borrow();
    assert_eq!(g.draws, 2);
    assert_eq!(g.last_size, Some(SurfaceSize::new(1024, 768)));
    assert_eq!(h.clock.borrow().requested, 0);
}

#[test]
fn animated_resize_waits_for_the_next_frame() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.resized(Viewport::new(1024.0, 768.0));
    assert_eq!(h.gpu.borrow().draws, 0);
    assert_eq!(h.gpu.borrow().resizes, 1);
    let aspect = h.controller.session().unwrap().camera().unwrap().aspect;
    assert!((aspect - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn resize_without_a_session_only_records_the_viewport() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.set_reduced_motion(true, viewport());
    h.controller.resized(Viewport::new(300.0, 200.0));
    assert_eq!(h.gpu.borrow().resizes, 0);
    assert_eq!(h.controller.input().viewport(), Viewport::new(300.0, 200.0));

    // the next session is sized from the last known viewport
    h.controller.set_reduced_motion(false, viewport());
    assert_eq!(
        h.gpu.borrow().last_size,
        Some(SurfaceSize::new(800, 600))
    );
}

#[test]
fn pointer_moves_feed_the_parallax() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.pointer_moved(800.0, 0.0);
    assert_eq!(h.controller.input().pointer(), glam::Vec2::new(1.0, -1.0));
    h.fire(16);
    let eye = h.controller.session().unwrap().camera().unwrap().eye;
    assert!((eye.x - 0.008).abs() < 1e-6);
    assert!((eye.y - 0.007).abs() < 1e-6);
}

#[test]
fn unavailable_context_leaves_nothing_running() {
    let mut h = Harness::new();
    h.gpu.borrow_mut().fail_create = true;
    h.controller.start(false, viewport());
    assert_eq!(h.controller.mode(), MotionMode::Disposed);
    assert_eq!(h.controller.live_sessions(), 0);
    assert!(!h.controller.is_animating());
    assert_eq!(h.clock.borrow().requested, 0);
    assert_eq!(h.listeners.get(), 0);
}

#[test]
fn second_start_is_ignored() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.start(true, viewport());
    assert_eq!(h.controller.mode(), MotionMode::Animated);
    assert_eq!(h.gpu.borrow().created, 1);
}

#[test]
fn canvas_reappears_when_a_later_toggle_succeeds() {
    let mut h = Harness::new();
    h.gpu.borrow_mut().fail_create = true;
    h.controller.start(false, viewport());
    assert_eq!(*h.visibility.borrow(), vec![false]);

    // preference flips on and off again once the device recovers
    h.gpu.borrow_mut().fail_create = false;
    h.controller.set_reduced_motion(true, viewport());
    h.controller.set_reduced_motion(false, viewport());
    assert_eq!(h.controller.mode(), MotionMode::Animated);
    assert_eq!(*h.visibility.borrow(), vec![false, true]);
}

#[test]
fn visibility_follows_session_presence() {
    let mut h = Harness::new();
    h.controller.start(false, viewport());
    h.controller.set_reduced_motion(false, viewport());
    h.controller.set_reduced_motion(true, viewport());
    h.controller.set_reduced_motion(true, viewport());
    h.controller.set_reduced_motion(false, viewport());
    // only changes are reported
    assert_eq!(*h.visibility.borrow(), vec![true, false, true]);
}

#[test]
fn still_frame_start_is_visible() {
    let mut h = Harness::new();
    h.controller.start(true, viewport());
    assert_eq!(*h.visibility.borrow(), vec![true]);
}
