use tactic_board::annotate::controller::OverlayController;
use tactic_board::annotate::mapper::DisplayRect;
use tactic_board::annotate::HISTORY_CAPACITY;
use tactic_board::playback::VideoSource;

struct PausedClip;

impl VideoSource for PausedClip {
    fn intrinsic_size(&self) -> (u32, u32) {
        (64, 64)
    }

    fn duration(&self) -> f64 {
        5.0
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn rate(&self) -> f64 {
        1.0
    }

    fn is_paused(&self) -> bool {
        true
    }
}

fn bound_controller() -> OverlayController {
    let mut controller = OverlayController::new();
    controller.bind_clip_metadata(64, 64);
    controller.set_display_rect(DisplayRect::new(0.0, 0.0, 64.0, 64.0));
    controller
}

fn stroke(controller: &mut OverlayController, from: (f32, f32), to: (f32, f32)) {
    let video = PausedClip;
    controller.pointer_down(from, &video);
    controller.pointer_move(to, &video);
    controller.pointer_up();
}

#[test]
fn history_never_exceeds_its_capacity() {
    let mut controller = bound_controller();
    for i in 0..15 {
        let y = 4.0 * i as f32 + 2.0;
        stroke(&mut controller, (4.0, y), (60.0, y));
        assert!(controller.history_len() <= HISTORY_CAPACITY);
    }
    assert_eq!(controller.history_len(), HISTORY_CAPACITY);
}

#[test]
fn undo_removes_only_the_last_stroke() {
    let mut controller = bound_controller();
    let color = controller.tool_state().color;
    stroke(&mut controller, (4.0, 10.0), (60.0, 10.0));
    stroke(&mut controller, (4.0, 40.0), (60.0, 40.0));

    controller.undo();

    assert_eq!(controller.canvas().pixel(30, 10), color);
    assert_eq!(controller.canvas().pixel(30, 40).a, 0);
    assert_eq!(controller.history_len(), 2);
}

#[test]
fn undo_twice_after_one_stroke_returns_to_seeded_blank() {
    let mut controller = bound_controller();
    stroke(&mut controller, (4.0, 10.0), (60.0, 10.0));
    assert_eq!(controller.history_len(), 2);

    controller.undo();
    assert!(controller.canvas().is_blank());
    assert_eq!(controller.history_len(), 1);

    controller.undo();
    assert!(controller.canvas().is_blank());
    assert_eq!(controller.history_len(), 0);

    // Undo on the empty stack stays a no-op.
    controller.undo();
    assert_eq!(controller.history_len(), 0);
}

#[test]
fn states_older_than_the_window_are_unrecoverable() {
    let mut controller = bound_controller();
    for i in 0..15 {
        let y = 4.0 * i as f32 + 2.0;
        stroke(&mut controller, (4.0, y), (60.0, y));
    }

    // Nine undos walk back to the oldest surviving state, which still
    // contains the first six strokes baked in.
    for _ in 0..9 {
        controller.undo();
    }
    assert_eq!(controller.history_len(), 1);
    assert!(!controller.canvas().is_blank());

    // The tenth collapses to blank; strokes 1-6 were evicted and cannot be
    // stepped through individually.
    controller.undo();
    assert_eq!(controller.history_len(), 0);
    assert!(controller.canvas().is_blank());
}

#[test]
fn reset_is_idempotent() {
    let mut controller = bound_controller();
    stroke(&mut controller, (4.0, 10.0), (60.0, 10.0));
    stroke(&mut controller, (4.0, 20.0), (60.0, 20.0));

    controller.reset();
    assert!(controller.canvas().is_blank());
    assert_eq!(controller.history_len(), 1);

    controller.reset();
    assert!(controller.canvas().is_blank());
    assert_eq!(controller.history_len(), 1);
}
