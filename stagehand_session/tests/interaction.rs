// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and keyboard input against a headless page.

use std::rc::Rc;

use kurbo::{Point, Rect};
use stagehand_handles::{Modifiers, NudgeDirection};
use stagehand_session::headless::{HeadlessElement, HeadlessStage};
use stagehand_session::{EditSessionController, EditorConfig, EventOutcome, KeyInput, SessionHandle};
use stagehand_transform::StyleSnapshot;

const NONE: Modifiers = Modifiers::empty();

/// The hero renders at (225, 500)-(475, 700) on a 1000×800 stage.
fn setup() -> (Rc<HeadlessElement>, EditSessionController<HeadlessElement>, SessionHandle) {
    let stage = HeadlessStage::new(Rect::new(0.0, 0.0, 1000.0, 800.0));
    let hero = HeadlessElement::new(
        &stage,
        StyleSnapshot {
            position: "absolute".into(),
            left: "35%".into(),
            top: "75%".into(),
            width: "25%".into(),
            height: "25%".into(),
            transform: "translate(-50%, -50%)".into(),
            z_index: String::new(),
        },
    );
    let mut editor = EditSessionController::new(EditorConfig::default());
    let session = editor.select(&hero).unwrap();
    (hero, editor, session)
}

fn assert_rect_near(got: Rect, want: Rect, what: &str) {
    let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
    assert!(
        close(got.x0, want.x0)
            && close(got.y0, want.y0)
            && close(got.x1, want.x1)
            && close(got.y1, want.y1),
        "{what}: {got:?} != {want:?}"
    );
}

fn x_of(editor: &EditSessionController<HeadlessElement>, session: SessionHandle) -> f64 {
    editor.get_state(session).unwrap().transform.x()
}

#[test]
fn small_jitter_writes_nothing() {
    let (hero, mut editor, session) = setup();
    assert_eq!(
        editor.handle_pointer_down(1, Point::new(350.0, 600.0), NONE),
        EventOutcome::Handled,
        "grabbed"
    );
    assert_eq!(
        editor.handle_pointer_move(1, Point::new(352.0, 600.0), NONE),
        EventOutcome::Handled,
        "under the threshold"
    );
    assert_eq!(
        editor.handle_pointer_up(1, Point::new(352.0, 600.0), NONE),
        EventOutcome::Handled,
        "released"
    );
    assert!(hero.writes().is_empty(), "a click is not a drag");
    assert_eq!(editor.revision(session), Ok(0), "no edits");
}

#[test]
fn other_pointers_are_ignored_during_a_drag() {
    let (hero, mut editor, _) = setup();
    editor.handle_pointer_down(1, Point::new(350.0, 600.0), NONE);
    assert_eq!(
        editor.handle_pointer_down(2, Point::new(900.0, 100.0), NONE),
        EventOutcome::Ignored,
        "second finger does not commit"
    );
    assert_eq!(
        editor.handle_pointer_move(2, Point::new(400.0, 600.0), NONE),
        EventOutcome::Ignored,
        "second finger does not drag"
    );
    assert!(editor.is_editing(), "still editing");
    assert!(hero.writes().is_empty(), "nothing moved");
}

#[test]
fn dragging_the_body_moves_the_box() {
    let (hero, mut editor, session) = setup();
    editor.handle_pointer_down(1, Point::new(350.0, 600.0), NONE);
    assert_eq!(
        editor.handle_pointer_move(1, Point::new(330.0, 560.0), NONE),
        EventOutcome::Applied,
        "moved"
    );
    assert_rect_near(hero.rendered_rect(), Rect::new(205.0, 460.0, 455.0, 660.0), "translated");
    // Releasing somewhere else applies the final position.
    assert_eq!(
        editor.handle_pointer_up(1, Point::new(300.0, 560.0), NONE),
        EventOutcome::Applied,
        "last frame"
    );
    assert_eq!(x_of(&editor, session), 300.0, "anchor followed the pointer");
    assert_eq!(editor.revision(session), Ok(2), "one write per frame");
    assert_eq!(hero.writes().len(), 2, "atomic writes");
}

#[test]
fn frames_leaving_the_container_are_skipped() {
    let (hero, mut editor, session) = setup();
    editor.handle_pointer_down(1, Point::new(350.0, 600.0), NONE);
    assert_eq!(
        editor.handle_pointer_move(1, Point::new(120.0, 600.0), NONE),
        EventOutcome::Applied,
        "overhang within the margin"
    );
    assert_eq!(
        editor.handle_pointer_move(1, Point::new(100.0, 600.0), NONE),
        EventOutcome::Rejected,
        "too far out"
    );
    assert_rect_near(
        hero.rendered_rect(),
        Rect::new(-5.0, 500.0, 245.0, 700.0),
        "previous frame stays",
    );
    assert_eq!(editor.revision(session), Ok(1), "rejected frame not counted");
    assert_eq!(
        editor.handle_pointer_up(1, Point::new(100.0, 600.0), NONE),
        EventOutcome::Handled,
        "release still ends the drag"
    );
}

#[test]
fn shift_pressed_mid_drag_locks_the_aspect_ratio() {
    let (hero, mut editor, _) = setup();
    editor.handle_pointer_down(1, Point::new(475.0, 700.0), NONE);
    editor.handle_pointer_move(1, Point::new(575.0, 720.0), NONE);
    assert_rect_near(hero.rendered_rect(), Rect::new(225.0, 500.0, 575.0, 720.0), "free resize");

    assert_eq!(
        editor.handle_key_down(KeyInput::Modifier, Modifiers::SHIFT),
        EventOutcome::Applied,
        "re-evaluated without moving the pointer"
    );
    assert_rect_near(hero.rendered_rect(), Rect::new(225.0, 500.0, 575.0, 780.0), "5:4 kept");

    assert_eq!(
        editor.handle_key_up(KeyInput::Modifier, NONE),
        EventOutcome::Applied,
        "released"
    );
    assert_rect_near(hero.rendered_rect(), Rect::new(225.0, 500.0, 575.0, 720.0), "free again");
}

#[test]
fn ctrl_resizes_about_the_center() {
    let (hero, mut editor, session) = setup();
    editor.handle_pointer_down(1, Point::new(475.0, 700.0), Modifiers::CTRL);
    editor.handle_pointer_move(1, Point::new(495.0, 710.0), Modifiers::CTRL);
    assert_rect_near(hero.rendered_rect(), Rect::new(205.0, 490.0, 495.0, 710.0), "grew both ways");
    let model = editor.get_state(session).unwrap().transform;
    assert_eq!((model.x(), model.y()), (350.0, 600.0), "anchor unchanged");
}

#[test]
fn resize_stops_at_the_minimum_size() {
    let (hero, mut editor, _) = setup();
    editor.handle_pointer_down(1, Point::new(475.0, 700.0), NONE);
    editor.handle_pointer_move(1, Point::new(230.0, 505.0), NONE);
    // 20px floor, raised to 10% of the layout box so the scale stays valid.
    assert_rect_near(hero.rendered_rect(), Rect::new(225.0, 500.0, 250.0, 520.0), "floored");
}

#[test]
fn arrows_nudge_by_the_configured_steps() {
    let (_hero, mut editor, session) = setup();
    let right = KeyInput::Arrow(NudgeDirection::Right);
    assert_eq!(editor.handle_key_down(right, NONE), EventOutcome::Applied, "nudged");
    assert_eq!(x_of(&editor, session), 351.0, "one pixel");
    editor.handle_key_down(right, Modifiers::SHIFT);
    assert_eq!(x_of(&editor, session), 361.0, "ten with shift");
    editor.handle_key_down(right, Modifiers::CTRL);
    assert!((x_of(&editor, session) - 361.1).abs() < 1e-9, "a tenth with ctrl");
    editor.handle_key_down(KeyInput::Arrow(NudgeDirection::Up), NONE);
    assert_eq!(editor.get_state(session).unwrap().transform.y(), 599.0, "up is negative y");
}

#[test]
fn arrows_do_nothing_during_a_drag() {
    let (hero, mut editor, _) = setup();
    editor.handle_pointer_down(1, Point::new(350.0, 600.0), NONE);
    assert_eq!(
        editor.handle_key_down(KeyInput::Arrow(NudgeDirection::Left), NONE),
        EventOutcome::Handled,
        "swallowed"
    );
    assert!(hero.writes().is_empty(), "no nudge");
}

#[test]
fn escape_commits() {
    let (_hero, mut editor, session) = setup();
    assert_eq!(
        editor.handle_key_down(KeyInput::Escape, NONE),
        EventOutcome::Committed,
        "committed"
    );
    assert!(!editor.is_editing(), "idle");
    assert!(editor.get_state(session).is_ok(), "last session still answers");
    assert_eq!(
        editor.handle_key_down(KeyInput::Escape, NONE),
        EventOutcome::Ignored,
        "nothing left"
    );
}

#[test]
fn pressing_outside_the_box_commits() {
    let (hero, mut editor, _) = setup();
    assert_eq!(
        editor.handle_pointer_down(1, Point::new(900.0, 100.0), NONE),
        EventOutcome::Committed,
        "click outside"
    );
    assert!(!editor.is_editing(), "idle");
    assert_eq!(hero.style().left, "35%", "untouched session restored verbatim");
}

#[test]
fn hit_region_narrows_the_body() {
    let (_hero, editor, _) = setup();
    let mut editor = editor.with_hit_region(|p: Point| p.x < 300.0);
    assert_eq!(
        editor.handle_pointer_down(1, Point::new(260.0, 600.0), NONE),
        EventOutcome::Handled,
        "on the character"
    );
    editor.handle_pointer_cancel(1);
    assert_eq!(
        editor.handle_pointer_down(1, Point::new(475.0, 700.0), NONE),
        EventOutcome::Handled,
        "handles are always live"
    );
    editor.handle_pointer_cancel(1);
    assert_eq!(
        editor.handle_pointer_down(1, Point::new(400.0, 600.0), NONE),
        EventOutcome::Committed,
        "inside the box but off the character"
    );
}

#[test]
fn cancel_keeps_the_last_frame() {
    let (hero, mut editor, _) = setup();
    editor.handle_pointer_down(1, Point::new(350.0, 600.0), NONE);
    editor.handle_pointer_move(1, Point::new(360.0, 600.0), NONE);
    assert_eq!(editor.handle_pointer_cancel(1), EventOutcome::Handled, "cancelled");
    assert_eq!(
        editor.handle_pointer_move(1, Point::new(400.0, 600.0), NONE),
        EventOutcome::Ignored,
        "drag is over"
    );
    assert_rect_near(hero.rendered_rect(), Rect::new(235.0, 500.0, 485.0, 700.0), "kept");
}

#[test]
fn detaching_mid_drag_aborts() {
    let (hero, mut editor, _) = setup();
    editor.handle_pointer_down(1, Point::new(350.0, 600.0), NONE);
    hero.detach();
    assert_eq!(
        editor.handle_pointer_move(1, Point::new(400.0, 600.0), NONE),
        EventOutcome::Aborted,
        "element gone"
    );
    assert!(!editor.is_editing(), "session abandoned");
    assert!(hero.writes().is_empty(), "nothing written");
}

#[test]
fn input_without_a_session_is_ignored() {
    let mut editor = EditSessionController::<HeadlessElement>::new(EditorConfig::default());
    assert_eq!(editor.handle_pointer_down(1, Point::ZERO, NONE), EventOutcome::Ignored, "down");
    assert_eq!(editor.handle_pointer_move(1, Point::ZERO, NONE), EventOutcome::Ignored, "move");
    assert_eq!(editor.handle_key_down(KeyInput::Escape, NONE), EventOutcome::Ignored, "key");
}
