// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full edit session on a headless page.
//!
//! Selects a character placed with percentages, resizes it from the se corner,
//! nudges it, commits, and saves the result the way the page would.
//!
//! Run:
//! - `cargo run -p stagehand_demos --bin headless_session`
//! - `RUST_LOG=stagehand_session=debug cargo run -p stagehand_demos --bin headless_session -- settings.json`

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use kurbo::{Point, Rect};
use stagehand_handles::{Modifiers, NudgeDirection};
use stagehand_session::headless::{HeadlessElement, HeadlessStage, Recorder};
use stagehand_session::{
    CharacterPlacement, EditSessionController, EditorConfig, KeyInput, MemoryStore, SavedPosition,
    load_position, save_position, wait_for_host,
};
use stagehand_transform::StyleSnapshot;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EditorConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => EditorConfig::default(),
    };

    // The renderer comes up a little after the page.
    let renderer = Recorder::<CharacterPlacement>::new();
    let ready = {
        let renderer = renderer.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            renderer
        }
    };
    let mode = wait_for_host(ready, config.host_ready_timeout()).await;

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
            z_index: "3".into(),
        },
    );
    info!(rendered = ?hero.rendered_rect(), "page loaded");

    let mut editor = EditSessionController::new(config);
    editor.set_host_mode(mode);
    let session = editor.select(&hero)?;

    let none = Modifiers::empty();
    editor.handle_pointer_down(1, Point::new(475.0, 700.0), none);
    for step in 1..=10 {
        let t = f64::from(step) / 10.0;
        let pointer = Point::new(475.0 + 100.0 * t, 700.0 + 50.0 * t);
        let outcome = editor.handle_pointer_move(1, pointer, none);
        info!(step, ?outcome, rendered = ?hero.rendered_rect(), "drag");
    }
    editor.handle_pointer_up(1, Point::new(575.0, 750.0), none);
    editor.handle_key_down(KeyInput::Arrow(NudgeDirection::Left), Modifiers::SHIFT);

    let outcome = editor.commit(session)?;
    for event in editor.drain_events() {
        let json = serde_json::to_string(&event)?;
        info!(event = %json, "session event");
    }
    info!(placements = renderer.len(), last = ?renderer.last(), "skeleton synced");

    let mut store = MemoryStore::new();
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    if let Some(saved) = SavedPosition::from_commit("hero", &outcome, u64::try_from(now)?) {
        save_position(&mut store, &saved)?;
    }
    if let Some(saved) = load_position(&store, "hero") {
        println!("{}", serde_json::to_string_pretty(&saved)?);
    }
    Ok(())
}
