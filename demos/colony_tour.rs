//! # Colony Tour
//!
//! Headless scripted walk around the colony: head for the nearest track, call
//! a train, ride it for a while, step off and try the jetpack.
//!
//! Run with `cargo run --example colony_tour [config.json]`; set `RUST_LOG=debug`
//! to see every boarding and hail decision.

use std::env;

use anyhow::{Context, Result};
use colony_explorer::assets::colony_ready;
use colony_explorer::prelude::*;
use log::info;
use winit::keyboard::KeyCode;

const FRAME: f32 = 1.0 / 60.0;

enum Cue {
    Hold(KeyCode, f32),
    Tap(KeyCode),
    Idle(f32),
    AwaitParkedTrain(f32),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(path) => ExplorerConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => ExplorerConfig::default(),
    };

    let mut bindings = KeyBindings::default();
    bindings
        .bind(KeyCode::ArrowUp, Action::MoveForward)
        .bind(KeyCode::ArrowDown, Action::MoveBack)
        .bind(KeyCode::ArrowLeft, Action::TurnLeft)
        .bind(KeyCode::ArrowRight, Action::TurnRight);
    let mut app = ExplorerApp::new(config).with_bindings(bindings);

    load_assets(&mut app);

    let script = [
        ("turn toward the western tracks", Cue::Hold(KeyCode::ArrowRight, 0.63)),
        ("walk to the line", Cue::Hold(KeyCode::KeyW, 1.6)),
        ("call a train", Cue::Tap(KeyCode::KeyC)),
        ("wait on the platform", Cue::AwaitParkedTrain(90.0)),
        ("board", Cue::Tap(KeyCode::KeyE)),
        ("ride", Cue::Idle(3.0)),
        ("step off", Cue::Tap(KeyCode::KeyE)),
        ("dance", Cue::Tap(KeyCode::KeyB)),
        ("switch to the overhead view", Cue::Tap(KeyCode::KeyV)),
        ("jetpack", Cue::Hold(KeyCode::Space, 1.0)),
        ("fall back down", Cue::Idle(2.0)),
    ];

    for (label, cue) in script {
        info!("Tour: {label}");
        run_cue(&mut app, cue);
        report(&app)?;
    }

    info!("Tour finished: {}", app.performance().get_metrics());
    Ok(())
}

fn load_assets(app: &mut ExplorerApp) {
    let base: AssetSlot<&str> = AssetSlot::Loaded("base_module");
    let npc: AssetSlot<&str> = AssetSlot::Failed("npc model not bundled".to_string());

    let radar: AssetSlot<&str> = AssetSlot::Loaded("radar");

    app.loading_mut().register(3);
    for (name, slot) in [("base_module", &base), ("npc", &npc), ("radar", &radar)] {
        match slot {
            AssetSlot::Failed(reason) => app.loading_mut().mark_failed(name, reason),
            _ => app.loading_mut().mark_loaded(name),
        }
        app.frame(FRAME);
        info!("Loading: {}", app.loading_mut());
    }

    if colony_ready(&base, &npc) {
        info!("Colony assembled without NPCs");
    }
}

fn frames_for(seconds: f32) -> usize {
    (seconds / FRAME).round() as usize
}

fn run_cue(app: &mut ExplorerApp, cue: Cue) {
    match cue {
        Cue::Hold(key, seconds) => {
            app.handle_key(key, true, false);
            for _ in 0..frames_for(seconds) {
                app.frame(FRAME);
            }
            app.handle_key(key, false, false);
        }
        Cue::Tap(key) => {
            app.handle_key(key, true, false);
            app.frame(FRAME);
            app.handle_key(key, false, false);
        }
        Cue::Idle(seconds) => {
            for _ in 0..frames_for(seconds) {
                app.frame(FRAME);
            }
        }
        Cue::AwaitParkedTrain(timeout) => {
            for frame in 0..frames_for(timeout) {
                app.frame(FRAME);
                let parked = app
                    .state()
                    .is_some_and(|s| s.vehicles.iter().any(|v| v.stopped));
                if parked {
                    info!("Train arrived after {:.1}s", frame as f32 * FRAME);
                    return;
                }
            }
            log::warn!("No train arrived within {timeout}s");
        }
    }
}

fn report(app: &ExplorerApp) -> Result<()> {
    let state = app.state().context("no simulation attached")?;
    let p = state.player.position;
    info!(
        "  player ({:.1}, {:.1}, {:.1}) {:?}{} camera {:?}",
        p.x,
        p.y,
        p.z,
        state.player.locomotion,
        if state.player.is_mounted() { " riding" } else { "" },
        state.camera_mode
    );
    Ok(())
}
