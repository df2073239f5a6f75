//! Plays the fixed adaptive playlist through the GStreamer engine.
//!
//! Run with: cargo run -p desy-desktop --example play_fixed_stream

use std::time::Duration;

use anyhow::Result;
use desy_core::{LifecycleEvent, NoopControls, PlaybackState, PlayerScreen, ScreenConfig};
use desy_desktop::GstEngineFactory;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    desy_core::init();

    let config = ScreenConfig::default();
    let mut screen = PlayerScreen::new(config, GstEngineFactory, NoopControls);
    let mut states = screen.subscribe_state();

    screen.on_lifecycle(LifecycleEvent::Started)?;
    screen.on_lifecycle(LifecycleEvent::Resumed)?;

    // Pump engine notifications on this (main) context for a minute.
    for _ in 0..600 {
        std::thread::sleep(Duration::from_millis(100));
        screen.process_events();
        if states.has_changed().unwrap_or(false) {
            let state = *states.borrow_and_update();
            println!("playback state: {state}");
            if state == PlaybackState::Ended {
                break;
            }
        }
    }

    if !screen.audio_languages().is_empty() {
        println!("audio languages: {:?}", screen.audio_languages());
    }
    if !screen.subtitle_languages().is_empty() {
        println!("subtitle languages: {:?}", screen.subtitle_languages());
    }

    screen.on_lifecycle(LifecycleEvent::Paused)?;
    screen.on_lifecycle(LifecycleEvent::Stopped)?;
    println!("saved state: {}", screen.save_state());
    Ok(())
}
