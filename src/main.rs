// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional u32->i32 casts for pixel math
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::too_many_lines)] // main() is long but well-structured

//! Analog clock panel simulator.
//!
//! Shows one analog clock with title, weekday, date and digital time labels
//! in an `embedded-graphics` simulator window. The clock core lives in
//! `clock-common`; this binary provides the host side:
//!
//! - a run-loop driven scheduler for the refresh timer
//! - label widgets and the panel layout
//! - settings file loading/saving and CLI overrides
//! - keyboard stand-ins for the configuration dialog and remote events
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `T` / `D` / `H` | Toggle title / date / time label |
//! | `Z` | Cycle through demo time zones |
//! | `X` | Apply an invalid time zone (falls back to UTC) |
//! | `R` | Send the remote `refresh` event |
//! | `S` | Save settings |
//! | `Q` / close | Tear down, save and quit |
//!
//! Set `RUST_LOG=debug` to see label rewrites and timer activity.

mod cli;
mod config;
mod render;
mod scheduler;
mod styles;
mod widgets;

use std::path::Path;
use std::thread;
use std::time::Instant;

use clap::Parser;
use cli::ClockOptions;
use clock_common::colors::BACKGROUND;
use clock_common::widget::REMOTE_REFRESH;
use clock_common::{
    ClockLabels,
    ClockSettings,
    ClockWidget,
    FixedTimeSource,
    RemoteValue,
    SystemTimeSource,
    TimeSource,
    WidgetEvent,
};
use config::{DEMO_ZONES, FRAME_TIME, INVALID_ZONE, WINDOW_TITLE, default_config_path};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use scheduler::LoopScheduler;
use widgets::{Panel, PanelLabel, full_panel_height};

type HostClock = ClockWidget<LoopScheduler, PanelLabel, Box<dyn TimeSource>>;

fn main() {
    let options = ClockOptions::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = options.config.clone().unwrap_or_else(default_config_path);
    let mut settings = ClockSettings::load(&config_path).unwrap_or_else(|e| {
        log::error!("{e}, using defaults");
        ClockSettings::default()
    });
    if let Some(zone) = &options.timezone {
        settings.timezone.clone_from(zone);
    }

    let source: Box<dyn TimeSource> = match options.at {
        Some(instant) => {
            log::info!("clock frozen at {instant}");
            Box::new(FixedTimeSource::new(instant))
        }
        None => Box::new(SystemTimeSource),
    };

    let mut zone_index = DEMO_ZONES.iter().position(|z| *z == settings.timezone).unwrap_or(0);
    let mut clock: HostClock = ClockWidget::new(settings, LoopScheduler::new(), ClockLabels::default(), source);

    // Initialize display and window (simulator mode)
    let size = options.size;
    let height = full_panel_height(size, clock.labels());
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(size, height));
    let output_settings = OutputSettingsBuilder::new().scale(options.scale).build();
    let mut window = Window::new(WINDOW_TITLE, &output_settings);
    let mut panel = Panel::new(size, clock.labels());

    display.clear(BACKGROUND).ok();
    window.update(&display);

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    shutdown(&mut clock, &config_path);
                    return;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::T => clock.set_show_title(!clock.settings().show_title),
                        Keycode::D => clock.set_show_date(!clock.settings().show_date),
                        Keycode::H => clock.set_show_time(!clock.settings().show_time),
                        Keycode::Z => {
                            zone_index = (zone_index + 1) % DEMO_ZONES.len();
                            clock.set_timezone(DEMO_ZONES[zone_index]);
                        }
                        Keycode::X => clock.set_timezone(INVALID_ZONE),
                        Keycode::R => {
                            clock.handle(WidgetEvent::Remote {
                                name: REMOTE_REFRESH.to_string(),
                                value: RemoteValue::Bool(true),
                            });
                        }
                        Keycode::S => save(clock.settings(), &config_path),
                        Keycode::Q => {
                            shutdown(&mut clock, &config_path);
                            return;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Dispatch due refresh ticks
        for id in clock.scheduler_mut().poll(Instant::now()) {
            clock.handle(WidgetEvent::Tick(id));
        }

        let fallback = clock.zone().is_fallback();
        clock.labels_mut().title.set_highlight(fallback);

        panel.draw(&mut display, &mut clock);
        window.update(&display);

        // Frame pacing: sleep for remaining frame budget
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

/// Tear the clock down, then persist its settings.
fn shutdown(clock: &mut HostClock, path: &Path) {
    clock.handle(WidgetEvent::Teardown);
    save(clock.settings(), path);
}

fn save(settings: &ClockSettings, path: &Path) {
    if let Err(e) = settings.save(path) {
        log::error!("{e}");
    }
}
