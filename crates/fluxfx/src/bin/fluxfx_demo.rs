//! # FLUXFX Headless Demo
//!
//! Plays a scripted gesture through every effect mode on a recording surface
//! and prints what each mode drew.
//!
//! ## Usage
//!
//! ```bash
//! fluxfx_demo --settings fluxfx.toml --frames 120
//! ```

use fluxfx::{FrameDriver, HostResult, PreferenceStore, Settings};
use fluxfx_core::EffectMode;
use fluxfx_effects::PointerEvent;
use fluxfx_render::RecordingSurface;

const WIDTH: f32 = 1080.0;
const HEIGHT: f32 = 1920.0;

fn main() -> HostResult<()> {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         FLUXFX HEADLESS DEMO                                     ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    // Simple argument parsing, no external deps
    let args: Vec<String> = std::env::args().collect();
    let mut settings_path: Option<String> = None;
    let mut frames = 90u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--settings" | "-s" => {
                if i + 1 < args.len() {
                    settings_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--frames" | "-f" => {
                if i + 1 < args.len() {
                    frames = args[i + 1].parse().unwrap_or(90);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Usage: fluxfx_demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --settings <FILE>   TOML settings file");
                println!("  -f, --frames <N>        Frames per mode (default: 90)");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }

    let settings = match settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings {
            seed: Some(0x00F1_F1F1),
            ..Settings::default()
        },
    };

    let preferences = PreferenceStore::new(settings.effect_mode.clone());
    let mut driver = FrameDriver::from_settings(&settings, preferences.clone());
    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    driver.on_surface_changed(WIDTH, HEIGHT);
    let input = driver.pointer_sender();

    println!(
        "{:<18} {:>8} {:>8} {:>8} {:>8}",
        "MODE", "LIVE", "SPAWNED", "CIRCLES", "BOLTS"
    );

    for mode in EffectMode::ALL {
        preferences.set_mode(mode.name());

        for frame in 0..frames {
            // One drag per mode: press, sweep across, release.
            let t = frame as f32 / frames as f32;
            let x = WIDTH * (0.2 + 0.6 * t);
            let y = HEIGHT * (0.5 + 0.2 * (t * std::f32::consts::TAU).sin());
            match frame {
                0 => {
                    input.send(PointerEvent::down(x, y));
                }
                f if f + 1 == frames => {
                    input.send(PointerEvent::up(x, y));
                }
                f if f % 4 == 0 => {
                    input.send(PointerEvent::moved(x, y));
                }
                _ => {}
            }
            driver.run_for(&mut surface, 1);
        }

        let engine = driver.engine().stats();
        let recorder = surface.recorder();
        println!(
            "{:<18} {:>8} {:>8} {:>8} {:>8}",
            mode.name(),
            engine.live,
            engine.spawned,
            recorder.circles().count(),
            recorder.bolts().count(),
        );
    }

    let stats = driver.stats();
    println!();
    println!(
        "ticks={} drawn={} skipped={} late={} events={} switches={}",
        stats.ticks,
        stats.drawn_frames,
        stats.skipped_frames,
        stats.late_ticks,
        stats.events,
        stats.mode_switches,
    );
    Ok(())
}
