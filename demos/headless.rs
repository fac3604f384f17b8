//! Drives a playback session by hand with synthetic frame timestamps and
//! prints what a map would have been asked to draw.
//!
//! Run with `cargo run --example headless`.

use routeplay::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A short L-shaped drive: east along the equator, then north
    let path = Path::new(vec![
        Coordinate::new(0.0, 0.0),
        Coordinate::new(0.002, 0.0),
        Coordinate::new(0.004, 0.0),
        Coordinate::new(0.004, 0.002),
    ])?;
    println!("path: {} vertices, {:.1} m", path.len(), path.total_length());

    let mut controller =
        PlaybackController::with_profile(RecordingSurface::new(), PlaybackProfile::Reference)?;
    controller.set_speed_multiplier(2.0)?;
    let session = controller.start_path(path)?;

    let mut now = 0.0;
    let mut advanced = 0;
    let mut took_break = false;
    loop {
        let outcome = controller.tick(session, now);
        if let TickOutcome::Advanced(update) = outcome {
            advanced += 1;
            if advanced % 60 == 0 {
                println!(
                    "t={:>6.0} ms  {}  heading {:>5.1}  segment {}",
                    now, update.position, update.heading, update.segment_index
                );
            }
        }

        // Two seconds in, take a ten second break; none of it is driven
        if advanced == 120 && !took_break && controller.pause() {
            took_break = true;
            let paused_at = now;
            while now < paused_at + 10_000.0 {
                now += FRAME_MS;
                assert_eq!(controller.tick(session, now), TickOutcome::Paused);
            }
            controller.resume();
        }

        if !outcome.should_continue() {
            println!("{} ended with {:?} after {} ticks", session, outcome, advanced);
            break;
        }
        now += FRAME_MS;
    }

    let surface = controller.surface();
    println!(
        "surface saw {} commands, {} camera eases, {} live marker(s)",
        surface.commands().len(),
        surface.viewport_eases().count(),
        surface.live_markers().len()
    );
    Ok(())
}
