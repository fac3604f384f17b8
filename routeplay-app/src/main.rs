use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use crossbeam_channel::Receiver;
use routeplay::prelude::*;
use std::path::PathBuf;
use std::thread;

/// Plays a vehicle along a driving route in real time, headless
#[derive(Debug, Parser)]
#[command(name = "routeplay", version, about)]
struct Cli {
    /// Place to start from, e.g. "Pune"
    origin: Option<String>,

    /// Place to drive to, e.g. "Mumbai"
    destination: Option<String>,

    /// Play a JSON array of [lng, lat] pairs instead of asking for directions
    #[arg(long, conflicts_with_all = ["origin", "destination"])]
    path: Option<PathBuf>,

    /// Speed multiplier applied to the base speed
    #[arg(long, short, default_value_t = 1.0)]
    speed: f64,

    /// Frames per second of the playback clock
    #[arg(long, default_value_t = 60)]
    fps: u32,

    #[arg(long, value_enum, default_value_t = Profile::Reference)]
    profile: Profile,

    /// JSON options file; overrides --profile
    #[arg(long)]
    options: Option<PathBuf>,

    /// Log progress every this many meters
    #[arg(long, default_value_t = 1000.0)]
    report_every: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Reference,
    Cinematic,
    Brisk,
}

impl From<Profile> for PlaybackProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Reference => PlaybackProfile::Reference,
            Profile::Cinematic => PlaybackProfile::Cinematic,
            Profile::Brisk => PlaybackProfile::Brisk,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let options = match &cli.options {
        Some(file) => {
            let json = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            PlaybackOptions::from_json(&json)?
        }
        None => PlaybackProfile::from(cli.profile).resolve(),
    };

    let path = match (&cli.path, &cli.origin, &cli.destination) {
        (Some(file), _, _) => load_path(file)?,
        (None, Some(origin), Some(destination)) => plan(origin, destination).await?,
        _ => bail!("give an origin and a destination, or --path"),
    };

    play(path, options, &cli).await
}

fn load_path(file: &std::path::Path) -> anyhow::Result<Path> {
    let json =
        std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let coordinates: Vec<Coordinate> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a [[lng, lat], ...] array", file.display()))?;
    Ok(Path::new(coordinates)?)
}

async fn plan(origin: &str, destination: &str) -> anyhow::Result<Path> {
    let config = MapboxConfig::from_env()?;
    let planner = RoutePlanner::new(
        MapboxGeocoder::new(config.clone()),
        MapboxDirections::new(config),
    );
    let plan = planner.plan(&RouteRequest::new(origin, destination)?).await?;

    log::info!("{} -> {}", plan.origin.name, plan.destination.name);
    for (rank, (route, style)) in plan.styled().enumerate() {
        log::info!(
            "  #{} {:.1} km, {:.1} min ({} width {})",
            rank,
            route.distance_m / 1000.0,
            route.duration_s / 60.0,
            style.color,
            style.width
        );
    }
    log::info!("fastest: {}", plan.summary());

    Ok(plan.into_fastest_path())
}

async fn play(path: Path, options: PlaybackOptions, cli: &Cli) -> anyhow::Result<()> {
    let total = path.total_length();
    let (surface, commands) = ChannelSurface::unbounded();
    let renderer = thread::spawn(move || render(commands));

    let mut controller = PlaybackController::new(surface, options)?;
    let applied = controller.set_speed_multiplier(cli.speed)?;
    let session = controller.start_path(path)?;
    log::info!(
        "{} started: {:.1} km at {}x, ~{:.0} s",
        session,
        total / 1000.0,
        applied,
        total / controller.options().playback.speed_mps(applied)
    );

    let mut clock = FrameClock::new(cli.fps);
    let mut next_report = cli.report_every.max(1.0);
    let report = |update: &PositionUpdate| {
        if update.distance_traveled >= next_report {
            log::info!(
                "{:>8.0} m  {}  heading {:>5.1}",
                update.distance_traveled,
                update.position,
                update.heading
            );
            next_report += cli.report_every.max(1.0);
        }
    };

    let outcome = tokio::select! {
        outcome = run_to_completion(&mut controller, session, &mut clock, report) => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };
    if outcome.is_none() {
        controller.cancel();
    }
    log::info!("{} ended {}", session, controller.status());

    // Dropping the controller closes the channel and lets the renderer exit
    drop(controller);
    let frames = renderer
        .join()
        .map_err(|_| anyhow::anyhow!("render thread panicked"))?;
    log::info!("renderer consumed {} surface commands", frames);
    Ok(())
}

/// Stand-in render thread: drains surface commands and logs the rare ones.
fn render(commands: Receiver<SurfaceCommand>) -> usize {
    let mut count = 0;
    for command in commands {
        count += 1;
        match command {
            SurfaceCommand::AddMarker {
                marker, position, ..
            } => log::debug!("marker {:?} placed at {}", marker, position),
            SurfaceCommand::RemoveMarker { marker } => log::debug!("marker {:?} removed", marker),
            SurfaceCommand::EaseViewport(ease) if ease.zoom.is_some() => {
                log::debug!("viewport flies to {} over {:?}", ease.target, ease.duration)
            }
            _ => {}
        }
    }
    count
}
