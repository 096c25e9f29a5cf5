//! yardage: command-line front end for the FAIRWAY overlay.
//!
//! Usage:
//!   yardage holes --club "Belle Glades" --front Calusa --back Seminole
//!   yardage locate --club "Belle Glades" --nine Calusa --hole 1 --at 28.8431,-81.9550
//!   yardage calibrate --club "Belle Glades" --nine Calusa --hole 1 \
//!       --tee 0.48,0.82 --green 0.52,0.18 --store hole_defaults.json

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use fairway_catalog::{build_round, Catalog, RoundHole, RoundSelection};
use fairway_core::commands::OverlayCommand;
use fairway_core::enums::Anchor;
use fairway_core::events::OverlayEvent;
use fairway_core::state::{format_yards, OverlaySnapshot};
use fairway_core::types::{GeoPoint, LiveFix, NormPoint};
use fairway_engine::{
    target_drawn, HoleStore, JsonFileStore, MemoryStore, OverlayConfig, OverlayEngine,
};
use fairway_geo::{distance_meters, meters_to_yards, round_yards};

#[derive(Parser, Debug)]
#[command(name = "yardage", about = "Hole diagrams with live yardages")]
struct Cli {
    /// Overlay settings as JSON; unspecified fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Course catalog JSON to use instead of the built-in one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the holes of a 9- or 18-hole round.
    Holes {
        #[arg(long)]
        club: String,
        #[arg(long)]
        front: String,
        /// Second nine for an 18-hole round.
        #[arg(long)]
        back: Option<String>,
    },
    /// Project a position onto a hole diagram.
    Locate {
        #[command(flatten)]
        hole: HoleArgs,
        /// Position as lat,lon.
        #[arg(long, value_parser = parse_geo_point)]
        at: GeoPoint,
        /// Horizontal accuracy in meters.
        #[arg(long, default_value_t = 5.0)]
        accuracy: f64,
        /// Place a target from a tap at x,y before projecting.
        #[arg(long, value_parser = parse_norm_point)]
        target: Option<NormPoint>,
        /// Saved calibrations to load.
        #[arg(long)]
        store: Option<PathBuf>,
        /// Print the full snapshot as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Save anchors (and optionally a target) for a hole.
    Calibrate {
        #[command(flatten)]
        hole: HoleArgs,
        /// Tee anchor as x,y in [0,1].
        #[arg(long, value_parser = parse_norm_point)]
        tee: NormPoint,
        /// Green anchor as x,y in [0,1].
        #[arg(long, value_parser = parse_norm_point)]
        green: NormPoint,
        #[arg(long, value_parser = parse_norm_point)]
        target: Option<NormPoint>,
        #[arg(long)]
        store: PathBuf,
    },
}

#[derive(Args, Debug)]
struct HoleArgs {
    #[arg(long)]
    club: String,
    #[arg(long)]
    nine: String,
    #[arg(long)]
    hole: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("yardage: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_ref())?;
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json(&fs::read_to_string(path)?)?,
        None => Catalog::builtin()?,
    };

    match cli.command {
        Command::Holes { club, front, back } => cmd_holes(&catalog, &club, front, back),
        Command::Locate {
            hole,
            at,
            accuracy,
            target,
            store,
            json,
        } => {
            let round_hole = find_hole(&catalog, &hole)?;
            let fix = LiveFix::new(at, accuracy, now_epoch_ms());
            let snapshot = match store {
                Some(path) => locate(
                    OverlayEngine::new(config, JsonFileStore::new(path)),
                    &round_hole,
                    fix,
                    target,
                ),
                None => locate(OverlayEngine::new(config, MemoryStore::new()), &round_hole, fix, target),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_snapshot(&round_hole, &snapshot);
            }
            Ok(())
        }
        Command::Calibrate {
            hole,
            tee,
            green,
            target,
            store,
        } => {
            let round_hole = find_hole(&catalog, &hole)?;
            cmd_calibrate(config, &round_hole, tee, green, target, store)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<OverlayConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(OverlayConfig::default());
    };
    let config = OverlayConfig::from_json(&fs::read_to_string(path)?)?;
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

fn cmd_holes(catalog: &Catalog, club: &str, front: String, back: Option<String>) -> Result<(), Box<dyn Error>> {
    let club = catalog.club(club)?;
    let selection = match back {
        Some(back) => RoundSelection::eighteen(front, back),
        None => RoundSelection::nine(front),
    };
    let round = build_round(club, &selection)?;

    println!("{} ({} holes, par {})", club.name, round.len(), round.total_par());
    println!("{:>4}  {:<28} {:>3}  {:>3}  {:>6}", "Hole", "Key", "Par", "Hcp", "Yards");
    for hole in round.holes() {
        let reference = hole.reference();
        let yards = round_yards(meters_to_yards(distance_meters(&reference.tee, &reference.green)));
        let hcp = hole.entry.hcp.map(|h| h.to_string()).unwrap_or_default();
        println!(
            "{:>4}  {:<28} {:>3}  {:>3}  {:>6}",
            hole.display_hole,
            hole.key().as_str(),
            reference.par,
            hcp,
            format_yards(yards)
        );
    }
    Ok(())
}

fn locate<S: HoleStore>(
    mut engine: OverlayEngine<S>,
    hole: &RoundHole,
    fix: LiveFix,
    target: Option<NormPoint>,
) -> OverlaySnapshot {
    engine.enter_hole(hole.key(), hole.reference());
    if let Some(point) = target {
        engine.queue_command(OverlayCommand::PlaceTarget { point });
    }
    engine.ingest_fix(fix);
    let settle_ms = engine.config().smoothing_ms;
    engine.tick(settle_ms)
}

fn cmd_calibrate(
    config: OverlayConfig,
    hole: &RoundHole,
    tee: NormPoint,
    green: NormPoint,
    target: Option<NormPoint>,
    store: PathBuf,
) -> Result<(), Box<dyn Error>> {
    let mut engine = OverlayEngine::new(config, JsonFileStore::new(&store));
    engine.enter_hole(hole.key(), hole.reference());
    engine.queue_commands([
        OverlayCommand::DragAnchor {
            anchor: Anchor::Tee,
            point: tee,
        },
        OverlayCommand::DragAnchor {
            anchor: Anchor::Green,
            point: green,
        },
    ]);
    if let Some(point) = target {
        engine.queue_command(OverlayCommand::PlaceTarget { point });
    }
    let snapshot = engine.tick(0.0);
    if snapshot
        .events
        .iter()
        .any(|e| matches!(e, OverlayEvent::TargetRejected { .. }))
    {
        eprintln!("yardage: target is too close to the tee or green, not placed");
    }

    engine.save_defaults()?;
    let scale = snapshot
        .calibration
        .and_then(|c| c.yards_per_norm_unit)
        .map(|s| format!("{s:.1} yd per unit"))
        .unwrap_or_else(|| "no scale (anchors coincide)".to_string());
    println!("saved {} to {} ({scale})", hole.key(), store.display());
    Ok(())
}

fn print_snapshot(hole: &RoundHole, snapshot: &OverlaySnapshot) {
    let yards = &snapshot.yardages;
    println!("Hole {} ({}), par {}", hole.display_hole, hole.key(), hole.reference().par);
    println!("  image           {}", hole.image_path());
    println!("  tee to green    {}", format_yards(yards.tee_to_green));
    println!("  you to green    {}", format_yards(yards.you_to_green));
    println!("  tee to target   {}", format_yards(yards.tee_to_target));
    println!("  target to green {}", format_yards(yards.target_to_green));
    match &snapshot.live {
        Some(live) => {
            println!(
                "  along           {:.0} yd ({:.1}%)",
                live.along_track_yards,
                live.along_track_fraction * 100.0
            );
            println!("  cross           {:+.0} yd (drawn {:+.0})", live.cross_track_yards, live.cross_track_yards_clamped);
            println!("  marker          ({:.3}, {:.3})", live.position.x, live.position.y);
        }
        None => println!("  marker          unavailable"),
    }
    println!(
        "  target overlay  {:?} ({})",
        snapshot.target_overlay,
        if target_drawn(snapshot) { "drawn" } else { "hidden" }
    );
    println!("  {}", snapshot.gps_status.label());
}

fn find_hole(catalog: &Catalog, args: &HoleArgs) -> Result<RoundHole, Box<dyn Error>> {
    let club = catalog.club(&args.club)?;
    let mut round = build_round(club, &RoundSelection::nine(args.nine.clone()))?;
    let hole = club.nine(&args.nine)?.hole(args.hole)?;
    round
        .go_to(hole.hole)
        .cloned()
        .ok_or_else(|| format!("hole {} not found in {}", args.hole, args.nine).into())
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated numbers, got {s:?}"))?;
    let a: f64 = a.trim().parse().map_err(|e| format!("{a:?}: {e}"))?;
    let b: f64 = b.trim().parse().map_err(|e| format!("{b:?}: {e}"))?;
    Ok((a, b))
}

fn parse_geo_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = parse_pair(s)?;
    let point = GeoPoint::new(lat, lon);
    if !point.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
        return Err(format!("{s:?} is not a valid lat,lon"));
    }
    Ok(point)
}

fn parse_norm_point(s: &str) -> Result<NormPoint, String> {
    let (x, y) = parse_pair(s)?;
    NormPoint::try_new(x, y).ok_or_else(|| format!("{s:?} is not a valid x,y"))
}
