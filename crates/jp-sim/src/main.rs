//! Jackpot round simulator
//!
//! Drives the visualizer headlessly with a virtual clock and prints what a
//! viewer would see.
//!
//! Usage:
//!   jp-sim demo --bets 1,1,8 --winner 2      - Scripted round
//!   jp-sim replay polls.json                 - Recorded status payloads
//!   jp-sim random --players 8 --seed 42      - Random stakes and winner
//!   jp-sim --profile turbo --curve 4 demo    - Other timing and easing
//!
//! Logging goes through `RUST_LOG` (e.g. `RUST_LOG=debug`).

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand, ValueEnum};

use jp_motion::{EaseCurve, FrameEvent, SpinTiming, TimingProfile};
use jp_round::{JackpotVisualizer, SpinSummary, VisualizerConfig};

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "jp-sim", about = "Headless jackpot round simulator")]
struct Cli {
    /// Visualizer config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Frames per second of the virtual clock
    #[arg(long, global = true, default_value_t = 60.0)]
    fps: f64,

    /// Timing profile, replacing the configured timing
    #[arg(long, global = true, value_enum)]
    profile: Option<ProfileArg>,

    /// Easing curve: 0 linear, 1 sine, 2 cubic, 3 quart, 4 quint
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=4))]
    curve: Option<u8>,

    /// Scale spin and reveal durations (< 1.0 = faster)
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// Print every Nth spin frame
    #[arg(long, global = true, default_value_t = 30)]
    every: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Normal,
    Turbo,
    Instant,
}

impl From<ProfileArg> for TimingProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Normal => TimingProfile::Normal,
            ProfileArg::Turbo => TimingProfile::Turbo,
            ProfileArg::Instant => TimingProfile::Instant,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scripted round from a list of stakes
    Demo {
        /// Stakes in join order
        #[arg(long, value_delimiter = ',', default_value = "1,1,8")]
        bets: Vec<f64>,
        /// Winner index into the stakes
        #[arg(long, default_value_t = 2)]
        winner: usize,
        /// Round id the strip shuffle is seeded from
        #[arg(long, default_value = "roundA")]
        round_id: String,
    },
    /// Replay a JSON array of status payloads, one per poll
    Replay { file: PathBuf },
    /// Random stakes with a stake-weighted winner
    Random {
        #[arg(long, default_value_t = 5)]
        players: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    ensure!(cli.fps.is_finite() && cli.fps > 0.0, "fps must be positive");

    let mut config = match &cli.config {
        Some(path) => VisualizerConfig::try_load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => VisualizerConfig::load(),
    };
    config.timing = apply_timing_flags(config.timing, cli.profile, cli.curve, cli.speed);

    let timing = &config.timing;
    log::info!(
        "Timing {:?}: spin {:.0}ms, reveal {:.0}ms ({:.0}ms busy per round), curve {}",
        timing.profile,
        timing.spin_duration_ms,
        timing.reveal_duration_ms,
        timing.total_busy_ms(),
        timing.curve.name()
    );

    let poll_ms = timing.poll_interval_ms;
    let scenario = match cli.command {
        Commands::Demo {
            bets,
            winner,
            round_id,
        } => scenario::demo(&bets, winner, &round_id, poll_ms)?,
        Commands::Replay { file } => scenario::load_replay(&file)?,
        Commands::Random { players, seed } => scenario::random(players, seed, poll_ms)?,
    };

    log::info!(
        "Simulating round {} ({} polls, {:.0} fps)",
        scenario.round_id,
        scenario.polls.len(),
        cli.fps
    );

    let visualizer = JackpotVisualizer::new(config)?;
    run(visualizer, scenario, cli.fps, cli.every.max(1))
}

/// Profile first, then curve, then speed scaling
fn apply_timing_flags(
    timing: SpinTiming,
    profile: Option<ProfileArg>,
    curve: Option<u8>,
    speed: Option<f64>,
) -> SpinTiming {
    let mut timing = match profile {
        Some(profile) => SpinTiming::from_profile(profile.into()),
        None => timing,
    };
    if let Some(index) = curve {
        timing.curve = EaseCurve::from_index(index);
    }
    match speed {
        Some(speed) => timing.scaled(speed),
        None => timing,
    }
}

/// Feed polls whenever the visualizer asks for one and render frames in
/// between, until the polls run out and nothing is on screen.
fn run(mut viz: JackpotVisualizer, scenario: Scenario, fps: f64, every: usize) -> Result<()> {
    let frame_ms = 1000.0 / fps;
    let mut polls = scenario.polls.into_iter();
    let mut spin: Option<SpinSummary> = None;
    let mut frame_no = 0usize;
    let mut now = 0.0;

    loop {
        if viz.should_poll(now) {
            let Some(status) = polls.next() else {
                break;
            };
            println!(
                "[{:>8.0}ms] poll: {:<8} pot {:>8.2}  players {}{}",
                now,
                status.state.name(),
                status.total_pot,
                status.participants.len(),
                if status.state.accepts_joins() { "" } else { "  (closed)" }
            );

            match viz.on_status(&status, now) {
                Ok(Some(summary)) => {
                    print_spin_start(&viz, &summary);
                    spin = Some(summary);
                    frame_no = 0;
                }
                Ok(None) => {}
                Err(e) => println!("             error: {e}"),
            }
        }

        if viz.is_busy() {
            let frame = viz.on_frame(now);
            if frame.spinning && frame_no % every == 0 {
                println!(
                    "[{:>8.0}ms]   offset {:>10.1}px  progress {:.3}",
                    now, frame.offset, frame.progress
                );
            }
            frame_no += 1;

            match frame.event {
                Some(FrameEvent::SpinCompleted) => {
                    if let Some(summary) = &spin {
                        report_landing(&viz, summary, frame.offset)?;
                    }
                }
                Some(FrameEvent::RevealFinished) => {
                    println!("[{:>8.0}ms] reveal finished, polling resumed", now);
                    spin = None;
                }
                None => {}
            }
        }

        now += frame_ms;
    }

    if let Some(error) = viz.error_state() {
        println!("Finished with error state: {error}");
    }
    Ok(())
}

fn print_spin_start(viz: &JackpotVisualizer, summary: &SpinSummary) {
    println!(
        "             spin {}: round {}, {} tiles, target tile {}{}",
        summary.handle.id(),
        summary.round_key,
        summary.tile_count,
        summary.target.position,
        if summary.target.needs_laps { " (+laps)" } else { "" }
    );

    if let Some(frozen) = viz.frozen() {
        let mut counts = vec![0usize; frozen.participants.len()];
        for tile in viz.strip() {
            if let Some(count) = counts.get_mut(tile.original_index) {
                *count += 1;
            }
        }
        for (participant, count) in frozen.participants.iter().zip(counts) {
            println!(
                "               {:<12} bet {:>8.2}  tiles {:>3}",
                participant.username, participant.bet_amount, count
            );
        }
    }
}

fn report_landing(viz: &JackpotVisualizer, summary: &SpinSummary, offset: f64) -> Result<()> {
    let rendered = viz.rendered_strip();
    let index = summary.window.strip_index_under_marker(offset);
    let Some(tile) = rendered.get(index) else {
        bail!("landed on tile {} outside a rendered strip of {}", index, rendered.len());
    };

    println!(
        "             landed on tile {} ({}) -> {} [{}]",
        index, tile.key, tile.username, tile.pattern.display_name
    );

    if tile.original_index != summary.winner_index {
        bail!(
            "landed on participant {} but the winner is {}",
            tile.original_index,
            summary.winner_index
        );
    }
    Ok(())
}
