//! fc - match runner
//!
//! Plays seeded matches from the terminal, prints the JSON request schema
//! and runs calibration batches.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fc_core::calibration::CalibrationRun;
use fc_core::commentary::{CommentaryProjector, EventDraft};
use fc_core::models::{PlayerAttributes, PlayerInMatch, Position};
use fc_core::{MatchArchive, MatchSimulator, OfficialPool, SimConfig, SimulatorParts, TeamInMatch, Weather};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fc")]
#[command(about = "Minute-level football match simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and print the commentary as it happens
    Simulate {
        /// JSON match request; prints the JSON response and ignores the other flags
        #[arg(long)]
        request: Option<PathBuf>,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Fixed weather (drawn from the seed when omitted)
        #[arg(long, value_enum)]
        weather: Option<WeatherArg>,

        /// Commentary locale, e.g. "en-US" or "id-ID"
        #[arg(long)]
        locale: Option<String>,

        /// Engine config file (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Wall-clock delay between simulated minutes
        #[arg(long, default_value_t = 0)]
        tick_ms: u64,

        /// Officials JSON file (array); the first active official per role is used
        #[arg(long)]
        officials: Option<PathBuf>,

        /// Generate a crew from the seed
        #[arg(long, default_value = "false")]
        synthetic_officials: bool,

        /// Write a compressed archive of the finished match
        #[arg(long)]
        archive: Option<PathBuf>,
    },

    /// Play a batch of seeded matches and print per-minute event rates
    Calibrate {
        /// Number of matches
        #[arg(long, default_value_t = 200)]
        matches: u32,

        /// First seed of the batch
        #[arg(long, default_value_t = 0)]
        base_seed: u64,

        /// Referee strictness 0-100 (no officials when omitted)
        #[arg(long)]
        strictness: Option<u8>,

        /// Engine config file (YAML or JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the JSON schema of match requests
    Schema,

    /// Print a summary of a match archive
    Inspect {
        /// Archive file path
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WeatherArg {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
}

impl From<WeatherArg> for Weather {
    fn from(arg: WeatherArg) -> Self {
        match arg {
            WeatherArg::Sunny => Weather::Sunny,
            WeatherArg::Cloudy => Weather::Cloudy,
            WeatherArg::Rainy => Weather::Rainy,
            WeatherArg::Snowy => Weather::Snowy,
            WeatherArg::Windy => Weather::Windy,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            request,
            seed,
            weather,
            locale,
            config,
            tick_ms,
            officials,
            synthetic_officials,
            archive,
        } => {
            if let Some(path) = request {
                let body = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading request {}", path.display()))?;
                println!("{}", fc_core::simulate_match_json(&body)?);
                return Ok(());
            }

            let mut config = load_config(config.as_deref())?;
            if let Some(locale) = locale {
                config.locale = locale;
            }
            config.check()?;

            let crew = match (officials, synthetic_officials) {
                (Some(path), _) => {
                    let body = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading officials {}", path.display()))?;
                    Some(OfficialPool::from_json_str(&body)?.default_crew()?)
                }
                (None, true) => Some(OfficialPool::synthetic(seed).default_crew()?),
                (None, false) => None,
            };

            let lang = config.locale.clone();
            let parts = SimulatorParts::new(config);
            let mut sim = MatchSimulator::from_parts(
                demo_squad("Persija Jakarta", 74.0),
                demo_squad("Persib Bandung", 72.0),
                weather.map(Weather::from),
                ChaCha8Rng::seed_from_u64(seed),
                parts,
            );
            if let Some(crew) = crew {
                println!("Referee: {}", crew.referee.official_id);
                sim.assign_officials(crew);
            }
            sim.on_event(|event| println!("{:>2}' {}", event.minute, event.commentary));

            info!(seed, lang = %lang, "kick-off");
            sim.start();
            while sim.state().is_playing {
                if tick_ms > 0 {
                    thread::sleep(Duration::from_millis(tick_ms));
                }
                sim.simulate_minute();
            }

            let state = sim.get_state();
            println!(
                "Full time | {} | possession {}-{} | shots {}-{} | fouls {}-{}",
                state.scoreline(),
                state.possession.home,
                state.possession.away,
                state.shots.home,
                state.shots.away,
                state.fouls.home,
                state.fouls.away,
            );

            if let Some(path) = archive {
                let drafts: Vec<_> = state.events.iter().map(EventDraft::from_event).collect();
                let commentary = CommentaryProjector::new(&lang).project(&drafts);
                MatchArchive::new(state, commentary).with_seed(seed).write_to(&path)?;
                println!("Archive written: {}", path.display());
            }
        }

        Commands::Calibrate {
            matches,
            base_seed,
            strictness,
            config,
        } => {
            let mut run = CalibrationRun::new(demo_squad("Home", 72.0), demo_squad("Away", 72.0), matches)
                .with_base_seed(base_seed);
            run.config = load_config(config.as_deref())?;
            run.config.check()?;
            if let Some(strictness) = strictness {
                let mut crew = OfficialPool::synthetic(base_seed).default_crew()?;
                crew.referee = Arc::new((*crew.referee).clone().with_strictness(strictness));
                run = run.with_crew(crew);
            }
            let report = run.run();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&fc_core::match_request_schema())?);
        }

        Commands::Inspect { path } => {
            let archive = MatchArchive::read_from(&path)?;
            println!(
                "v{} | created {} | seed {:?} | {} | {} events",
                archive.version,
                archive.created_at.to_rfc3339(),
                archive.seed,
                archive.state.scoreline(),
                archive.state.events.len()
            );
            for line in &archive.commentary {
                println!("{:>6}ms [{}] {}", line.t, line.lang, line.text);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => Ok(SimConfig::load(path)?),
        None => Ok(SimConfig::default()),
    }
}

/// 4-4-2 squad with flat attributes around `rating`.
fn demo_squad(name: &str, rating: f64) -> TeamInMatch {
    let positions = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Defender,
        Position::Defender,
        Position::Defender,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Forward,
        Position::Forward,
    ];
    let level = rating.round().clamp(0.0, 100.0) as u8;
    let lineup = positions
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let shirt = i + 1;
            PlayerInMatch::new(format!("{name}-{shirt}"), format!("{name} #{shirt}"), *position, rating)
                .with_attributes(PlayerAttributes {
                    pace: level,
                    shooting: level,
                    passing: level,
                    dribbling: level,
                    defending: level,
                    physical: level,
                })
        })
        .collect();
    TeamInMatch::new(name, lineup)
}
