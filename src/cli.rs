use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::core::config::{Settings, SettingsArgs};
use crate::core::engine::{Engine, SessionEnd};
use crate::core::logging;
use crate::core::snapshot::SnapshotStore;
use crate::games::tap::{GameController, GameState, TapGame};

#[derive(Parser)]
#[command(name = "tapterm")]
#[command(about = "👆 Tap until you hit the hidden target")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play, resuming the saved game if there is one
    Play,
    /// Print the saved game as JSON
    Status,
    /// Delete the saved game
    Reset,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli.settings)?;
    logging::init(&settings.log_file);

    let store = SnapshotStore::new(&settings.state_file);
    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(&settings, store).await,
        Commands::Status => {
            println!("{}", status_report(&store)?);
            Ok(())
        }
        Commands::Reset => {
            store.clear()?;
            println!("🧹 Saved game removed");
            Ok(())
        }
    }
}

async fn play(settings: &Settings, store: SnapshotStore) -> Result<()> {
    let controller = load_controller(settings, &store);
    let engine = Engine::new(TapGame::new(controller), Some(store));

    let terminal = ratatui::init();
    let result = engine.run(terminal).await;
    ratatui::restore();

    if let SessionEnd::Suspended = result? {
        println!("👋 Game saved, see you soon!");
    }
    Ok(())
}

/// Describes the saved game, flagging snapshots `play` would not resume.
pub fn status_report(store: &SnapshotStore) -> Result<String> {
    let Some(state) = store.load::<GameState>()? else {
        return Ok(format!("No saved game at {}", store.path().display()));
    };

    let json = serde_json::to_string_pretty(&state)?;
    Ok(match state.validate() {
        Ok(()) => json,
        Err(e) => format!("{json}\n⚠️  Saved game is inconsistent ({e}); `play` will start a new game"),
    })
}

/// Resume the saved game when there is a usable one, otherwise start fresh.
pub fn load_controller(settings: &Settings, store: &SnapshotStore) -> GameController {
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if settings.fresh {
        info!("ignoring saved game");
        return GameController::with_rng(rng);
    }

    match store.load::<GameState>() {
        Ok(Some(saved)) => match GameController::restore(saved, rng.clone()) {
            Ok(controller) => {
                info!("resumed saved game");
                controller
            }
            Err(e) => {
                warn!(error = %e, "saved game inconsistent, starting over");
                GameController::with_rng(rng)
            }
        },
        Ok(None) => GameController::with_rng(rng),
        Err(e) => {
            warn!(error = ?e, "saved game unreadable, starting over");
            GameController::with_rng(rng)
        }
    }
}
