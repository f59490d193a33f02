mod api_handler;
mod config;
mod logger;
mod server_config;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{TicTacToeGameState, TicTacToeSession};

use config::{ConfigManager, Validate};
use server_config::{DEFAULT_CONFIG_PATH, ServerConfig};
use web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// YAML config file; defaults apply when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the effective config back to the config file
    #[arg(long)]
    write_default_config: bool,

    /// Seed for the computer opponent, overrides `rng_seed`
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = ConfigManager::<_, ServerConfig>::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    if let Some(seed) = args.seed {
        config.rng_seed = Some(seed);
    }
    config.validate()?;

    if args.write_default_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", args.config.display());
    }

    let rng = match config.rng_seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Bot seed: {}", rng.seed());

    let game_state = TicTacToeGameState::new(config.default_mode, config.default_player_name.clone());
    let state = WebServerState::new(TicTacToeSession::new(game_state, rng));

    let addr = config.socket_addr()?;
    let static_files_path = PathBuf::from(&config.static_files_path);
    log!(
        "Tic-tac-toe server starting on {} (mode: {}, static files: {})",
        addr,
        config.default_mode,
        static_files_path.display()
    );

    run_web_server(state, addr, &static_files_path).await?;

    log!("Server shut down gracefully");

    Ok(())
}
