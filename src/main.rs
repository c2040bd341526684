use clap::Parser;
use moneybook::args::{Args, Command};
use moneybook::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.clone())?.print(),

        Command::Add(add_args) => {
            let config = Config::load(home)?;
            commands::add(&config, add_args.clone())?.print()
        }

        Command::Update(update_args) => {
            let config = Config::load(home)?;
            commands::update(&config, update_args.clone())?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home)?;
            commands::delete(&config, delete_args.clone())?.print()
        }

        Command::List(list_args) => {
            let config = Config::load(home)?;
            commands::list(&config, list_args.clone())?.print()
        }

        Command::Summary => {
            let config = Config::load(home)?;
            commands::summary(&config)?.print()
        }

        Command::Report(report_args) => {
            let config = Config::load(home)?;
            commands::report(&config, report_args.clone())?.print()
        }

        Command::Import(import_args) => {
            let config = Config::load(home)?;
            commands::import(&config, import_args.clone())?.print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home)?;
            commands::export(&config, export_args.clone())?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
