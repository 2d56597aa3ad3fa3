use std::io;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command};
use figment::providers::Serialized;
use log::{error, info};
use thiserror::Error;

use university_elections::{
    config::{Config, DEFAULT_CONFIG_FILE},
    controller::ElectionController,
    db::{schema::TABLES, Database},
    demo,
    error::Error as StorageError,
    logging::{self, LoggingError},
};

const PROGRAM_NAME: &str = "university-elections";

const ABOUT_TEXT: &str = "Register a university election with its candidates and students, \
cast votes, and print the standings.

With no arguments the demonstration runs against a fresh in-memory database.";

const CONFIG: &str = "config";
const DATABASE: &str = "database";
const INSPECT: &str = "inspect";

/// Errors that are critical to the entire program.
#[derive(Debug, Error)]
enum Error {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("Failed to initialise logging: {0}")]
    Logging(#[from] LoggingError),
    #[error("Database failure: {0}")]
    Database(#[from] StorageError),
}

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .arg(
            Arg::new(CONFIG)
                .long(CONFIG)
                .value_name("PATH")
                .help("Configuration file to read")
                .default_value(DEFAULT_CONFIG_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new(DATABASE)
                .long(DATABASE)
                .value_name("PATH")
                .help("SQLite database to use, overriding the configuration")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new(INSPECT)
                .long(INSPECT)
                .help("Print the table layout before running")
                .action(ArgAction::SetTrue),
        )
}

/// Layer the command line on top of the configuration file and environment.
fn load_config(args: &ArgMatches) -> Result<Config, Error> {
    let path = args
        .get_one::<PathBuf>(CONFIG)
        .map_or(Path::new(DEFAULT_CONFIG_FILE), PathBuf::as_path);
    let mut figment = Config::figment(path);
    if let Some(database) = args.get_one::<String>(DATABASE) {
        figment = figment.merge(Serialized::default(DATABASE, database));
    }
    Ok(figment.extract()?)
}

fn run(args: &ArgMatches, config: &Config) -> Result<(), Error> {
    let db = Database::connect(&config.database_config())?;

    if args.get_flag(INSPECT) {
        for table in &TABLES {
            println!("{table}");
        }
    }

    let mut controller = ElectionController::new(&db, io::stdout().lock());
    demo::run(&mut controller);
    drop(controller);

    db.close()?;
    Ok(())
}

fn main() {
    let args = cli().get_matches();

    // Configuration comes first: it says where the logging setup lives.
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1)
        }
    };

    // Set up logging.
    if let Err(err) = logging::init(config.log_config()) {
        eprintln!("{}", Error::from(err));
        std::process::exit(1)
    }

    if let Err(err) = run(&args, &config) {
        error!("{err}");
        error!("Critical failure, shutting down");
        std::process::exit(1)
    }
    info!("Finished");
}
