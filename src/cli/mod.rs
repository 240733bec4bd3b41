//! Command-line interface: argument definitions, handlers, and rendering.

pub mod calc;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod fees;
pub mod margins;
pub mod output;
pub mod paths;
pub mod prefs;

use std::io::IsTerminal;

pub use command::Cli;

use command::{ColorChoice, Commands, ConfigCommand, PrefsCommand};
use diagnostic::ConfigDiagnostic;
use output::OutputConfig;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::preferences::PreferenceStore;

/// Resolve `--color` against the terminal and `NO_COLOR`.
fn use_color(choice: &ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}

/// Log level implied by repeated `-v` flags, if any.
fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Run a parsed command line.
///
/// # Errors
///
/// Returns the first configuration, preferences, or IO error met by the
/// selected command.
#[allow(clippy::result_large_err)]
pub fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, use_color(&cli.color)));

    // `config init` and `config validate` must work when the file is missing
    // or broken, so they do not go through the shared load.
    match &cli.command {
        Commands::Config(ConfigCommand::Init(args)) => {
            return config::execute_init(&cli.config, args.force);
        }
        Commands::Config(ConfigCommand::Validate) => {
            return config::execute_validate(&cli.config);
        }
        _ => {}
    }

    let settings = Config::load_or_default(&cli.config)?;
    settings.init_logging(verbosity_level(cli.verbose));
    if cli.config.exists() {
        info!(path = %cli.config.display(), "configuration loaded");
    } else {
        debug!(path = %cli.config.display(), "no configuration file, using defaults");
    }
    debug!(config = %cli.config.display(), preferences = %cli.preferences.display(), "starting");

    let store = PreferenceStore::new(&cli.preferences);

    match &cli.command {
        Commands::Calc(args) => calc::execute(args, &settings, &store),
        Commands::Compare(args) => calc::compare(args, &settings, &store),
        Commands::Fees(args) => fees::execute(args, &settings),
        Commands::Margins => margins::execute(&settings, &store),
        Commands::Prefs(PrefsCommand::Show) => prefs::execute_show(&store),
        Commands::Prefs(PrefsCommand::Set(args)) => prefs::execute_set(args, &store),
        Commands::Prefs(PrefsCommand::Reset) => prefs::execute_reset(&store),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config, &settings),
        Commands::Config(ConfigCommand::Init(_) | ConfigCommand::Validate) => Ok(()),
    }
}

/// Print a failed command's error.
///
/// Configuration syntax errors get a source-annotated report in text mode.
pub fn report(err: &crate::error::Error) {
    if !output::is_json() {
        if let Some(diagnostic) = ConfigDiagnostic::from_error(err) {
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return;
        }
    }
    output::error(&err.to_string());
}
