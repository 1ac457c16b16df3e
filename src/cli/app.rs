//! Main CLI application

use crate::config::{load_config_auto, load_config_file, Config};
use crate::error::ReadmeError;
use crate::runner::{update, Context, Mode, Outcome, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

/// CLI application
pub struct App {
    /// Parsed configuration
    config: Config,
    /// Directory relative paths resolve against
    base_dir: PathBuf,
}

impl App {
    /// Create a new app, discovering the config file if there is one
    pub fn new() -> Result<Self, ReadmeError> {
        let (config, base_dir) = load_config_auto()?;
        Ok(App { config, base_dir })
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, ReadmeError> {
        let (config, base_dir) = load_config_file(&path)?;
        Ok(App { config, base_dir })
    }

    /// Run the update in `ctx`, rooted at the config directory
    pub fn run(self, ctx: Context) -> Result<Outcome, ReadmeError> {
        let ctx = ctx.with_working_dir(self.base_dir);

        let outcome = update(&self.config, &ctx)?;
        if let Outcome::Printed(text) = &outcome {
            print!("{}", text);
        }
        Ok(outcome)
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("readme-update")
        .version(crate::VERSION)
        .about("Regenerate the usage section of a README from a tool's --help output")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to readme-update.yml config file"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Fail if the document is out of date instead of writing it")
                .action(ArgAction::SetTrue)
                .conflicts_with("dry-run"),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Print the regenerated document instead of writing it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print warnings and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no log output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Get the document disposition from matches
fn get_mode(matches: &ArgMatches) -> Mode {
    if matches.get_flag("check") {
        Mode::Check
    } else if matches.get_flag("dry-run") {
        Mode::DryRun
    } else {
        Mode::Write
    }
}

/// Context carrying the verbosity and mode flags from `matches`
fn context_from_matches(matches: &ArgMatches) -> Context {
    Context::new()
        .with_verbosity(get_verbosity(matches))
        .with_mode(get_mode(matches))
}

/// Install the terminal logger on stderr
fn init_logger(verbosity: Verbosity) {
    let config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .build();

    if let Err(e) = TermLogger::init(
        verbosity.level_filter(),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), ReadmeError> {
    let matches = build_command().get_matches();
    let ctx = context_from_matches(&matches);
    init_logger(ctx.verbosity);

    let app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_config_file(path.clone())?,
        None => App::new()?,
    };

    app.run(ctx)?;
    Ok(())
}
