use std::{
    io::{self, Read},
    path::Path,
};

mod audit;
mod codes;
mod compile;
mod extract;
mod init;
mod terminal;

use audit::Audit;
use clap::ArgAction;
use codes::Codes;
use compile::Compile;
use extract::Extract;
use init::Init;
use prereq::{Config, CourseId};

/// Parse a course identifier, normalizing to uppercase.
///
/// This is a CLI boundary function that accepts lowercase input.
fn parse_course(s: &str) -> Result<CourseId, String> {
    s.to_uppercase().parse().map_err(|e| format!("{e}"))
}

/// Returns the given text, or all of stdin when none was given.
fn text_or_stdin(text: Option<String>) -> anyhow::Result<String> {
    text.map_or_else(
        || {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        },
        Ok,
    )
}

/// Loads the configuration at `path`, or the defaults when no path is given.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    path.map_or_else(
        || Ok(Config::default()),
        |path| Config::load(path).map_err(anyhow::Error::msg),
    )
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Compile the requisite text of a single course
    ///
    /// Prints the compiled record as JSON.
    Compile(Compile),

    /// List the course identifiers mentioned in a text
    Codes(Codes),

    /// Compile every row of a JSON Lines catalog export
    Extract(Extract),

    /// Audit extracted output for structural problems
    Audit(Audit),

    /// Write a configuration file with the default field-resolution policy
    Init(Init),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Compile(command) => command.run(),
            Self::Codes(command) => command.run(),
            Self::Extract(command) => command.run(),
            Self::Audit(command) => command.run(),
            Self::Init(command) => command.run(),
        }
    }
}
