use std::path::PathBuf;

use clap::Parser;
use prereq::Config;
use tracing::instrument;

use super::terminal::{Tone, paint};

#[derive(Debug, Parser)]
pub struct Init {
    /// Where to write the configuration
    #[arg(default_value = "prereq.toml")]
    path: PathBuf,

    /// Extra requisite text columns, tried before the default ones
    #[arg(long = "text-key", value_name = "COLUMN")]
    text_keys: Vec<String>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        if self.path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.path.display()
            );
        }

        self.config()
            .save(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", self.path.display()))?;

        let created = format!("Created {}", self.path.display());
        println!("{}", paint(&created, Tone::Good));
        Ok(())
    }

    /// The default policy with the requested text columns in front, in the
    /// order given.
    fn config(&self) -> Config {
        let mut config = Config::default();
        for key in self.text_keys.iter().rev() {
            if !config.prepend_text_key(key.clone()) {
                tracing::warn!(%key, "text column is already configured");
            }
        }
        config
    }
}
