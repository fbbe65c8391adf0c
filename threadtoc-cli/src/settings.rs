use std::{fs, path::PathBuf};

use clap::Args;
use threadtoc_core::{EmptyPolicy, HeadingLevel, MAX_HEADING_LEVEL, MarkerPolicy, Settings};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Options shared by every subcommand
#[derive(Args, Debug, Default)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally booleans
pub struct SettingsArgs {
    /// TOML file with settings; flags below override it
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Deepest heading level to include
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_HEADING_LEVEL))
    )]
    pub max_level: Option<HeadingLevel>,

    /// Only include level 1 headings
    #[arg(long, global = true)]
    pub strict: bool,

    /// Render a "no headers found" box instead of nothing when there are too few headers
    #[arg(long, global = true)]
    pub placeholder: bool,

    /// Replace every marker paragraph, not just the first
    #[arg(long, global = true)]
    pub replace_all_markers: bool,
}

impl SettingsArgs {
    /// Settings from the file (or defaults), with command line flags applied on top.
    pub fn load(&self) -> Result<Settings, Error> {
        let base = match &self.settings {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })?;
                toml::from_str(&content).map_err(|source| Error::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            None => Settings::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(level) = self.max_level {
            settings.max_level = level;
        }
        if self.strict {
            settings.strict = true;
        }
        if self.placeholder {
            settings.empty_policy = EmptyPolicy::Placeholder;
        }
        if self.replace_all_markers {
            settings.marker_policy = MarkerPolicy::All;
        }
        settings
    }
}
