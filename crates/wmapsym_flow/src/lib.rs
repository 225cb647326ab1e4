//! Entry point that parses the command line argument
//! and provides a shared way for interfaces to handle the start flow.

use std::{fs, io};

use clap::Parser;
use ron::error::SpannedError;
use thiserror::Error;
use wmapsym_core::settings::ConvertSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartFlow {
    /// Ask for maps until the input ends.
    Interactive,
    /// Convert a single map and exit.
    Convert { settings: ConvertSettings },
}

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("can't read config {path}: {error}")]
    ReadingConfig { path: String, error: io::Error },
    #[error("can't parse config {path}: {error}")]
    ParsingConfig { path: String, error: SpannedError },
}

impl StartFlow {
    pub fn from_args() -> Result<StartFlow, FlowError> {
        FlowArgs::parse().try_into()
    }
}

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct FlowArgs {
    /// Conversion config path (ron)
    #[arg(short, long)]
    config: Option<String>,

    /// Map to convert, skips the interactive prompt
    #[arg(short, long)]
    input: Option<String>,

    /// Clockwise rotation of the sample quadrant in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    rotation: Option<i32>,

    /// Where to write the result
    #[arg(short, long)]
    output: Option<String>,
}

impl TryFrom<FlowArgs> for StartFlow {
    type Error = FlowError;

    fn try_from(value: FlowArgs) -> Result<Self, Self::Error> {
        let mut settings = match &value.config {
            Some(path) => {
                let config_str = fs::read_to_string(path).map_err(|error| {
                    FlowError::ReadingConfig {
                        path: path.clone(),
                        error,
                    }
                })?;
                ConvertSettings::from_string(&config_str).map_err(|error| {
                    FlowError::ParsingConfig {
                        path: path.clone(),
                        error,
                    }
                })?
            }
            None if value.input.is_none() => return Ok(StartFlow::Interactive),
            None => ConvertSettings::default(),
        };

        if let Some(input) = value.input {
            settings = settings.with_path(input);
        }
        if let Some(rotation) = value.rotation {
            settings = settings.with_rotation(rotation);
        }
        if value.output.is_some() {
            settings.output = value.output;
        }
        Ok(StartFlow::Convert { settings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(args: &[&str]) -> StartFlow {
        let args = FlowArgs::try_parse_from(std::iter::once("wmapsym").chain(args.iter().copied()))
            .unwrap();
        args.try_into().unwrap()
    }

    #[test]
    fn no_arguments_is_interactive() {
        assert_eq!(flow(&[]), StartFlow::Interactive);
    }

    #[test]
    fn rotation_without_input_is_interactive() {
        assert_eq!(flow(&["-r", "90"]), StartFlow::Interactive);
    }

    #[test]
    fn one_shot() {
        let StartFlow::Convert { settings } = flow(&["-i", "caves.map", "-r", "-90"]) else {
            panic!("expected a conversion");
        };
        assert_eq!(settings.path, "caves.map");
        assert_eq!(settings.rotation, -90);
        assert_eq!(settings.output, None);
    }

    #[test]
    fn missing_config() {
        let args = FlowArgs {
            config: Some("/nonexistent/wmapsym.ron".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            StartFlow::try_from(args),
            Err(FlowError::ReadingConfig { .. })
        ));
    }
}
