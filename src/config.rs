//! Run configuration and command-line handling
//!
//! ```text
//! feedmei [OPTIONS] <FILE>...
//!
//!   --tape-size <N>            cells on the tape (default 128)
//!   --source-limit <N|none>    longest accepted source in characters (default 2048)
//!   --stomach <N>              index of the stomach cell (default 0)
//!   --tokens                   print each file's tokens to stderr before running
//!   -v, -vv, -vvv              more logging
//!   -h, --help                 show usage
//! ```

use crate::interpreter::constants::{
    DEFAULT_SOURCE_LIMIT, DEFAULT_STOMACH_INDEX, DEFAULT_TAPE_CAPACITY,
};
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;

/// Settings shared by every script in one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tape_capacity: usize,
    /// `None` accepts sources of any length
    pub source_limit: Option<usize>,
    pub stomach_index: usize,
    pub dump_tokens: bool,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tape_capacity: DEFAULT_TAPE_CAPACITY,
            source_limit: Some(DEFAULT_SOURCE_LIMIT),
            stomach_index: DEFAULT_STOMACH_INDEX,
            dump_tokens: false,
            verbosity: 0,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliRequest {
    Run { config: Config, files: Vec<PathBuf> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingValue { flag: String },
    InvalidNumber { flag: String, value: String },
    UnknownFlag { flag: String },
    NoFiles,
    StomachOffTape { stomach: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue { flag } => write!(f, "{} needs a value", flag),
            ConfigError::InvalidNumber { flag, value } => {
                write!(f, "{} expects a positive number, got '{}'", flag, value)
            }
            ConfigError::UnknownFlag { flag } => write!(f, "unknown option '{}'", flag),
            ConfigError::NoFiles => write!(f, "no input file provided"),
            ConfigError::StomachOffTape { stomach, capacity } => write!(
                f,
                "stomach cell {} is not on a tape of {} cells",
                stomach, capacity
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Parse command-line arguments, program name excluded.
    pub fn from_args<I>(args: I) -> Result<CliRequest, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut files = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(CliRequest::Help),
                "--tokens" => config.dump_tokens = true,
                "--tape-size" => {
                    let value = value_for(&arg, args.next())?;
                    config.tape_capacity = positive(&arg, &value)?;
                }
                "--stomach" => {
                    let value = value_for(&arg, args.next())?;
                    config.stomach_index = value.parse().map_err(|_| ConfigError::InvalidNumber {
                        flag: arg.clone(),
                        value: value.clone(),
                    })?;
                }
                "--source-limit" => {
                    let value = value_for(&arg, args.next())?;
                    config.source_limit = if value == "none" {
                        None
                    } else {
                        Some(positive(&arg, &value)?)
                    };
                }
                flag if is_verbosity(flag) => {
                    let steps = flag.len() - 1;
                    config.verbosity = config.verbosity.saturating_add(steps as u8);
                }
                "--" => files.extend(args.by_ref().map(PathBuf::from)),
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(ConfigError::UnknownFlag {
                        flag: flag.to_string(),
                    });
                }
                _ => files.push(PathBuf::from(&arg)),
            }
        }

        if files.is_empty() {
            return Err(ConfigError::NoFiles);
        }
        if config.stomach_index >= config.tape_capacity {
            return Err(ConfigError::StomachOffTape {
                stomach: config.stomach_index,
                capacity: config.tape_capacity,
            });
        }

        Ok(CliRequest::Run { config, files })
    }

    /// Log level for the `-v` count: warnings by default, then info, debug, trace.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [OPTIONS] <FILE>...\n\
         \n\
         Options:\n\
         \x20 --tape-size <N>           cells on the tape (default {DEFAULT_TAPE_CAPACITY})\n\
         \x20 --source-limit <N|none>   longest accepted source in characters (default {DEFAULT_SOURCE_LIMIT})\n\
         \x20 --stomach <N>             index of the stomach cell (default {DEFAULT_STOMACH_INDEX})\n\
         \x20 --tokens                  print each file's tokens before running it\n\
         \x20 -v, -vv, -vvv             more logging (RUST_LOG overrides)\n\
         \x20 -h, --help                show this message"
    )
}

fn is_verbosity(flag: &str) -> bool {
    flag.len() > 1 && flag.starts_with('-') && flag[1..].chars().all(|c| c == 'v')
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingValue {
        flag: flag.to_string(),
    })
}

fn positive(flag: &str, value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}
