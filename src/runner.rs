//! Loading and running scripts
//!
//! A [`Script`] is one source file scanned into tokens. [`run_all`] runs a
//! list of them in order, each on its own zeroed tape:
//! - a script that fails is reported and the next one runs
//! - `:` or starvation ends the whole run, as if the process had exited

use crate::config::Config;
use crate::interpreter::constants::{EXIT_ERROR, EXIT_STARVED, EXIT_SUCCESS};
use crate::interpreter::{Interpreter, Outcome, RuntimeError};
use crate::lexer::{tokenize, LexError, Token};
use crate::memory::{CellOutOfRange, Tape};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Anything that stops a single script from running to an [`Outcome`]
#[derive(Debug)]
pub enum ScriptError {
    FileNotFound { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    /// The configured stomach index is not on the configured tape
    Tape(CellOutOfRange),
    Lex(LexError),
    Runtime(RuntimeError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::FileNotFound { path } => {
                write!(f, "File '{}' not found", path.display())
            }
            ScriptError::Io { path, source } => {
                write!(f, "Could not read '{}': {}", path.display(), source)
            }
            ScriptError::Tape(err) => write!(f, "Invalid tape: stomach {}", err),
            ScriptError::Lex(err) => write!(f, "{}", err),
            ScriptError::Runtime(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::FileNotFound { .. } => None,
            ScriptError::Io { source, .. } => Some(source),
            ScriptError::Tape(err) => Some(err),
            ScriptError::Lex(err) => Some(err),
            ScriptError::Runtime(err) => Some(err),
        }
    }
}

impl From<LexError> for ScriptError {
    fn from(err: LexError) -> Self {
        ScriptError::Lex(err)
    }
}

impl From<RuntimeError> for ScriptError {
    fn from(err: RuntimeError) -> Self {
        ScriptError::Runtime(err)
    }
}

/// A scanned program, ready to run
#[derive(Debug, Clone)]
pub struct Script {
    tokens: Vec<Token>,
}

impl Script {
    pub fn from_source(source: &str, config: &Config) -> Result<Self, ScriptError> {
        let tokens = tokenize(source, config.source_limit)?;
        Ok(Script { tokens })
    }

    /// Read and scan a file.
    ///
    /// Sources are byte streams: each byte becomes one character (Latin-1),
    /// so any file scans, whatever its encoding.
    pub fn load(path: &Path, config: &Config) -> Result<Self, ScriptError> {
        let bytes = fs::read(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ScriptError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ScriptError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        let source: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::from_source(&source, config)
    }

    /// One line per token: location, kind and lexeme
    pub fn token_listing(&self) -> String {
        self.tokens
            .iter()
            .map(|t| format!("{:>4}:{:<3} {}\n", t.location.line, t.location.column, t))
            .collect()
    }

    /// Run on a fresh tape
    pub fn run<R: BufRead, W: Write>(
        self,
        config: &Config,
        input: R,
        output: W,
    ) -> Result<Outcome, ScriptError> {
        let tape = Tape::new(config.tape_capacity, config.stomach_index)
            .map_err(ScriptError::Tape)?;
        let mut interpreter = Interpreter::new(self.tokens, tape, input, output);
        Ok(interpreter.run()?)
    }
}

/// Result of running every file on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
    /// Set when `:` or starvation cut the run short
    pub ending: Option<Outcome>,
}

impl RunSummary {
    pub fn exit_code(&self) -> i32 {
        if self.ending == Some(Outcome::Starved) {
            EXIT_STARVED
        } else if self.failed > 0 {
            EXIT_ERROR
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Run `files` in order, sharing one input and one output stream.
///
/// `report` is called for each script that fails; token listings (with
/// `--tokens`) go to `diagnostics`.
pub fn run_all<R, W, D, F>(
    files: &[PathBuf],
    config: &Config,
    input: &mut R,
    output: &mut W,
    diagnostics: &mut D,
    mut report: F,
) -> io::Result<RunSummary>
where
    R: BufRead,
    W: Write,
    D: Write,
    F: FnMut(&Path, &ScriptError),
{
    let mut summary = RunSummary::default();

    for path in files {
        info!("running {}", path.display());

        let result = Script::load(path, config).and_then(|script| {
            if config.dump_tokens {
                writeln!(diagnostics, "tokens of {}:", path.display())
                    .and_then(|_| diagnostics.write_all(script.token_listing().as_bytes()))
                    .map_err(RuntimeError::from)?;
            }
            script.run(config, &mut *input, &mut *output)
        });

        match result {
            Ok(Outcome::Completed) => {
                info!("{} completed", path.display());
                summary.completed += 1;
            }
            Ok(ending) => {
                info!("{} ended the run: {:?}", path.display(), ending);
                summary.completed += 1;
                summary.ending = Some(ending);
                break;
            }
            Err(err) => {
                summary.failed += 1;
                report(path, &err);
            }
        }
    }

    output.flush()?;
    Ok(summary)
}
