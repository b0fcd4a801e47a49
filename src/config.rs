use std::path::{Path, PathBuf};

use bitflags::bitflags;
use thiserror::Error;

pub const DEFAULT_TAPE_SIZE: usize = 50_000;
pub const DEFAULT_OUTPUT: &str = "a.out";

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CompileFlags : u8 {
        /// Print progress to stderr
        const VERBOSE             = 0b001;
        /// Delete the generated C source once the backend is done with it
        const REMOVE_INTERMEDIATE = 0b010;
        /// Use tcc instead of gcc
        const ALT_BACKEND         = 0b100;
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tape size must be at least 1 cell, got {0}")]
    NonPositiveTapeSize(usize),

    #[error("output path can't be empty")]
    EmptyOutput,
}

/// Everything a single compilation needs to know, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    tape_size: usize,
    flags: CompileFlags,
    output: PathBuf,
}

impl Config {
    pub fn new(tape_size: usize, flags: CompileFlags, output: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        if tape_size == 0 {
            return Err(ConfigError::NonPositiveTapeSize(tape_size));
        }

        let output = output.into();
        if output.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutput);
        }

        Ok(Self {
            tape_size,
            flags,
            output,
        })
    }

    pub fn tape_size(&self) -> usize {
        self.tape_size
    }

    pub fn flags(&self) -> CompileFlags {
        self.flags
    }

    pub fn verbose(&self) -> bool {
        self.flags.contains(CompileFlags::VERBOSE)
    }

    /// Path of the executable the backend produces
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Path of the generated C source, the output name with `.c` appended
    pub fn intermediate(&self) -> PathBuf {
        let mut name = self.output.clone().into_os_string();
        name.push(".c");
        PathBuf::from(name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            flags: CompileFlags::empty(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}
