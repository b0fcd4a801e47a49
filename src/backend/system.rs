use std::path::Path;
use std::process::Command;

use crate::config::CompileFlags;

use super::{BackendCompiler, BackendError};

/// A C compiler found on the `PATH`, invoked as `<program> <source> -o <executable>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCompiler {
    program: String,
}

impl SystemCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn gcc() -> Self {
        Self::new("gcc")
    }

    /// Slower binaries, but copes better with very large generated files
    pub fn tcc() -> Self {
        Self::new("tcc")
    }

    pub fn from_flags(flags: CompileFlags) -> Self {
        if flags.contains(CompileFlags::ALT_BACKEND) {
            Self::tcc()
        } else {
            Self::gcc()
        }
    }

    fn command(&self, source: &Path, executable: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg(source).arg("-o").arg(executable);
        command
    }
}

impl BackendCompiler for SystemCompiler {
    fn compile(&self, source: &Path, executable: &Path) -> Result<(), BackendError> {
        let output = self
            .command(source, executable)
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
        Err(BackendError::Failed {
            program: self.program.clone(),
            status: output.status,
            diagnostics,
        })
    }

    fn name(&self) -> &str {
        &self.program
    }
}
