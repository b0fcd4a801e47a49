pub mod system;

use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("couldn't start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed with {status}:\n{diagnostics}")]
    Failed {
        program: String,
        status: ExitStatus,
        diagnostics: String,
    },
}

/// Turns a generated C file into an executable.
pub trait BackendCompiler {
    fn compile(&self, source: &Path, executable: &Path) -> Result<(), BackendError>;

    /// Name shown in progress messages
    fn name(&self) -> &str;
}
