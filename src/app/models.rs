use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::app::error::ScoutError;

/// Output policy for a target. Selects which linker/archiver invocation the
/// downstream collaborator performs; this crate never invokes either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    Executable,
    SharedLibrary,
    StaticLibrary,
}

impl std::str::FromStr for TargetKind {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "executable" => Ok(TargetKind::Executable),
            "shared-library" => Ok(TargetKind::SharedLibrary),
            "static-library" => Ok(TargetKind::StaticLibrary),
            other => Err(ScoutError::Config(format!(
                "unrecognized output kind `{other}` (expected executable, shared-library or static-library)"
            ))),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetKind::Executable => "executable",
            TargetKind::SharedLibrary => "shared-library",
            TargetKind::StaticLibrary => "static-library",
        };
        f.write_str(s)
    }
}

/// One target as declared in the manifest, before any filesystem work.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    pub kind: TargetKind,
    pub subfolder: PathBuf,
    /// Extra include paths on top of the subfolder itself.
    #[serde(default)]
    pub include: Vec<PathBuf>,
}

/// Assembled configuration for one target, handed to the
/// compiler-invocation collaborator. Immutable after assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetConfig {
    pub name: String,
    pub kind: TargetKind,
    pub include_paths: Vec<PathBuf>,
    pub sources: BTreeSet<PathBuf>,
}

/// Deferred actions the caller applies after assembly. Assembly itself is a
/// pure function; nothing here has happened yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Install the built artifact under the given directory.
    Install { artifact: String, dest: PathBuf },
    /// Emit an IDE project file listing sources and headers.
    ProjectFile { file_name: String },
}

/// Result of assembling one target: the compile configuration, the header
/// set (IDE metadata only, never compiled), and pending side effects.
#[derive(Debug, Clone)]
pub struct TargetAssembly {
    pub config: TargetConfig,
    pub headers: BTreeSet<PathBuf>,
    pub effects: Vec<SideEffect>,
}

/// Build options merged from CLI, manifest and user presets. Consumed as
/// opaque configuration by everything below the application layer.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub release: bool,
    pub optimize: bool,
    pub verbose: bool,
    pub install_prefix: PathBuf,
    /// Upper bound on concurrent compile jobs, advisory only.
    pub jobs: usize,
}
