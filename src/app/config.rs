use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::cli::Cli;
use crate::app::error::ScoutError;
use crate::app::models::{BuildOptions, TargetSpec};

/// On-disk manifest: build options plus the declared targets.
#[derive(Deserialize, Debug, Default)]
pub struct Manifest {
    #[serde(default)]
    options: OptionsTable,
    #[serde(default)]
    targets: Vec<TargetSpec>,
}

/// Partial options table, shared by the manifest and the user presets file.
/// Unset fields fall through to the next layer.
#[derive(Deserialize, Debug, Clone, Default)]
struct OptionsTable {
    release: Option<bool>,
    optimize: Option<bool>,
    verbose: Option<bool>,
    install_prefix: Option<PathBuf>,
    jobs: Option<usize>,
}

/// Load user-level option defaults from ~/.config/buildscout/options.toml.
/// A missing file is fine; a malformed one is not.
fn load_user_presets() -> Result<OptionsTable> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home
        .join(".config")
        .join("buildscout")
        .join("options.toml");

    if !config_path.exists() {
        return Ok(OptionsTable::default());
    }

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read presets at {:?}", config_path))?;
    toml::from_str(&content).context("Failed to parse options.toml")
}

/// Load the target manifest from the project root.
pub fn load_manifest(root: &Path, manifest: &Path) -> Result<Manifest> {
    let path = root.join(manifest);
    if !path.exists() {
        return Err(ScoutError::Config(format!(
            "manifest `{}` not found under `{}`",
            manifest.display(),
            root.display()
        ))
        .into());
    }

    let content =
        fs::read_to_string(&path).context(format!("Failed to read manifest at {:?}", path))?;
    let parsed: Manifest = toml::from_str(&content)
        .map_err(|e| ScoutError::Config(format!("malformed manifest: {e}")))?;
    Ok(parsed)
}

fn default_install_prefix() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\Program Files")
    } else {
        PathBuf::from("/usr")
    }
}

/// Merge build options: CLI flags beat the manifest, which beats the user
/// presets, which beat the built-in defaults. `default_jobs` is the
/// processor count queried once by the caller.
pub fn resolve_options(cli: &Cli, manifest: &Manifest, default_jobs: usize) -> Result<BuildOptions> {
    let presets = load_user_presets()?;
    let table = &manifest.options;

    Ok(BuildOptions {
        release: cli.release || table.release.or(presets.release).unwrap_or(false),
        optimize: cli.optimize || table.optimize.or(presets.optimize).unwrap_or(false),
        verbose: cli.verbose || table.verbose.or(presets.verbose).unwrap_or(false),
        install_prefix: cli
            .install_prefix
            .clone()
            .or_else(|| table.install_prefix.clone())
            .or(presets.install_prefix)
            .unwrap_or_else(default_install_prefix),
        jobs: cli.jobs.or(table.jobs).or(presets.jobs).unwrap_or(default_jobs),
    })
}

/// Pick the targets to assemble. With no `--target` flag every declared
/// target is taken, in manifest order; otherwise each requested name must
/// exist in the manifest.
pub fn select_targets(manifest: &Manifest, requested: Option<&[String]>) -> Result<Vec<TargetSpec>> {
    let Some(names) = requested else {
        return Ok(manifest.targets.clone());
    };

    let mut selected = Vec::new();
    for name in names {
        let spec = manifest
            .targets
            .iter()
            .find(|t| &t.name == name)
            .ok_or_else(|| {
                ScoutError::Config(format!("no target named `{name}` in the manifest"))
            })?;
        selected.push(spec.clone());
    }
    Ok(selected)
}
