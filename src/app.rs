// Declare modules
pub mod assembler;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod jobs;
pub mod models;
pub mod walker;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::env;

use self::assembler::Assembler;
use self::cli::Cli;
use self::config::{load_manifest, resolve_options, select_targets};
use self::formatter::OutputGenerator;
use self::models::TargetAssembly;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify Project Root
    let root = match &args.root {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    // 3. Resolve Configuration
    let manifest = load_manifest(&root, &args.manifest)?;
    let options = resolve_options(&args, &manifest, jobs::available_jobs())?;
    let targets = select_targets(&manifest, args.target.as_deref())?;

    if targets.is_empty() {
        log::warn!("💡 Tip: The manifest declares no targets; nothing to assemble.");
        return Ok(());
    }

    if options.verbose && options.jobs > 1 {
        log::info!("Using up to {} compile jobs", options.jobs);
    }

    // 4. Assemble each target, keyed by name for downstream lookup
    let assembler = Assembler::new(root);
    let mut assemblies: BTreeMap<String, TargetAssembly> = BTreeMap::new();
    for spec in &targets {
        let assembly = assembler
            .assemble(spec, &options)
            .context(format!("Failed to assemble target `{}`", spec.name))?;
        if assembly.config.sources.is_empty() {
            log::warn!("Target `{}` has no source files", spec.name);
        }
        assemblies.insert(spec.name.clone(), assembly);
    }

    // 5. Generate Output, in manifest order, looked up by name
    let ordered: Vec<&TargetAssembly> = targets
        .iter()
        .map(|spec| &assemblies[spec.name.as_str()])
        .collect();
    let output = OutputGenerator::render_all(&ordered, args.projects);

    // 6. Print to Stdout
    println!("{}", output);

    Ok(())
}
