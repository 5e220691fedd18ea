use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Discover build targets and assemble their compile configuration"
)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Target manifest, relative to the root
    #[arg(long, default_value = "buildscout.toml")]
    pub manifest: PathBuf,

    /// Assemble only the named targets instead of every declared one
    #[arg(long, num_args = 1..)]
    pub target: Option<Vec<String>>,

    /// Build in release mode
    #[arg(long)]
    pub release: bool,

    /// Build in optimized mode
    #[arg(long)]
    pub optimize: bool,

    /// Output build commands verbosely
    #[arg(long)]
    pub verbose: bool,

    /// Installation directory
    #[arg(long)]
    pub install_prefix: Option<PathBuf>,

    /// Upper bound on concurrent compile jobs
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Show the IDE project view (sources plus headers) instead of the
    /// compile view
    #[arg(long)]
    pub projects: bool,
}
