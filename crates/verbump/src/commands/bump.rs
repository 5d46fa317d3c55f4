//! Bump command.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use verbump_config::{VersionBumperConfig, detect_file, read_from_file};
use verbump_core::{
    OperationState, VersionBumpResult, VersionBumper, VersionRangeDetector, VersionReleaser,
};
use verbump_git::Repository;
use verbump_version::{VersionRange, VersionTarget};

use crate::commands::EXIT_INVALID;
use crate::output;

/// Arguments for the bump command.
#[derive(Debug, Args)]
pub struct BumpArgs {
    /// Version range (major, minor, next, patch) or explicit version to bump to.
    /// Detected from git history when omitted.
    #[arg(value_name = "RANGE_OR_VERSION")]
    pub range: Option<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not write any files or create commits and tags
    #[arg(long)]
    pub dry_run: bool,

    /// Commit modified files and tag the new version
    #[arg(short, long)]
    pub release: bool,

    /// Fail if any file pattern is unmatched
    #[arg(long)]
    pub strict: bool,
}

/// Runs the bump command.
pub fn run(args: BumpArgs) -> Result<ExitCode> {
    let cwd = env::current_dir().context("failed to determine working directory")?;

    let config_path = match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => detect_file(&cwd),
    };
    let Some(config_path) = config_path else {
        eprintln!("Please provide a config file path using the --config option.");
        return Ok(ExitCode::from(EXIT_INVALID));
    };

    let mut config = read_from_file(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    config.perform_dry_run(args.dry_run);
    info!(path = %config_path.display(), "loaded config");

    let root_path = config.root_path().map_or_else(|| cwd.clone(), Path::to_path_buf);

    let target = match &args.range {
        Some(input) => VersionTarget::from_input(input).with_context(|| {
            format!(
                "expected one of {} or an explicit version",
                VersionRange::all().join(", ")
            )
        })?,
        None => {
            let range = detect_range(&config, &root_path)?;
            println!("Detected version range: {range}");
            println!();
            VersionTarget::Range(range)
        }
    };

    let results = VersionBumper::new()
        .bump(config.files_to_modify(), &root_path, &target, args.dry_run)
        .context("failed to bump versions")?;
    print!("{}", output::render_results(&results, &root_path));

    if args.strict && has_unmatched(&results) {
        eprintln!();
        eprintln!("Some file patterns were not matched (strict mode).");
        return Ok(ExitCode::FAILURE);
    }

    if args.release {
        let repo = Repository::open(&root_path)?;
        let release = VersionReleaser::new(&repo)
            .release(&results, config.release_options(), args.dry_run)
            .context("failed to release version")?;

        println!();
        print!("{}", output::render_release(&release));
    }

    if args.dry_run {
        println!();
        println!("No write operations were performed (dry-run mode).");
    }

    Ok(ExitCode::SUCCESS)
}

fn detect_range(config: &VersionBumperConfig, root_path: &Path) -> Result<VersionRange> {
    let indicators = config.version_range_indicators();
    if indicators.is_empty() {
        bail!("no version range given and no version range indicators configured");
    }

    let repo = Repository::open(root_path)?;
    VersionRangeDetector::new(&repo)
        .detect(indicators, None)
        .context("failed to detect version range")?
        .context("unable to detect a version range from git history")
}

fn has_unmatched(results: &[VersionBumpResult]) -> bool {
    results
        .iter()
        .flat_map(VersionBumpResult::operations)
        .any(|operation| operation.state() == OperationState::Unmatched)
}
