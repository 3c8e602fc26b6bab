//! Main workflow orchestration logic
//!
//! Decides which artifacts a new version touches and patches each one in
//! turn. Files are independent: a failure part-way leaves the earlier files
//! patched, and re-running picks up where it stopped since every edit is
//! idempotent.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::domain::{BranchType, MajorWindow, Version};
use crate::error::{AddVersionError, Result};
use crate::git::Repository;
use crate::policies::{add_constant, update_build_version, update_changes, update_latest_constant};
use crate::properties::Properties;
use crate::runner::CommandRunner;
use crate::ui;

/// Arguments for the add-version workflow
///
/// Decoupled from the CLI so the workflow can be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct AddVersionArgs {
    /// Version being added
    pub version: Version,

    /// Root of the source checkout
    pub root: PathBuf,

    /// Run the verification command after adding a constant
    pub verify: bool,
}

/// What the workflow did
///
/// File fields are `Some(changed)` when the step ran and `None` when it
/// did not apply to this version.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub current_version: Version,
    pub branch_type: BranchType,
    pub is_latest: bool,
    pub changelog: bool,
    pub constant: Option<bool>,
    pub build_version: Option<bool>,
    pub latest_constant: Option<bool>,
    /// Manual steps left to the operator
    pub followups: Vec<String>,
    pub verified: bool,
}

/// Fail unless `root` looks like a source checkout
pub fn check_root(root: &Path, config: &Config) -> Result<()> {
    if root.join(&config.marker_file).is_file() {
        Ok(())
    } else {
        Err(AddVersionError::precondition(format!(
            "{} not found: tool must be run from the root of a source checkout",
            config.marker_file
        )))
    }
}

/// Read the version the checkout currently builds
pub fn find_current_version(root: &Path, config: &Config) -> Result<Version> {
    let properties = Properties::load(&root.join(&config.build.path))?;
    Version::parse(properties.require(&config.build.version_key)?)
}

fn step(message: &str, apply: impl FnOnce() -> Result<bool>) -> Result<bool> {
    ui::display_progress(message);
    match apply() {
        Ok(changed) => {
            ui::display_outcome(changed);
            Ok(changed)
        }
        Err(e) => {
            println!();
            Err(e)
        }
    }
}

/// Main add-version workflow
///
/// 1. Check the checkout root and read the current version
/// 2. Classify the branch
/// 3. Add a changelog section
/// 4. Add a version constant if the version is latest or still back-compat
/// 5. For the latest version, bump the build version and the latest alias
/// 6. Print follow-ups for a major release, otherwise run verification
///
/// # Arguments
///
/// * `args` - Version, checkout root and verification switch
/// * `config` - Artifact layout
/// * `repo` - Source of the current branch name
/// * `runner` - Executes the verification command
pub fn run_add_version<R, C>(
    args: &AddVersionArgs,
    config: &Config,
    repo: &R,
    runner: &C,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    C: CommandRunner + ?Sized,
{
    check_root(&args.root, config)?;
    let current_version = find_current_version(&args.root, config)?;
    let branch_type = BranchType::from_branch_name(&repo.current_branch()?)?;
    let new_version = args.version;
    let is_latest = new_version.on_or_after(&current_version);
    debug!(%current_version, %new_version, is_latest, "versions resolved");

    ui::display_status(&format!("branch_type is {}", branch_type));
    ui::display_heading(&format!("Adding new version {}", new_version));

    let sections = if new_version.is_bugfix_release() {
        &config.changelog.bugfix_sections
    } else {
        &config.changelog.feature_sections
    };
    let changelog = step(
        &format!("adding new section to {}", config.changelog.path),
        || {
            update_changes(
                &args.root.join(&config.changelog.path),
                &new_version,
                &config.changelog.init_changes,
                sections,
            )
        },
    )?;

    let style = config.constant_style();
    let constants_path = args.root.join(&config.constants.path);
    let window = MajorWindow::new(config.compat.supported_majors);
    let latest_or_backcompat =
        is_latest || current_version.is_back_compat_with(&new_version, &window)?;

    let constant = if latest_or_backcompat {
        Some(step(
            &format!("adding constant {}", style.constant_name(&new_version)),
            || add_constant(&constants_path, &new_version, &style, !is_latest),
        )?)
    } else {
        ui::display_status(&format!(
            "Not adding constant for version {} because it is no longer supported",
            new_version
        ));
        None
    };

    let (build_version, latest_constant) = if is_latest {
        ui::display_heading("Updating latest version");
        let build_version = step(&format!("changing {}", config.build.version_key), || {
            update_build_version(
                &args.root.join(&config.build.path),
                &config.build.version_key,
                &new_version,
            )
        })?;
        let latest_constant = step(
            &format!(
                "changing {} to {}",
                config.constants.latest_alias,
                style.constant_name(&new_version)
            ),
            || {
                update_latest_constant(
                    &constants_path,
                    &new_version,
                    &style,
                    &config.constants.latest_alias,
                )
            },
        )?;
        (Some(build_version), Some(latest_constant))
    } else {
        (None, None)
    };

    let mut followups = Vec::new();
    let mut verified = false;
    if new_version.is_major_release() {
        followups = config.followups.major_release.clone();
        ui::display_followups(&followups);
    } else if latest_or_backcompat {
        if args.verify {
            ui::display_heading("Testing changes");
            step("checking version tests", || {
                runner.run(&config.verify.command, &args.root).map(|_| true)
            })?;
            verified = true;
        } else {
            ui::display_status("Skipping version tests");
        }
    }

    ui::display_success(&format!("Adding new version {} complete", new_version));

    Ok(WorkflowResult {
        current_version,
        branch_type,
        is_latest,
        changelog,
        constant,
        build_version,
        latest_constant,
        followups,
        verified,
    })
}
