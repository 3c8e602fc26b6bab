use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use add_version::cli::{run_add_version, AddVersionArgs};
use add_version::config;
use add_version::git::Git2Repository;
use add_version::runner::ShellRunner;
use add_version::ui;
use add_version::Version;

#[derive(clap::Parser)]
#[command(
    name = "add-version",
    version,
    about = "Add a new version to CHANGES, to the version constants and to the build properties"
)]
struct Args {
    #[arg(value_name = "VERSION", help = "Version to add, as major.minor.bugfix")]
    new_version: Version,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Skip running the version tests afterwards")]
    no_verify: bool,

    #[arg(short, long, help = "Print debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let root = PathBuf::from(".");

    let workflow_args = AddVersionArgs {
        version: args.new_version,
        root: root.clone(),
        verify: !args.no_verify,
    };

    // Checked before opening the repository so a wrong directory is reported as such
    add_version::cli::orchestration::check_root(&root, &config)?;
    let repo = Git2Repository::open(&root)?;

    run_add_version(&workflow_args, &config, &repo, &ShellRunner)?;
    println!();
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = ctrlc::set_handler(|| {
        println!("\nReceived Ctrl-C, exiting early");
        std::process::exit(0);
    }) {
        tracing::warn!("cannot install Ctrl-C handler: {}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
