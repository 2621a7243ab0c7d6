//! verify-evg-config-changes CLI
//!
//! Analyses Evergreen project configuration changes and prints the
//! `evergreen patch` arguments selecting every affected build variant and
//! task.

use clap::{Parser, Subcommand};
use evgverify_core::logging_facility;
use evgverify_core_types::RunContext;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "verify-evg-config-changes")]
#[command(
    about = "Evergreen project configuration changes verifier",
    long_about = "Evergreen project configuration changes verifier.\n\n\
This tool analyses evergreen project configuration changes and evaluates what build \
variants and tasks are affected by the changes. As a result it prints out the command \
line arguments for the `evergreen patch` command with build variant and task names. \
Those arguments can be passed to `evergreen patch` to create a patch testing the changes."
)]
struct Cli {
    #[command(flatten)]
    global: commands::output::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare the working tree's configuration with the target branch merge base
    Verify(commands::verify::VerifyArgs),
    /// Compare two already evaluated configuration files
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.global.log_format.profile(), cli.global.verbose);

    let ctx = RunContext::new();
    let result = match cli.command {
        Commands::Verify(args) => commands::verify::execute(args, &cli.global, &ctx),
        Commands::Compare(args) => commands::compare::execute(args, &cli.global, &ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
