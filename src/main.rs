//! wt-assets - An asset pipeline for Wt web applications.

mod cli;
mod config;
mod logger;
mod pipeline;
mod task;
mod transform;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    match &cli.command {
        Commands::Init { dir } => cli::init::new_tree(dir.as_deref()),
        Commands::List => {
            cli::list::print_tasks();
            Ok(())
        }
        Commands::Build { tasks, build_args } => {
            let config = PipelineConfig::load(&cli.config)?;
            cli::build::run_build(tasks, build_args, &config)
        }
    }
}
