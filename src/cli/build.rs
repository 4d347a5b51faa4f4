//! The `build` subcommand: run the selected tasks in order.

use anyhow::{Context, Result};
use std::fs;
use std::time::Instant;

use crate::cli::BuildArgs;
use crate::config::PipelineConfig;
use crate::pipeline::TaskReport;
use crate::utils::plural_count;
use crate::{log, logger, task};

pub fn run_build(
    tasks: &[task::Task],
    args: &BuildArgs,
    config: &PipelineConfig,
) -> Result<()> {
    logger::set_verbose(args.verbose);

    let output_dir = config.output_dir();
    if args.clean && output_dir.exists() {
        fs::remove_dir_all(&output_dir)
            .with_context(|| format!("cannot clean {}", output_dir.display()))?;
        log!("build"; "cleaned {}", output_dir.display());
    }

    let order = task::resolve(tasks);
    let started = Instant::now();

    let mut total = TaskReport::default();
    for t in &order {
        let report = task::run(*t, config)?;
        log!("build"; "{t}: {}", report.summary());
        total.merge(&report);
    }

    log!(
        "build";
        "{} done in {:.2}s: {}",
        plural_count(order.len(), "task"),
        started.elapsed().as_secs_f32(),
        total.summary()
    );

    // Per-file failures were already logged and do not fail the build.
    if total.failed > 0 {
        log!("error"; "{} failed to process", plural_count(total.failed, "file"));
    }

    Ok(())
}
