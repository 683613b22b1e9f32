use crate::output::print_json;
use anyhow::Context;
use std::path::{Path, PathBuf};
use typing_core::{
    checker::{CheckerRunner, CheckerSettings, PyrightRunner, ReportFile},
    recommend::analyze,
    render::render,
};

pub const INSTALL_HINT: &str = "Failed to run pyright. Is it installed? (npm install -g pyright)";

pub fn run(
    root: &Path,
    report: Option<PathBuf>,
    settings: CheckerSettings,
    json: bool,
) -> anyhow::Result<()> {
    let runner: Box<dyn CheckerRunner> = match report {
        Some(path) => Box::new(ReportFile::new(path)),
        None => {
            eprintln!("Running pyright analysis...");
            Box::new(PyrightRunner::new(settings))
        }
    };
    analyze_with(root, runner.as_ref(), json)
}

fn analyze_with(root: &Path, runner: &dyn CheckerRunner, json: bool) -> anyhow::Result<()> {
    let report = match runner.run(root) {
        Ok(report) => report,
        Err(e) if e.is_unavailable() => {
            tracing::debug!("checker unavailable: {e}");
            return Err(anyhow::Error::new(e).context(INSTALL_HINT));
        }
        Err(e) => return Err(e).context("failed to read report"),
    };

    let analysis = analyze(&report, root);
    if json {
        print_json(&analysis)?;
    } else {
        print!("{}", render(&analysis));
    }
    Ok(())
}
