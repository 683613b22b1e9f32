use crate::output::print_json;
use serde::Serialize;
use std::path::{Path, PathBuf};
use typing_core::{
    checker::{CheckerRunner, CheckerSettings, PyrightRunner},
    level::Level,
    scaffold::{self, Note},
    TypingError,
};

pub struct InitOptions {
    pub level: Level,
    pub rules: bool,
    pub hook: bool,
    pub harness: bool,
    pub ralph: bool,
    pub assets: Option<PathBuf>,
}

#[derive(Serialize)]
struct StepResult {
    step: &'static str,
    notes: Vec<Note>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct InitOutput<'a> {
    root: &'a Path,
    level: Level,
    baseline: Option<usize>,
    steps: &'a [StepResult],
}

/// Collects step results, printing them as they complete unless JSON output
/// was requested.
struct Steps {
    json: bool,
    results: Vec<StepResult>,
}

impl Steps {
    fn record(&mut self, step: &'static str, result: typing_core::Result<Vec<Note>>) {
        let (notes, error) = match result {
            Ok(notes) => (notes, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        if !self.json {
            for note in &notes {
                print_note(note);
            }
            if let Some(e) = &error {
                eprintln!("  failed:  {step}: {e}");
            }
        }
        self.results.push(StepResult { step, notes, error });
    }

    fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}

pub fn run(
    root: &Path,
    opts: InitOptions,
    settings: CheckerSettings,
    json: bool,
) -> anyhow::Result<()> {
    let hook_command = settings.display();
    let runner = PyrightRunner::new(settings);
    let mut steps = Steps {
        json,
        results: Vec::new(),
    };

    if !json {
        println!("Initializing pyright typing setup in: {}\n", root.display());
    }

    // 1. Checker config, then the baseline it produces
    steps.record("config", scaffold::write_checker_config(root, opts.level));
    let baseline = if steps.failures() == 0 {
        runner.baseline(root)
    } else {
        None
    };
    if !json {
        match baseline {
            Some(count) => println!("  baseline: {count} errors"),
            None => eprintln!("  warning: no baseline, could not run pyright"),
        }
    }

    // 2. Typing discipline rules
    if opts.rules {
        steps.record(
            "rules",
            scaffold::install_rules(root, opts.assets.as_deref()),
        );
    }

    // 3. Findings log (always; idempotent)
    let today = chrono::Local::now().date_naive();
    steps.record(
        "findings",
        scaffold::create_findings_log(root, baseline, today),
    );

    // 4. Pre-commit hook
    if opts.hook {
        steps.record(
            "hook",
            scaffold::install_pre_commit_hook(root, &hook_command),
        );
    }

    // 5. Companion tooling (--full)
    if opts.harness || opts.ralph {
        let home = home::home_dir();
        if opts.harness {
            let result = match &home {
                Some(home) => scaffold::init_long_task_harness(root, home),
                None => Err(TypingError::HomeNotFound),
            };
            steps.record("harness", result);
        }
        if opts.ralph {
            let result = match &home {
                Some(home) => scaffold::install_ralph_wiggum(home),
                None => Err(TypingError::HomeNotFound),
            };
            steps.record("ralph", result);
        }
    }

    let failures = steps.failures();
    if json {
        print_json(&InitOutput {
            root,
            level: opts.level,
            baseline,
            steps: &steps.results,
        })?;
    } else if failures == 0 {
        println!("\nSetup complete!");
        println!("\nNext steps:");
        println!("  1. Run: {hook_command}");
        println!("  2. Run: typing analyze (to see where to start)");
        if let Some(count) = baseline.filter(|c| *c > 0) {
            println!("\nBaseline: {count} errors to fix");
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} setup step(s) failed");
    }
    Ok(())
}

fn print_note(note: &Note) {
    match note {
        Note::Created(m) => println!("  created: {m}"),
        Note::Updated(m) => println!("  updated: {m}"),
        Note::Exists(m) => println!("  exists:  {m}"),
        Note::Warning(m) => eprintln!("  warning: {m}"),
    }
}
