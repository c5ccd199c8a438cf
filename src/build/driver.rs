use super::command::{self, CommandLine};
use super::feedback::FeedbackAnalyzer;
use super::inventory::{self, ARTIFACT_EXT, Inventory, SOURCE_EXT, Unit};
use super::invoke::{Invoker, StepOutcome};
use super::plan::{self, BuildPlan};
use super::stale::{self, BuildMode, Staleness};
use super::utils::{check_required_dirs, display_path, ensure_dir, write_compile_commands};
use crate::config::ResolvedConfig;
use crate::error::{BuildError, Result};
use crate::ui;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Print staleness decisions and every command before it runs.
    pub verbose: bool,
    /// Report the plan and commands without touching the filesystem.
    pub dry_run: bool,
    /// Compile jobs. `None` uses one per core, `1` compiles sequentially.
    pub jobs: Option<NonZeroUsize>,
    /// Also write `compile_commands.json` into the project root.
    pub compile_commands: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    UpToDate,
    Built,
    DryRun,
    CompileFailed(Vec<String>),
    LinkFailed(PathBuf),
}

#[derive(Debug, Clone)]
pub struct UnitReport {
    pub name: String,
    pub artifact: PathBuf,
    pub step: StepOutcome,
}

#[derive(Debug, Clone)]
pub struct BuildReport {
    pub mode: BuildMode,
    /// Names of the planned units, in compile order.
    pub planned: Vec<String>,
    pub compiled: Vec<UnitReport>,
    pub link: Option<StepOutcome>,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

impl BuildReport {
    fn new(mode: BuildMode, plan: &BuildPlan, outcome: Outcome, start: Instant) -> Self {
        Self {
            mode,
            planned: plan.units.iter().map(|u| u.name.clone()).collect(),
            compiled: Vec::new(),
            link: None,
            outcome,
            elapsed: start.elapsed(),
        }
    }

    /// Failed compile or link steps become errors; every other outcome passes through.
    pub fn into_result(self) -> Result<Self> {
        match &self.outcome {
            Outcome::CompileFailed(units) => Err(BuildError::CompileStepFailed {
                units: units.clone(),
            }),
            Outcome::LinkFailed(output) => Err(BuildError::LinkStepFailed {
                output: output.clone(),
            }),
            _ => Ok(self),
        }
    }
}

// --- CORE: Build Project ---
pub fn build_project(
    config: &ResolvedConfig,
    options: &BuildOptions,
    invoker: &dyn Invoker,
) -> Result<BuildReport> {
    let start_time = Instant::now();

    // 1. Required directories (nothing is created if one is missing)
    check_required_dirs(config)?;

    // 2. Output directories
    if !options.dry_run {
        ensure_dir("bin", &config.bin_dir)?;
        ensure_dir("obj", &config.obj_dir)?;
    }

    // 3. Inventory, staleness, plan
    let inventory =
        inventory::build_inventory(&config.src_dir, &config.obj_dir, SOURCE_EXT, ARTIFACT_EXT)?;
    let static_libs = inventory::static_libraries(&config.lib_dir)?;
    let staleness = stale::classify(&inventory.sources, &inventory.artifacts);
    let plan = plan::plan(&staleness, &inventory.units);

    if options.verbose {
        print_decisions(config, &inventory, &staleness);
    }

    if options.compile_commands && !options.dry_run {
        let path = write_compile_commands(config, &inventory.units)?;
        println!("   {} Wrote {}", "📝".cyan(), display_path(config, &path));
    }

    if plan.is_empty() {
        if inventory.units.is_empty() {
            println!(
                "{} No .{} files found in {}",
                "!".yellow(),
                SOURCE_EXT,
                display_path(config, &config.src_dir)
            );
        }
        println!("{} No new changes detected", "⚡".green());
        return Ok(BuildReport::new(
            plan.mode,
            &plan,
            Outcome::UpToDate,
            start_time,
        ));
    }

    let link_cmd = command::link_command(config, &inventory.units, &static_libs);

    if options.dry_run {
        print_dry_run(config, &plan, &staleness, &link_cmd);
        return Ok(BuildReport::new(plan.mode, &plan, Outcome::DryRun, start_time));
    }

    println!(
        "{} Starting {} build of {} ({} {} of {} units)...",
        "🔨".cyan(),
        config.profile,
        config.name.bold(),
        plan.mode,
        plan.units.len(),
        inventory.units.len()
    );

    // 4. Compile
    let compiled = compile_units(config, &plan, options, invoker)?;
    let failed: Vec<String> = compiled
        .iter()
        .filter(|r| !r.step.success)
        .map(|r| r.name.clone())
        .collect();

    let mut report = BuildReport::new(plan.mode, &plan, Outcome::Built, start_time);
    report.compiled = compiled;

    if !failed.is_empty() {
        println!(
            "{} {} unit(s) failed to compile, skipping link",
            "x".red(),
            failed.len()
        );
        report.outcome = Outcome::CompileFailed(failed);
        report.elapsed = start_time.elapsed();
        return Ok(report);
    }

    // 5. Link (always after every compile has finished)
    let output = config.output_path();
    if options.verbose {
        println!("   {} {}", "$".dimmed(), link_cmd);
    }
    println!(
        "   {} Linking {}...",
        "🔗".cyan(),
        display_path(config, &output)
    );
    let link = invoker.invoke(&link_cmd);
    if link.success {
        print_warnings(&output.to_string_lossy(), &link.diagnostics);
        println!(
            "{} {} built in {:.2?}",
            "✓".green(),
            display_path(config, &output),
            link.elapsed
        );
        println!("{} Done in {:.2?}", "✓".green(), start_time.elapsed());
    } else {
        println!("{} {} failed", "x".red(), display_path(config, &output));
        print_failure(&link.diagnostics);
        report.outcome = Outcome::LinkFailed(output);
    }

    report.link = Some(link);
    report.elapsed = start_time.elapsed();
    Ok(report)
}

fn compile_units(
    config: &ResolvedConfig,
    plan: &BuildPlan,
    options: &BuildOptions,
    invoker: &dyn Invoker,
) -> Result<Vec<UnitReport>> {
    let verb = match plan.mode {
        BuildMode::Fresh => "built",
        BuildMode::Incremental => "rebuilt",
    };

    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    let pb = ProgressBar::new(plan.units.len() as u64);
    pb.set_style(style);
    pb.set_message("Compiling...");

    let compile_one = |unit: &Unit| -> Result<UnitReport> {
        if let Some(parent) = unit.artifact.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let cmd = command::compile_command(config, unit);
        if options.verbose {
            pb.suspend(|| println!("   {} {}", "$".dimmed(), cmd));
        }
        pb.set_message(format!("Compiling {}", unit.name));

        let step = invoker.invoke(&cmd);

        // Lines go through suspend so they still print when the bar is hidden.
        pb.suspend(|| {
            let shown = display_path(config, &unit.artifact);
            if step.success {
                print_warnings(&unit.source.to_string_lossy(), &step.diagnostics);
                println!(
                    "   {} {} {} in {:.2?}",
                    "✓".green(),
                    shown,
                    verb,
                    step.elapsed
                );
            } else {
                println!("   {} {} failed", "x".red(), shown);
                print_failure(&step.diagnostics);
            }
        });
        pb.inc(1);

        Ok(UnitReport {
            name: unit.name.clone(),
            artifact: unit.artifact.clone(),
            step,
        })
    };

    let results = match options.jobs {
        Some(n) if n.get() == 1 => plan
            .units
            .iter()
            .map(compile_one)
            .collect::<Result<Vec<_>>>()?,
        jobs => {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(n) = jobs {
                builder = builder.num_threads(n.get());
            }
            let pool = builder.build()?;
            pool.install(|| {
                plan.units
                    .par_iter()
                    .map(compile_one)
                    .collect::<Result<Vec<_>>>()
            })?
        }
    };

    pb.finish_and_clear();
    Ok(results)
}

fn print_warnings(origin: &str, diagnostics: &str) {
    if !diagnostics.trim().is_empty() {
        println!("{} Warning in {}:\n{}", "!".yellow(), origin, diagnostics);
    }
}

fn print_failure(diagnostics: &str) {
    if !diagnostics.trim().is_empty() {
        println!("{}", diagnostics.trim_end());
    }
    if let Some(hint) = FeedbackAnalyzer::analyze(diagnostics) {
        println!("\n{} {}\n", "💡".yellow(), hint);
    }
}

fn print_decisions(config: &ResolvedConfig, inventory: &Inventory, staleness: &Staleness) {
    println!(
        "   {} {} mode: {} source(s), {} artifact(s)",
        "ℹ".blue(),
        staleness.mode,
        inventory.sources.len(),
        inventory.artifacts.len()
    );
    for unit in &inventory.units {
        match staleness.stale.get(&unit.name) {
            Some(reason) => println!(
                "     {} {} ({})",
                "•".yellow(),
                display_path(config, &unit.source),
                reason
            ),
            None => println!(
                "     {} {} up to date",
                "•".dimmed(),
                display_path(config, &unit.source)
            ),
        }
    }
    for name in inventory.artifacts.keys() {
        if !inventory.sources.contains_key(name) {
            println!("     {} {} orphan artifact, ignored", "•".dimmed(), name);
        }
    }
}

fn print_dry_run(
    config: &ResolvedConfig,
    plan: &BuildPlan,
    staleness: &Staleness,
    link_cmd: &CommandLine,
) {
    println!(
        "{} DRY RUN: {} {} build of {}",
        "🔍".cyan(),
        plan.mode,
        config.profile,
        config.name.bold()
    );

    let mut table = ui::Table::new(&["Unit", "Reason", "Artifact"]);
    for unit in &plan.units {
        let reason = staleness
            .stale
            .get(&unit.name)
            .map(|r| r.to_string())
            .unwrap_or_default();
        table.add_row(vec![
            unit.name.clone(),
            reason,
            display_path(config, &unit.artifact).to_string(),
        ]);
    }
    table.print();

    println!("Would execute:");
    for unit in &plan.units {
        println!("   {}", command::compile_command(config, unit));
    }
    if plan.link_required {
        println!("   {}", link_cmd);
    }
}
