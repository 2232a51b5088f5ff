use bw_app::{
    AppError, AppResult, RunOptions, RunProgressEvent, RunRequest, RunStage, project_service,
    query, run_service,
};
use bw_core::units::{newton, to_kilonewton, to_megawatt, watt};
use bw_results::RunType;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bladewake")]
#[command(about = "bladewake - time-domain BEM rotor and airfoil simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a project file parses and is consistent
    Validate {
        /// Project file (.yaml or .json)
        project_path: PathBuf,
    },
    /// List studies in a project
    Studies {
        /// Project file (.yaml or .json)
        project_path: PathBuf,
    },
    /// Run a study, reusing a cached result when the inputs are unchanged
    Run {
        /// Project file (.yaml or .json)
        project_path: PathBuf,
        /// Study ID to simulate
        study_id: String,
        /// Ignore any cached run and simulate again
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs of a study
    Runs {
        /// Project file (.yaml or .json)
        project_path: PathBuf,
        /// Study ID to list runs for
        study_id: String,
    },
    /// Print the manifest and summary of a stored run
    ShowRun {
        /// Project file (.yaml or .json)
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export a time series from a run as CSV
    ExportSeries {
        /// Project file (.yaml or .json)
        project_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Variable name: rotor (thrust, power, ct, cp, pitch, blade_thrust:<b>),
        /// element (pn, pt, wy, wz, fs, cl, aoa, wind, x, y, z, azimuth) or
        /// airfoil (x, v, fs)
        variable: String,
        /// Blade index, selects an element variable together with --element
        #[arg(long, requires = "element")]
        blade: Option<usize>,
        /// Element index along the blade
        #[arg(long, requires = "blade")]
        element: Option<usize>,
        /// Write the CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Studies { project_path } => cmd_studies(&project_path),
        Commands::Run {
            project_path,
            study_id,
            no_cache,
        } => cmd_run(&project_path, &study_id, !no_cache),
        Commands::Runs {
            project_path,
            study_id,
        } => cmd_runs(&project_path, &study_id),
        Commands::ShowRun {
            project_path,
            run_id,
        } => cmd_show_run(&project_path, &run_id),
        Commands::ExportSeries {
            project_path,
            run_id,
            variable,
            blade,
            element,
            output,
        } => cmd_export_series(
            &project_path,
            &run_id,
            &variable,
            blade.zip(element),
            output.as_deref(),
        ),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Checking {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ {} studies, {} airfoils", project.studies.len(), project.airfoils.len());
    Ok(())
}

fn cmd_studies(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let studies = project_service::list_studies(&project);

    if studies.is_empty() {
        println!("No studies found in project");
    } else {
        println!("Studies in project:");
        for study in studies {
            println!(
                "  {} - {} ({}, {:.1} s)",
                study.id, study.name, study.kind, study.duration_s
            );
        }
    }
    Ok(())
}

fn cmd_run(project_path: &Path, study_id: &str, use_cache: bool) -> AppResult<()> {
    println!("Running study: {}", study_id);

    let request = RunRequest {
        project_path,
        study_id,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let mut last_stage = None;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event| {
            let fraction = event
                .transient
                .as_ref()
                .map(|t| t.fraction_complete)
                .unwrap_or(-1.0);
            let emit_now = last_stage != Some(event.stage)
                || (fraction >= 0.0 && (fraction - last_fraction).abs() >= 0.005)
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);

    let (_manifest, records) = run_service::load_run(project_path, &response.run_id)?;
    print_run_summary(&records)
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.transient) {
        (RunStage::RunningBem | RunStage::RunningSpringAirfoil, Some(t)) => {
            let width = 28usize;
            let filled = ((t.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            let mut line = format!(
                "\r[{}] {:>6.2}%  {}  t={:.2}/{:.2}s  step={}/{}",
                bar,
                t.fraction_complete * 100.0,
                event.stage.label(),
                t.sim_time_s,
                t.t_end_s,
                t.step,
                t.total_steps
            );
            if let (Some(thrust), Some(power)) = (t.thrust_n, t.power_w) {
                line.push_str(&format!(
                    "  T={:.1} kN  P={:.3} MW",
                    to_kilonewton(newton(thrust)),
                    to_megawatt(watt(power))
                ));
            }
            line.push_str(&format!("  elapsed={:.1}s", event.elapsed_wall_s));
            print!("{}", line);
            let _ = io::stdout().flush();
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
            let _ = io::stdout().flush();
        }
    }
}

fn print_timing_summary(timing: &bw_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    println!("\nWall time:");
    for (label, secs) in [
        ("compile", timing.compile_time_s),
        ("solve", timing.solve_time_s),
        ("save", timing.save_time_s),
        ("cache", timing.load_cache_time_s),
    ] {
        if secs > 0.0 {
            println!("  {label:<8}{secs:>9.3}s {:>6.1}%", 100.0 * secs / total);
        }
    }
    println!("  {:<8}{:>9.3}s", "total", timing.total_time_s);
    if timing.steps > 0 {
        println!("  {} steps", timing.steps);
    }
}

fn print_run_summary(records: &[bw_results::TimeseriesRecord]) -> AppResult<()> {
    let summary = query::get_run_summary(records)?;
    let (t0, t1) = summary.time_range;
    println!("  {} records over {t0:.3} .. {t1:.3} s", summary.record_count);
    if let Some(rotor) = records.last().and_then(|r| r.rotor.as_ref()) {
        println!("  Blades: {}", summary.blade_count);
        println!("  Elements per blade: {}", summary.element_count);
        println!(
            "  Final thrust: {:.1} kN",
            to_kilonewton(newton(rotor.thrust_n))
        );
        println!("  Final power:  {:.3} MW", to_megawatt(watt(rotor.power_w)));
        println!("  Final CT / CP: {:.3} / {:.3}", rotor.ct, rotor.cp);
    }
    if let Some(airfoil) = records.last().and_then(|r| r.airfoil.as_ref()) {
        println!("  Final displacement: {:.5} m", airfoil.x_m);
        println!("  Final velocity:     {:.5} m/s", airfoil.v_m_s);
    }
    Ok(())
}

fn cmd_runs(project_path: &Path, study_id: &str) -> AppResult<()> {
    let runs = run_service::list_runs(project_path, study_id)?;

    if runs.is_empty() {
        println!("No cached runs found for study: {}", study_id);
    } else {
        println!("Cached runs for study '{}':", study_id);
        for manifest in runs {
            println!(
                "  {} ({}, solver {})",
                manifest.run_id, manifest.timestamp, manifest.solver_version
            );
        }
    }
    Ok(())
}

fn cmd_show_run(project_path: &Path, run_id: &str) -> AppResult<()> {
    let (manifest, records) = run_service::load_run(project_path, run_id)?;

    println!("\nRun {}:", run_id);
    println!("  Study: {}", manifest.study_id);
    println!("  Created: {}", manifest.timestamp);
    match &manifest.run_type {
        RunType::Bem {
            dt_s,
            steps,
            blades,
            radii_m,
        } => {
            println!(
                "  BEM: {} blades, {} elements, dt = {} s, {} steps",
                blades,
                radii_m.len(),
                dt_s,
                steps
            );
            println!("\nRotor variables: {}", query::ROTOR_VARIABLES.join(", "));
            println!("Element variables: {}", query::ELEMENT_VARIABLES.join(", "));
        }
        RunType::SpringAirfoil {
            t_end_s,
            points,
            dynamic_stall,
        } => {
            println!(
                "  Spring airfoil: t_end = {} s, {} points, dynamic stall {}",
                t_end_s,
                points,
                if *dynamic_stall { "on" } else { "off" }
            );
            println!("\nAirfoil variables: {}", query::AIRFOIL_VARIABLES.join(", "));
        }
    }
    print_run_summary(&records)
}

fn cmd_export_series(
    project_path: &Path,
    run_id: &str,
    variable: &str,
    station: Option<(usize, usize)>,
    output: Option<&Path>,
) -> AppResult<()> {
    let (manifest, records) = run_service::load_run(project_path, run_id)?;

    let series = match (&manifest.run_type, station) {
        (RunType::Bem { .. }, Some((blade, element))) => {
            query::extract_element_series(&records, blade, element, variable)?
        }
        (RunType::Bem { .. }, None) => query::extract_rotor_series(&records, variable)?,
        (RunType::SpringAirfoil { .. }, None) => {
            query::extract_airfoil_series(&records, variable)?
        }
        (RunType::SpringAirfoil { .. }, Some(_)) => {
            return Err(AppError::InvalidInput(
                "--blade/--element only apply to BEM runs".to_string(),
            ));
        }
    };

    let csv: String = std::iter::once("time_s,value\n".to_string())
        .chain(series.iter().map(|(t, v)| format!("{t},{v}\n")))
        .collect();

    match output {
        Some(path) => {
            std::fs::write(path, csv)?;
            eprintln!("wrote {} rows of {variable} to {}", series.len(), path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
