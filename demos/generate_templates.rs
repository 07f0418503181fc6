//! Command-line tool that turns YAML project descriptions into planning workbook parts.
//!
//! Each input file holds the hierarchy rows, the component rows and optional
//! report options:
//!
//! ```yaml
//! hierarchy:
//!   - { element_type: General Objective, number: "1", name: Better lives }
//!   - { element_type: Specific Objective, number: "1.1", name: Improve health }
//!   - { element_type: Result indicator, number: "1.1.A", name: Life expectancy }
//! components:
//!   - { element_type: Solution, id: S1, name: Rural clinics }
//! options:
//!   sheets: [development-challenge, theory-of-change, result-measurement, summary]
//! ```
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_templates -- project.yaml -o out/
//! ```
//!
//! Each input gets a folder named after it holding the SpreadsheetML parts
//! (`[Content_Types].xml`, `xl/workbook.xml`, ...), ready to be zipped into a
//! `.xlsx` by any packager. Every input is processed independently; a failing
//! file is reported with its name and does not stop the others.

use clap::Parser;
use plantilla::Project;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Generate planning workbook parts from YAML project descriptions
#[derive(Parser, Debug)]
#[command(
    name = "generate_templates",
    about = "Generate planning workbook parts from YAML project descriptions",
    version
)]
struct Args {
    /// Project description file(s)
    #[arg(value_name = "INPUT", required = true)]
    input: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "OUTPUT", default_value = ".")]
    output: PathBuf,

    /// Plan sheets without data rows when a project has no objectives
    #[arg(long)]
    allow_empty: bool,

    /// Overwrite existing output
    #[arg(short, long)]
    force: bool,

    /// Log planning details (respects RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !args.output.exists() {
        fs::create_dir_all(&args.output)?;
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for input in &args.input {
        let stem = input
            .file_stem()
            .ok_or_else(|| format!("Invalid input filename: {}", input.display()))?
            .to_string_lossy();
        let output_path = args.output.join(stem.as_ref());

        if output_path.exists() && !args.force {
            eprintln!(
                "✗ {}: output already exists: {} (use --force to overwrite)",
                input.display(),
                output_path.display()
            );
            error_count += 1;
            continue;
        }

        match generate(input, &output_path, &args) {
            Ok(sheets) => {
                success_count += 1;
                println!(
                    "✓ {} -> {} ({} sheets)",
                    input.display(),
                    output_path.display(),
                    sheets
                );
            },
            Err(e) => {
                error_count += 1;
                eprintln!("✗ {}: {}", input.display(), e);
            },
        }
    }

    if args.input.len() > 1 {
        println!("\n=== Generation Summary ===");
        println!("Success: {}", success_count);
        println!("Failed:  {}", error_count);
        println!("Total:   {}", args.input.len());
    }

    if error_count > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Plan, render and write one project; returns the number of sheets.
fn generate(input: &Path, output: &Path, args: &Args) -> Result<usize, Box<dyn std::error::Error>> {
    let yaml = fs::read_to_string(input)?;
    let mut project = Project::from_yaml_str(&yaml)?;
    if args.allow_empty {
        project.options.allow_empty_hierarchy = true;
    }

    let plans = project.plans()?;
    plantilla::render_workbook(&plans)?.write_to_dir(output)?;

    Ok(plans.len())
}
