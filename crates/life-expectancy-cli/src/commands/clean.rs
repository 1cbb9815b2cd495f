//! Clean command - load the raw extract, reshape it and write the tidy CSV.

use colored::Colorize;
use life_expectancy::{Pipeline, PipelineConfig, PipelineReport};
use tracing::debug;

use crate::cli::CleanArgs;

pub fn run(args: CleanArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = args.json;
    let pipeline = Pipeline::new(build_config(args));
    let config = pipeline.config();
    debug!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        file = %config.filename,
        region = ?config.region,
        "starting clean"
    );

    if !json_output {
        println!(
            "{} {}",
            "Cleaning".cyan().bold(),
            config.input_dir.join(&config.filename).display().to_string().white()
        );
    }

    let report = pipeline.run()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, verbose);
    }

    Ok(())
}

fn build_config(args: CleanArgs) -> PipelineConfig {
    let mut config = PipelineConfig::new();
    if let Some(dir) = &args.input_dir {
        config = config.with_input_dir(dir);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(file) = &args.file {
        config = config.with_filename(file.as_str());
    }
    if let Some(format) = args.format_hint() {
        config = config.with_format(format);
    }
    if let Some(region) = args.region {
        config = config.with_region(region);
    }
    config
}

fn print_summary(report: &PipelineReport, verbose: bool) {
    let t = &report.transform;

    println!();
    println!("{}", "Summary:".yellow().bold());
    println!(
        "  Input:   {} rows x {} year columns ({})",
        t.input_rows.to_string().white(),
        t.year_columns,
        report.source.format
    );
    println!("  Long:    {} rows", t.unpivoted_rows);
    println!("  Missing: {} dropped", t.dropped_missing.to_string().red());
    if let Some(region) = report.region {
        println!(
            "  Region:  {} ({} rows filtered out)",
            region.as_str().cyan(),
            t.filtered_out
        );
    }
    println!("  Output:  {} rows", t.output_rows.to_string().green().bold());

    if verbose {
        println!();
        println!("  Source hash: {}", report.source.hash.dimmed());
        println!("  Output hash: {}", report.output_hash.dimmed());
    }

    println!();
    println!(
        "{} {}",
        "Wrote".green().bold(),
        report.output_path.display()
    );
}
