//! pdfsplice - Remove, reorder and combine pages of PDF documents.
//!
//! Command-line entry point. Every failure exits with status 1.

use std::path::Path;
use std::process;

use pdfsplice::cli::Cli;
use pdfsplice::config::{Config, Operation};
use pdfsplice::error::Result;
use pdfsplice::io::PdfWriter;
use pdfsplice::merge::{MergeResult, Merger};
use pdfsplice::output::{self, OutputFormatter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version requests are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    init_logging(cli.verbose);

    if let Err(err) = run(&cli).await {
        let formatter = OutputFormatter::default();
        formatter.error(&err.to_string());
        if err.is_usage() {
            eprintln!("  Usage: {}", cli.command.usage());
            eprintln!("Use '{} help' for usage information", pdfsplice::NAME);
        }
        process::exit(err.exit_code());
    }
}

/// Install the `log` backend. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Main application logic.
async fn run(cli: &Cli) -> Result<()> {
    let config = Config::try_from(cli)?;
    let formatter = output::create_formatter(&config);
    let merger = Merger::new(formatter);

    log::debug!("running {} with {:?}", cli.command.name(), config.operation);

    if let Operation::Inspect { input, json } = &config.operation {
        let info = merger.inspect(input).await?;
        println!("{}", output::render_info(&info, *json)?);
        return Ok(());
    }

    let Some(output_path) = config.operation.output() else {
        return Ok(());
    };
    prepare_output(&config, &formatter, output_path).await?;

    let result = match &config.operation {
        Operation::Remove { input, pages, .. } => {
            merger.remove_pages(input, pages.as_slice()).await?
        }
        Operation::Combine {
            base,
            add,
            mode,
            position,
            ..
        } => merger.combine(base, add, *mode, *position).await?,
        Operation::Concatenate { inputs, .. } => {
            formatter.info("Merging multiple PDFs:");
            formatter.info(&"-".repeat(50));
            let result = merger.concatenate_all(inputs).await?;
            formatter.info(&"-".repeat(50));
            result
        }
        Operation::Inspect { .. } => return Ok(()),
    };

    if result.plan.is_empty() {
        formatter.warning("The output document has no pages");
    }

    if config.dry_run {
        output::display_plan(&formatter, output_path, &result.sources, &result.plan);
        return Ok(());
    }

    write_output(&config, &formatter, &merger, result, output_path).await
}

/// Print the command heading and check the output location.
async fn prepare_output(config: &Config, formatter: &OutputFormatter, output: &Path) -> Result<()> {
    formatter.heading(&format!("{} - {}", pdfsplice::NAME, config.operation.title()));

    if config.dry_run {
        formatter.info("DRY RUN MODE - No files will be created");
    } else {
        PdfWriter::new().can_write(output).await?;
    }

    Ok(())
}

/// Assemble the page plan and write it.
async fn write_output(
    config: &Config,
    formatter: &OutputFormatter,
    merger: &Merger,
    result: MergeResult,
    output: &Path,
) -> Result<()> {
    let document = merger.assemble(&result.sources, &result.plan)?;
    drop(result.sources);

    let writer = PdfWriter::with_compression(config.compression);
    let write_stats = writer.save_with_stats(document, output).await?;

    output::display_summary(
        formatter,
        &config.operation,
        &result.statistics,
        &write_stats,
    );

    Ok(())
}
