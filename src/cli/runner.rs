use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::unbounded;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use framefit::io::inventory::INVENTORY_FILE_NAME;
use framefit::{
    BatchEvent, BatchReport, FitParams, locate, normalize_file, process_directory_to_path,
    write_inventory_report,
};

use super::args::{CliArgs, Command, FitArgs};
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn required(value: Option<PathBuf>, arg: &str) -> Result<PathBuf, AppError> {
    value.ok_or_else(|| AppError::MissingArgument {
        arg: arg.to_string(),
    })
}

/// Preset first, then explicit flags on top.
fn resolve_params(args: &FitArgs) -> Result<FitParams, AppError> {
    let mut params = match &args.preset {
        Some(path) => FitParams::from_json_file(path)?,
        None => FitParams::default(),
    };
    if let Some(ratio) = args.ratio {
        params.ratio = ratio;
    }
    if let Some(background) = args.background {
        params.background = background;
    }
    if args.smart {
        params.smart_scale = true;
    }
    Ok(params)
}

fn run_single(input: &Path, output: &Path, params: &FitParams) -> Result<(), AppError> {
    let summary = normalize_file(input, output, params)?;
    info!(
        "Successfully processed: {:?} -> {:?} ({}x{} -> {}x{})",
        input,
        output,
        summary.source_cols,
        summary.source_rows,
        summary.output_cols,
        summary.output_rows
    );
    Ok(())
}

/// Workers run on a background thread; this thread only consumes progress.
fn run_batch(
    input_dir: PathBuf,
    output_dir: PathBuf,
    params: FitParams,
) -> Result<BatchReport, AppError> {
    info!("Starting batch processing from directory: {:?}", input_dir);
    info!("Output directory: {:?}", output_dir);

    let (tx, rx) = unbounded::<BatchEvent>();
    let worker = thread::spawn(move || {
        process_directory_to_path(&input_dir, &output_dir, &params, Some(&tx))
    });

    let mut completed = 0usize;
    for event in rx {
        match event {
            BatchEvent::Started { total } => info!("Processing {} images...", total),
            BatchEvent::Finished {
                total,
                source,
                outcome,
                ..
            } => {
                completed += 1;
                let name = source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                match outcome {
                    Ok(_) => info!("[{}/{}] ok: {}", completed, total, name),
                    Err(e) => warn!("[{}/{}] failed: {}: {}", completed, total, name, e),
                }
            }
            BatchEvent::Done(report) => info!(
                "Done! Processed: {}/{}, failed: {}",
                report.processed, report.total, report.failed
            ),
        }
    }

    let report = worker.join().map_err(|_| AppError::WorkerPanicked)??;
    Ok(report)
}

fn run_inventory(
    folder: &Path,
    base_path: Option<&Path>,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let output = output.unwrap_or_else(|| folder.join(INVENTORY_FILE_NAME));
    let entries = write_inventory_report(folder, base_path, &output)?;
    if entries.is_empty() {
        return Ok(());
    }

    for entry in entries.iter().take(10) {
        info!("{} -> {:?}", entry.article, entry.path);
    }
    if entries.len() > 10 {
        info!("... and {} more", entries.len() - 10);
    }
    info!("Found {} files, report: {:?}", entries.len(), output);
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    match args.command {
        Command::Fit { input, output, fit } => {
            let input = required(input, "--input")?;
            let output = required(output, "--output")?;
            let params = resolve_params(&fit)?;
            run_single(&input, &output, &params)?;
        }
        Command::Batch {
            input_dir,
            output_dir,
            fit,
        } => {
            let input_dir = required(input_dir, "--input-dir")?;
            let output_dir = required(output_dir, "--output-dir")?;
            let params = resolve_params(&fit)?;
            run_batch(input_dir, output_dir, params)?;
        }
        Command::Locate { input } => {
            let input = required(input, "--input")?;
            let image = framefit::io::open_image(&input)?;
            let bbox = locate(&image);
            println!("{}", bbox);
        }
        Command::Inventory {
            folder,
            base_path,
            output,
        } => {
            let folder = required(folder, "--folder")?;
            run_inventory(&folder, base_path.as_deref(), output)?;
        }
    }

    Ok(())
}
