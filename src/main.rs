use csv_enumerator::{
    AppConfig, CsvEnumerator, CsvSource, CursorStore, NoEstimate, Progress, RowCountEstimator,
    RunStatus, WcLineCounter,
};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("csv_enumerator=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1].starts_with("--") {
        eprintln!("usage: csv-enumerator <input.csv> [--batches] [--reset]");
        std::process::exit(2);
    }
    let input_file = args[1].clone();
    let batch_mode = args.iter().any(|a| a == "--batches");
    let reset = args.iter().any(|a| a == "--reset");

    let config = AppConfig::load_or_default(Some("config.toml"));

    let store = CursorStore::new(&config.checkpoint.cursor_path)?;
    if reset {
        store.delete()?;
        tracing::info!("Cleared stored cursor");
    }

    let checkpoint = store.load(&input_file)?;
    if let Some(checkpoint) = &checkpoint {
        if checkpoint.status == RunStatus::Completed {
            tracing::info!(
                rows = checkpoint.rows_processed,
                "Input already fully processed, nothing to do"
            );
            return Ok(());
        }
    }
    let cursor = checkpoint.as_ref().and_then(|checkpoint| checkpoint.cursor);

    let source = CsvSource::from_path(&input_file, config.worker.has_headers)?;
    let estimator: Box<dyn RowCountEstimator> = if config.estimate.enabled {
        Box::new(WcLineCounter)
    } else {
        Box::new(NoEstimate)
    };
    let enumerator = CsvEnumerator::with_estimator(source, estimator)?;

    if batch_mode {
        run_batches(enumerator, &store, &input_file, cursor, &config)?;
    } else {
        run_rows(enumerator, &store, &input_file, cursor, &config)?;
    }

    Ok(())
}

fn run_rows(
    enumerator: CsvEnumerator,
    store: &CursorStore,
    input_file: &str,
    cursor: Option<u64>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut rows = enumerator.rows(cursor)?;
    let mut progress = Progress::new(rows.estimated_remaining());
    tracing::info!(
        cursor = ?cursor,
        remaining = ?rows.estimated_remaining(),
        "Starting row iteration"
    );

    let budget = config.worker.rows_per_run as u64;
    let mut processed_this_run = 0u64;

    while processed_this_run < budget {
        let Some(item) = rows.next() else {
            store.mark_completed(input_file)?;
            tracing::info!(rows = progress.rows_processed(), "Reached end of file");
            return Ok(());
        };
        let (record, index) = item?;

        tracing::debug!(index, fields = record.len(), "Processed row");
        store.update_progress(input_file, index, 1)?;
        progress.record(1);
        processed_this_run += 1;
    }

    tracing::info!(
        processed = processed_this_run,
        fraction = ?progress.fraction(),
        eta_seconds = ?progress.eta_seconds(),
        "Row budget reached, run again to resume"
    );
    Ok(())
}

fn run_batches(
    enumerator: CsvEnumerator,
    store: &CursorStore,
    input_file: &str,
    cursor: Option<u64>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let batch_size = config.worker.batch_size;
    let mut batches = enumerator.batches(cursor, batch_size)?;
    let mut progress = Progress::new(batches.estimated_remaining());
    tracing::info!(
        cursor = ?cursor,
        batch_size,
        remaining = ?batches.estimated_remaining(),
        "Starting batch iteration"
    );

    let budget = (config.worker.rows_per_run / batch_size).max(1) as u64;
    let mut processed_this_run = 0u64;

    while processed_this_run < budget {
        let Some(item) = batches.next() else {
            store.mark_completed(input_file)?;
            tracing::info!(batches = progress.rows_processed(), "Reached end of file");
            return Ok(());
        };
        let (batch, index) = item?;

        tracing::debug!(index, rows = batch.len(), "Processed batch");
        store.update_progress(input_file, index, batch.len() as u64)?;
        progress.record(1);
        processed_this_run += 1;
    }

    tracing::info!(
        processed = processed_this_run,
        fraction = ?progress.fraction(),
        eta_seconds = ?progress.eta_seconds(),
        "Batch budget reached, run again to resume"
    );
    Ok(())
}
