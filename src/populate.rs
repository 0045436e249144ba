//! Populate command runner.

use anyhow::Context;
use measurement_config::Config;
use measurement_generator::GenerationPlan;
use measurement_populate::testing::MemorySink;
use measurement_populate::{CommonPopulateArgs, MeasurementSink, PopulateReport, Populator};
use measurement_populate_mongodb::{MongoDBPopulateArgs, MongoDBSink};
use std::time::Instant;

use crate::logging::{format_count, format_elapsed, mask_connection_password};

/// Run the populate command: load the configuration, fill MongoDB and verify
/// the persisted record count.
///
/// A dry run performs the same generation, check and summary against an
/// in-memory sink and never connects to MongoDB.
pub async fn run_populate(args: MongoDBPopulateArgs) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let mut config = Config::from_file(&args.common.config).with_context(|| {
        format!("Failed to load configuration from {:?}", args.common.config)
    })?;
    if let Some(uri) = &args.mongodb_connection_string {
        config = config.with_mongodb_uri(uri);
    }

    let plan = GenerationPlan::new(&config);
    println!(
        "Number of all measurements to send: {}",
        format_count(plan.expected_total())
    );

    if args.common.dry_run {
        tracing::info!(
            "[DRY-RUN] Skipping MongoDB at {} (database: {}, collection: {}), generating into memory",
            mask_connection_password(&config.mongo.uri),
            config.mongo.database,
            config.mongo.input_collection
        );
        let report = populate_with_sink(&config, MemorySink::new(), &args.common).await?;
        tracing::info!(
            "[DRY-RUN] Generated {} measurements in {} batches, consistency check passed",
            format_count(report.metrics.rows_inserted),
            report.metrics.batch_count
        );
    } else {
        tracing::info!(
            "Connecting to MongoDB at {}",
            mask_connection_password(&config.mongo.uri)
        );
        let sink = MongoDBSink::connect(&config.mongo)
            .await
            .context("Failed to connect to MongoDB")?;

        populate_with_sink(&config, sink, &args.common).await?;
    }

    println!(
        "Program's execution took {}",
        format_elapsed(start_time.elapsed())
    );
    Ok(())
}

/// Populate `sink`, fail on a count mismatch and write the validation summary
/// when an output file was requested.
pub async fn populate_with_sink<S>(
    config: &Config,
    sink: S,
    args: &CommonPopulateArgs,
) -> anyhow::Result<PopulateReport>
where
    S: MeasurementSink + Clone + 'static,
{
    let seed = args.seed.unwrap_or_else(rand::random);
    if args.seed.is_none() {
        tracing::info!("Using random seed {}", seed);
    }

    let report = Populator::new(config, sink)
        .with_options(args.options(seed))
        .populate()
        .await
        .context("Population failed")?;

    report.check.ensure().context("Consistency check failed")?;

    if let (Some(path), Some(summary)) = (&args.output, &report.summary) {
        summary
            .write_to_file(path)
            .with_context(|| format!("Failed to write validation summary to {path:?}"))?;
        tracing::info!(
            "Wrote validation summary for {} cells to {}",
            summary.cell_count(),
            path.display()
        );
    }

    Ok(report)
}
