//! Command handlers.

use crate::logging::mask_connection_password;
use anyhow::Context;
use batch_loader::{BatchLoader, CancellationToken, DiscardSink, LoadError, TracingProgress};
use loader_core::{ConfigError, LoaderConfig};
use loader_postgresql::{PostgreSQLCountArgs, PostgreSQLLoadArgs, PostgreSQLSink};
use review_generator::ReviewGenerator;
use tracing::{error, info, warn};

fn build_generator(config: &LoaderConfig) -> Result<ReviewGenerator, ConfigError> {
    let generator = match config.seed {
        Some(seed) => ReviewGenerator::new(config.ranges, seed)?,
        None => ReviewGenerator::from_entropy(config.ranges)?,
    };
    Ok(generator.with_comment(config.comment.clone()))
}

/// Cancel `token` on Ctrl-C. The loader notices before its next batch.
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current batch");
            token.cancel();
        }
    });
}

fn report_partial(err: &LoadError, table: &str) {
    if let LoadError::Sink { .. } | LoadError::Cancelled { .. } = err {
        error!(
            "Load into '{}' stopped: {} batches ({} rows) were committed and remain in the table",
            table,
            err.completed_batches(),
            err.rows_inserted()
        );
    }
}

pub async fn run_postgresql_populate(args: PostgreSQLLoadArgs) -> anyhow::Result<()> {
    let config = args
        .common
        .resolve()
        .context("Invalid loader configuration")?;

    let cancel = CancellationToken::new();
    let loader = BatchLoader::from_config(&config)?.with_cancellation(cancel.clone());
    let mut generator = build_generator(&config).context("Invalid generator ranges")?;
    let mut progress = TracingProgress::new(config.progress_every);

    info!(
        "Populating PostgreSQL table '{}' with {} rows (batch size {}, {} policy, seed={})",
        config.table,
        config.total_rows,
        config.batch_size,
        config.batch_policy,
        generator.seed()
    );

    if args.common.dry_run {
        info!(
            "[DRY-RUN] Connection: {}",
            mask_connection_password(&args.postgresql_connection_string)
        );
        info!(
            "[DRY-RUN] Would write {} rows in {} batches",
            loader.plan().rows_planned(),
            loader.plan().total_batches()
        );

        let mut sink = DiscardSink::new();
        loader
            .load(&mut generator, &mut sink, &mut progress)
            .await
            .context("Dry run failed")?;
        info!(
            "[DRY-RUN] Generated {} rows, configuration validated successfully",
            sink.rows_seen()
        );
        return Ok(());
    }

    info!(
        "Connecting to {}",
        mask_connection_password(&args.postgresql_connection_string)
    );
    let mut sink = PostgreSQLSink::connect(&args.postgresql_connection_string)
        .await
        .context("Failed to connect to PostgreSQL")?;

    if args.common.truncate {
        sink.truncate_table(&config.table)
            .await
            .with_context(|| format!("Failed to truncate table '{}'", config.table))?;
    }

    cancel_on_interrupt(cancel);

    match loader.load(&mut generator, &mut sink, &mut progress).await {
        Ok(metrics) => {
            info!(
                "Populated {}: {} rows in {} batches in {:?} ({:.2} rows/sec)",
                config.table,
                metrics.rows_inserted,
                metrics.batch_count,
                metrics.total_duration,
                metrics.rows_per_second()
            );
            Ok(())
        }
        Err(e) => {
            report_partial(&e, &config.table);
            Err(e).with_context(|| format!("Failed to populate table '{}'", config.table))
        }
    }
}

pub async fn run_postgresql_count(args: PostgreSQLCountArgs) -> anyhow::Result<()> {
    let sink = PostgreSQLSink::connect(&args.postgresql_connection_string)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let count = sink
        .row_count(&args.table)
        .await
        .with_context(|| format!("Failed to count rows in '{}'", args.table))?;

    info!("Table '{}' holds {} rows", args.table, count);
    println!("{count}");
    Ok(())
}
