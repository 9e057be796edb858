//! Wires config, the HTTP source and the exporter together and runs each
//! endpoint kind in turn.
use evdump_core::api::{
    AppConfig, CancelSignal, CliError, EndpointKind, ExportOptions, Exporter, RunSummary,
    TableWriter,
};
use evdump_plugins::factory;

use crate::commands::cli::Args;

#[tracing::instrument(name = "cli.run_export", skip_all)]
pub async fn run_export(
    args: &Args,
    cfg: &AppConfig,
    api_key: String,
    cancel: CancelSignal,
) -> Result<Vec<RunSummary>, CliError> {
    let filter = args.project_filter().ok_or_else(|| {
        CliError::Config("exactly one of --project-id or --project-name is required".to_string())
    })?;

    let source =
        factory::build_source(cfg, api_key).map_err(|e| CliError::Config(e.to_string()))?;
    let exporter = Exporter::new(
        source,
        TableWriter::new(&cfg.export.output_dir),
        ExportOptions::from(&cfg.export),
    )
    .with_cancel(cancel.clone());

    tracing::info!(
        project = %filter,
        output_dir = %cfg.export.output_dir,
        max_parallel = cfg.export.max_parallel,
        "starting export"
    );

    let mut summaries = Vec::with_capacity(cfg.export.endpoints.len());
    for &endpoint in &cfg.export.endpoints {
        if cancel.is_cancelled() {
            break;
        }
        let summary = exporter
            .run(endpoint, Some(&filter))
            .await
            .map_err(|source| CliError::Listing {
                endpoint: endpoint.as_str(),
                source,
            })?;
        summaries.push(summary);
    }

    let failed = failed_by_endpoint(&summaries);
    if !failed.is_empty() {
        tracing::error!("Failed to download data for endpoints: {:?}", failed);
    }

    if cancel.is_cancelled() {
        return Err(CliError::Interrupted);
    }
    Ok(summaries)
}

/// Failed object ids grouped by endpoint kind, omitting kinds with no failures.
pub fn failed_by_endpoint(summaries: &[RunSummary]) -> Vec<(EndpointKind, Vec<&str>)> {
    summaries
        .iter()
        .filter(|s| !s.failed.is_empty())
        .map(|s| (s.endpoint, s.failed_ids()))
        .collect()
}
