use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span, trace, warn};

use insight_cli::config::{RemoteSettings, Settings};
use insight_cli::filters::filter_state;
use insight_cli::logging::redact_value;
use insight_core::{DashboardReport, DashboardSession};
use insight_ingest::{load_dataset, load_source};
use insight_map::ColumnRoleResolver;
use insight_model::{ColumnBinding, Dataset};
use insight_stream::{ChatMessage, ChatRequest, RemoteClient, TransportError};

use crate::cli::{ChatArgs, HealthArgs, RemoteArgs, ReportArgs, SourceArgs};
use crate::summary::{
    print_binding, print_remote, print_report, print_resolution, print_upload_summary,
};

pub fn run_inspect(args: &SourceArgs) -> Result<()> {
    let loaded = load_source(&args.path)
        .with_context(|| format!("load {}", args.path.display()))?;
    print_upload_summary(&loaded);
    Ok(())
}

pub fn run_roles(args: &SourceArgs, settings: &Settings) -> Result<()> {
    let dataset = open_dataset(&args.path)?;
    let resolver = ColumnRoleResolver::new(settings.keywords.clone());
    let report = resolver.resolve_with_report(dataset.columns());
    print_resolution(&report);
    Ok(())
}

pub fn run_report(args: &ReportArgs, settings: &Settings) -> Result<()> {
    let dataset = open_dataset(&args.path)?;
    let title = dataset_title(&dataset);
    let span = info_span!("report", dataset = %title);
    let _guard = span.enter();
    let start = Instant::now();

    let mut options = settings.analytics;
    if let Some(page_size) = args.page_size {
        options = options.with_page_size(page_size);
    }
    let binding = resolve(&dataset, settings);
    let mut session = DashboardSession::new(dataset, binding, options).context("analytics options")?;
    let filters = filter_state(
        args.search.as_deref(),
        args.filters.iter().map(String::as_str),
    )
    .context("parse filters")?;
    for (role, value) in filters.active_role_filters() {
        if !session.binding().is_bound(role) {
            warn!(%role, value = redact_value(value), "filter ignored, role has no column");
        }
    }
    session.apply_filters(filters);
    let page = session.set_page(args.page);
    if page != args.page {
        debug!(requested = args.page, page, "page clamped");
    }

    let report = session.report();
    trace_ledger(&report);
    info!(
        record_count = session.dataset().len(),
        filtered_count = session.filtered_len(),
        page,
        duration_ms = start.elapsed().as_millis(),
        "report computed"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{json}");
    } else {
        print_report(&title, &report);
    }
    Ok(())
}

pub fn run_remote(args: &RemoteArgs, settings: &Settings) -> Result<()> {
    let dataset = open_dataset(&args.path)?;
    let dataset_id = dataset
        .source()
        .map(|source| source.id.clone())
        .ok_or_else(|| anyhow!("dataset has no identifier"))?;
    let span = info_span!("remote", dataset = %dataset_title(&dataset), frequency = %args.frequency);
    let _guard = span.enter();

    let client = connect(&settings.remote, args.endpoint.as_deref())?;
    let aggregation = client
        .fetch_aggregation(&dataset_id, args.frequency)
        .map_err(transport_error)?;
    print_remote(&aggregation);

    if args.apply_hints {
        let mut binding = resolve(&dataset, settings);
        let changed = aggregation.apply_hints(&mut binding, dataset.columns());
        info!(changed = changed.len(), "remote hints applied");
        println!();
        print_binding(&binding, &changed);
        let title = dataset_title(&dataset);
        let session = DashboardSession::new(dataset, binding, settings.analytics)
            .context("analytics options")?;
        println!();
        print_report(&title, &session.report());
    }
    Ok(())
}

pub fn run_chat(args: &ChatArgs, settings: &Settings) -> Result<()> {
    let client = connect(&settings.remote, args.endpoint.as_deref())?;
    let request = ChatRequest {
        messages: vec![ChatMessage::user(args.message.join(" "))],
        user_id: settings.remote.user_id.clone(),
        chat_id: args.chat_id.clone(),
        title: None,
    };

    let mut stdout = io::stdout();
    let mut write_error = None;
    let result = client.stream_chat(&request, |chunk| {
        if let Some(content) = &chunk.content {
            write_chunk(&mut stdout, content, &mut write_error);
        }
    });
    println!();

    let outcome = result.map_err(transport_error)?;
    if let Some(error) = write_error {
        return Err(error).context("write chat reply");
    }
    let reply = outcome.reply();
    if let Some(id) = &reply.id {
        info!(chat_id = %id, title = reply.title.as_deref().unwrap_or_default(), "chat reply received");
    }
    match outcome.error() {
        Some(error) => Err(anyhow!("chat service reported an error: {error}")),
        None => Ok(()),
    }
}

/// Writes one streamed chunk, keeping only the first failure. Later chunks
/// are dropped once writing has failed.
fn write_chunk(out: &mut impl Write, content: &str, first_error: &mut Option<io::Error>) {
    if first_error.is_some() {
        return;
    }
    if let Err(error) = out.write_all(content.as_bytes()).and_then(|()| out.flush()) {
        *first_error = Some(error);
    }
}

pub fn run_health(args: &HealthArgs, settings: &Settings) -> Result<()> {
    let client = connect(&settings.remote, args.endpoint.as_deref())?;
    let status = client.health().map_err(transport_error)?;
    println!(
        "{}: {}",
        client.base_url(),
        status.status.as_deref().unwrap_or("ok")
    );
    if let Some(message) = status.message {
        println!("{message}");
    }
    Ok(())
}

fn open_dataset(path: &Path) -> Result<Dataset> {
    load_dataset(path).with_context(|| format!("load {}", path.display()))
}

fn resolve(dataset: &Dataset, settings: &Settings) -> ColumnBinding {
    ColumnRoleResolver::new(settings.keywords.clone()).resolve(dataset.columns())
}

fn dataset_title(dataset: &Dataset) -> String {
    dataset
        .source()
        .map(|source| source.title.clone())
        .unwrap_or_else(|| "dataset".to_string())
}

fn connect(remote: &RemoteSettings, endpoint: Option<&str>) -> Result<RemoteClient> {
    let endpoint = endpoint.unwrap_or(&remote.endpoint);
    RemoteClient::new(endpoint, remote.timeout()).map_err(transport_error)
}

/// Keeps the transport error as the source and leads with the
/// presentation message.
fn transport_error(error: TransportError) -> anyhow::Error {
    let message = error.user_message();
    anyhow::Error::new(error).context(message)
}

fn trace_ledger(report: &DashboardReport) {
    for (index, row) in report.ledger.rows.iter().enumerate() {
        for (column, value) in report.ledger.columns.iter().zip(row) {
            trace!(row = index, %column, value = redact_value(value), "ledger cell");
        }
    }
}
