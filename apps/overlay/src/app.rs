//! Application orchestrator: wires the input tailer, the resolver and the sink.

use std::sync::Arc;

use ceti_clipboard::{ClipboardTailer, CommandClipboard};
use ceti_journal::JournalTailer;
use ceti_lookup::{default_clients, http_client};
use ceti_model::SystemEvent;
use ceti_resolver::{DisplaySink, Orchestrator};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, InputMode};
use crate::export::ExportLog;
use crate::sink::ConsoleSink;

/// Events buffered between the tailer and the resolver.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Runs the overlay until Ctrl-C or until the input source stops.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // -- Resolver --
    let http = http_client(config.request_timeout())?;
    let sink = Arc::new(ConsoleSink::new(config.visibility_tied_to_map));
    let mut orchestrator = Orchestrator::new(
        default_clients(&http),
        Arc::clone(&sink) as Arc<dyn DisplaySink>,
    );

    // -- Export log --
    let mut export = if config.export_on_resolve {
        let log = ExportLog::open(&config.export_path()?)?;
        tracing::info!(path = %log.path().display(), "exporting resolved systems");
        Some(log)
    } else {
        None
    };

    // -- Input --
    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let tailer = spawn_tailer(&config, tx, cancel.clone())?;

    tracing::info!("overlay ready");

    event_loop(
        &mut rx,
        &mut orchestrator,
        sink.as_ref(),
        export.as_mut(),
        tokio::signal::ctrl_c(),
    )
    .await;

    // -- Graceful shutdown --
    cancel.cancel();
    if let Err(e) = tailer.await {
        tracing::warn!(error = %e, "input task ended abnormally");
    }

    Ok(())
}

/// Handles events until `shutdown` resolves or the input source stops.
///
/// `shutdown` stays armed across the whole loop, including while a
/// resolution is in flight, so a signal is never missed.
async fn event_loop<F>(
    rx: &mut mpsc::Receiver<SystemEvent>,
    orchestrator: &mut Orchestrator,
    sink: &dyn DisplaySink,
    mut export: Option<&mut ExportLog>,
    shutdown: F,
) where
    F: Future,
{
    tokio::pin!(shutdown);

    loop {
        let event = tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown signal received");
                break;
            }
            event = rx.recv() => event,
        };
        let Some(event) = event else {
            tracing::warn!("input source stopped");
            break;
        };

        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown signal received during lookup");
                break;
            }
            _ = handle_event(orchestrator, sink, export.as_deref_mut(), event) => {}
        }
    }
}

/// Starts the configured input source.
fn spawn_tailer(
    config: &Config,
    tx: mpsc::Sender<SystemEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<JoinHandle<()>> {
    let handle = match config.mode {
        InputMode::Journal => {
            let tailer = JournalTailer::new(config.journal_dir()?)
                .with_poll_interval(config.poll_interval());
            tracing::info!(dir = %tailer.dir().display(), "watching game journal");
            tokio::spawn(tailer.run(tx, cancel))
        }
        InputMode::Clipboard => {
            let tailer = ClipboardTailer::new(CommandClipboard)?
                .with_poll_interval(config.poll_interval());
            tracing::info!("watching clipboard");
            tokio::spawn(tailer.run(tx, cancel))
        }
    };
    Ok(handle)
}

/// Handles one input event.
async fn handle_event(
    orchestrator: &mut Orchestrator,
    sink: &dyn DisplaySink,
    export: Option<&mut ExportLog>,
    event: SystemEvent,
) {
    match event {
        SystemEvent::Targeted { name, address } => {
            let Some(resolution) = orchestrator.resolve(&name, address).await else {
                return;
            };
            if let Some(log) = export {
                if let Err(e) = log.append(&resolution) {
                    tracing::warn!(error = %e, "failed to export system");
                }
            }
        }
        SystemEvent::MapOpened => sink.map_view_changed(true),
        SystemEvent::MapClosed => sink.map_view_changed(false),
    }
}
