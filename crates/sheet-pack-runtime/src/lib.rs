use tokio::sync::mpsc;

// Re-export types from the library crate
pub use sheet_pack::{Design, ExportPayload, LayoutSummary, PackingOptions, Plan};
use sheet_pack::{RenderConfig, build_export_payload, plan};

/// Commands sent from the host to the worker
#[derive(Debug)]
pub enum PackCommand {
    /// Run a planning pass; queued passes are collapsed into the newest one
    Plan {
        designs: Vec<Design>,
        options: PackingOptions,
    },
    /// Hand the most recent plan to the document service
    Export,
}

/// Updates sent from the worker to the host
#[derive(Debug, Clone)]
pub enum PackUpdate {
    Planned {
        plan: Plan,
    },
    ExportComplete {
        sheet_count: usize,
        document: Vec<u8>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Timed out after {0} s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Remote collaborator that turns an export payload into a document
pub trait DocumentService {
    fn generate(
        &self,
        payload: &ExportPayload,
    ) -> impl Future<Output = Result<Vec<u8>, ServiceError>> + Send;
}

/// Last successful plan and the render settings it was made with
struct WorkerState {
    last: Option<(Plan, RenderConfig)>,
}

/// Async worker task that plans layouts and submits exports
pub async fn worker_task<S: DocumentService>(
    service: S,
    mut command_rx: mpsc::UnboundedReceiver<PackCommand>,
    update_tx: mpsc::UnboundedSender<PackUpdate>,
) {
    let mut state = WorkerState { last: None };
    let mut pending: Option<PackCommand> = None;

    loop {
        let cmd = match pending.take() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            PackCommand::Plan {
                mut designs,
                mut options,
            } => {
                // Keep only the newest queued plan; anything else runs right after it
                while let Ok(next_cmd) = command_rx.try_recv() {
                    match next_cmd {
                        PackCommand::Plan {
                            designs: new_designs,
                            options: new_options,
                        } => {
                            log::debug!("Discarding queued planning pass, using newer request");
                            designs = new_designs;
                            options = new_options;
                        }
                        other => {
                            pending = Some(other);
                            break;
                        }
                    }
                }

                handle_plan(designs, options, &mut state, &update_tx);
            }
            PackCommand::Export => {
                handle_export(&service, &state, &update_tx).await;
            }
        }
    }

    log::debug!("Command channel closed, worker exiting");
}

fn handle_plan(
    designs: Vec<Design>,
    options: PackingOptions,
    state: &mut WorkerState,
    update_tx: &mpsc::UnboundedSender<PackUpdate>,
) {
    if let Err(e) = options.validate() {
        let _ = update_tx.send(PackUpdate::Error {
            message: format!("Invalid options: {}", e),
        });
        return;
    }

    let plan = plan(&designs, &options);
    state.last = Some((plan.clone(), options.render));
    let _ = update_tx.send(PackUpdate::Planned { plan });
}

async fn handle_export<S: DocumentService>(
    service: &S,
    state: &WorkerState,
    update_tx: &mpsc::UnboundedSender<PackUpdate>,
) {
    let Some((plan, render)) = &state.last else {
        let _ = update_tx.send(PackUpdate::Error {
            message: "Nothing to export, run a planning pass first".to_string(),
        });
        return;
    };

    let payload = build_export_payload(&plan.result, render);
    let sheet_count = payload.sheets.len();

    match service.generate(&payload).await {
        Ok(document) => {
            log::info!(
                "Export of {} sheet(s) complete ({} bytes)",
                sheet_count,
                document.len()
            );
            let _ = update_tx.send(PackUpdate::ExportComplete {
                sheet_count,
                document,
            });
        }
        Err(e) => {
            log::error!("Export failed: {}", e);
            let _ = update_tx.send(PackUpdate::Error {
                message: format!("Export failed: {}", e),
            });
        }
    }
}
