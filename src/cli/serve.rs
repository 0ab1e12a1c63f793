//! autodeck serve command implementation

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::web;

#[derive(Serialize)]
struct ServeOutput {
    addr: String,
}

pub fn run(
    deck: Deck,
    host: Option<String>,
    port: Option<u16>,
    output: OutputOptions,
) -> Result<()> {
    let host = host.unwrap_or_else(|| deck.config().web.host.clone());
    let port = port.unwrap_or(deck.config().web.port);

    if !output.json && !output.quiet {
        println!("Dashboard at http://{host}:{port} (Ctrl-C to stop)");
    }
    let addr = block_on_dashboard(Arc::new(deck), &host, port)?;

    let mut human = HumanOutput::new("Dashboard stopped");
    human.push_summary("Address", addr.to_string());
    emit_success(
        output,
        "serve",
        &ServeOutput {
            addr: addr.to_string(),
        },
        Some(&human),
    )
}

fn dashboard_runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

/// Run the dashboard on a fresh runtime until Ctrl-C
pub fn block_on_dashboard(deck: Arc<Deck>, host: &str, port: u16) -> Result<SocketAddr> {
    dashboard_runtime()?.block_on(web::serve(deck, host, port))
}

/// A dashboard running in the background, stopped explicitly by its owner.
///
/// No signal handler is installed, so Ctrl-C keeps its default meaning for
/// the surrounding console.
pub struct DashboardHandle {
    runtime: Runtime,
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<SocketAddr>>,
}

impl DashboardHandle {
    /// Bind `host:port` and start serving; bind errors surface here
    pub fn start(deck: Arc<Deck>, host: &str, port: u16) -> Result<Self> {
        let runtime = dashboard_runtime()?;
        let listener = runtime.block_on(web::bind(host, port))?;
        let addr = listener.local_addr()?;

        let (shutdown, stopped) = oneshot::channel::<()>();
        let task = runtime.spawn(web::serve_until(deck, listener, async move {
            let _ = stopped.await;
        }));

        Ok(Self {
            runtime,
            addr,
            shutdown,
            task,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal shutdown and wait for in-flight requests to finish
    pub fn stop(self) -> Result<SocketAddr> {
        let Self {
            runtime,
            shutdown,
            task,
            ..
        } = self;
        let _ = shutdown.send(());
        runtime
            .block_on(task)
            .map_err(|err| Error::OperationFailed(format!("dashboard task failed: {err}")))?
    }
}
