use std::thread::{self, JoinHandle};

use tokio::runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::agent::Agent;
use crate::dsn::Dsn;
use crate::script::ScriptHost;
use crate::types::ErrorRecord;
use crate::wait::WaitPolicy;

mod machine;

use machine::Machine;

/// Configuration for a [`DeferredReporter`].
#[derive(Clone, Debug, Default)]
pub struct LoaderOptions {
    /// Readiness polling budget.
    pub wait: WaitPolicy,
    /// Subresource-integrity hash to put on the inserted script tag.
    pub integrity: Option<String>,
}

/// Accepts error reports at any time and guarantees delivery once the agent
/// is ready, without double-loading the script or double-constructing the
/// client.
///
/// The state machine runs on a dedicated thread; [`report`] hands the record
/// over and returns immediately. Dropping the reporter waits for reports that
/// are still queued behind an in-flight script load to settle, then joins the
/// thread.
///
/// [`report`]: DeferredReporter::report
pub struct DeferredReporter {
    channel: Option<UnboundedSender<ErrorRecord>>,
    handle: Option<JoinHandle<()>>,
}

impl DeferredReporter {
    /// Create a reporter for the project behind `dsn` with default options.
    pub fn new<H, A>(dsn: Dsn, host: H, agent: A) -> DeferredReporter
    where
        H: ScriptHost + Send + 'static,
        A: Agent + Send + Sync + 'static,
        A::Client: Send,
    {
        DeferredReporter::with_options(dsn, host, agent, LoaderOptions::default())
    }

    /// Create a reporter with explicit options.
    pub fn with_options<H, A>(
        dsn: Dsn,
        host: H,
        agent: A,
        options: LoaderOptions,
    ) -> DeferredReporter
    where
        H: ScriptHost + Send + 'static,
        A: Agent + Send + Sync + 'static,
        A::Client: Send,
    {
        let (report_tx, report_rx) = unbounded_channel::<ErrorRecord>();
        let (signal_tx, signal_rx) = unbounded_channel();

        let machine = Machine::new(dsn, host, agent, options, signal_tx);

        let handle = thread::Builder::new()
            .name("deferred-reporter".into())
            .spawn(move || {
                let rt = match runtime::Builder::new_current_thread().enable_all().build() {
                    Err(e) => {
                        log::error!("failed to build reporter runtime: {:?}", e);
                        return;
                    }
                    Ok(v) => v,
                };

                rt.block_on(machine.run(report_rx, signal_rx));

                drop(rt);
            })
            .expect("failed to spawn thread");

        DeferredReporter {
            channel: Some(report_tx),
            handle: Some(handle),
        }
    }

    /// Create a reporter that silently discards every report.
    ///
    /// For pages where monitoring is configured off; no thread is spawned
    /// and no script is ever inserted.
    pub fn disabled() -> DeferredReporter {
        DeferredReporter {
            channel: None,
            handle: None,
        }
    }

    /// Report an error. Fire-and-forget: never blocks, never fails.
    ///
    /// Reports submitted before the agent is ready are queued and flushed in
    /// submission order once the client exists. If the agent never becomes
    /// ready within the polling budget, queued reports are dropped and the
    /// loss is logged; nothing surfaces here.
    pub fn report(&self, record: ErrorRecord) {
        if let Some(channel) = &self.channel {
            let _ = channel.send(record);
        }
    }
}

impl Drop for DeferredReporter {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.take() {
            drop(channel);
        }

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
