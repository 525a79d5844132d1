use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::agent::{Agent, AgentClient, ClientOptions};
use crate::dsn::Dsn;
use crate::script::{ScriptHost, ScriptTag};
use crate::types::ErrorRecord;
use crate::wait::{wait_for, WaitError};

use super::LoaderOptions;

/// Milestones observed while bringing the agent up.
pub(crate) enum Signal {
    /// The inserted script's load callback fired.
    ScriptLoaded,
    /// The readiness wait observed the agent surface.
    AgentReady,
    /// The readiness wait exhausted its attempt budget.
    WaitFailed(WaitError),
}

/// The loader state machine. Lives on the reporter thread; all transitions
/// happen inside synchronous handlers, so no check of a state flag can be
/// separated from the matching set by a suspension point.
pub(crate) struct Machine<H, A: Agent> {
    dsn: Dsn,
    host: H,
    agent: Arc<A>,
    options: LoaderOptions,
    signal_tx: UnboundedSender<Signal>,
    script_inserted: bool,
    script_loaded: bool,
    // exactly one readiness wait may be outstanding
    waiting: bool,
    // terminal: the wait budget was exhausted, reports are dropped
    failed: bool,
    client: Option<A::Client>,
    pending: VecDeque<ErrorRecord>,
}

impl<H, A> Machine<H, A>
where
    H: ScriptHost,
    A: Agent + Send + Sync + 'static,
{
    pub(crate) fn new(
        dsn: Dsn,
        host: H,
        agent: A,
        options: LoaderOptions,
        signal_tx: UnboundedSender<Signal>,
    ) -> Self {
        Machine {
            dsn,
            host,
            agent: Arc::new(agent),
            options,
            signal_tx,
            script_inserted: false,
            script_loaded: false,
            waiting: false,
            failed: false,
            client: None,
            pending: VecDeque::new(),
        }
    }

    pub(crate) async fn run(
        mut self,
        mut reports: UnboundedReceiver<ErrorRecord>,
        mut signals: UnboundedReceiver<Signal>,
    ) {
        loop {
            tokio::select! {
                report = reports.recv() => match report {
                    Some(record) => self.on_report(record),
                    None => break,
                },
                Some(signal) = signals.recv() => self.on_signal(signal),
            }
        }

        // The handle is gone; settle the in-flight wait so reports queued
        // before the drop still reach the client.
        while !self.pending.is_empty() && !self.failed {
            match signals.recv().await {
                Some(signal) => self.on_signal(signal),
                None => break,
            }
        }
    }

    fn on_report(&mut self, record: ErrorRecord) {
        if let Some(client) = &self.client {
            client.capture_exception(record);
            return;
        }

        if self.failed {
            warn!("agent never became ready, dropping report: {}", record);
            return;
        }

        if !self.script_inserted {
            self.pending.push_back(record);
            self.insert_script();
            self.start_wait();
            return;
        }

        if !self.agent.is_ready() {
            self.pending.push_back(record);
            if !self.waiting {
                self.start_wait();
            }
            return;
        }

        // Inserted and ready but no client yet: construction is synchronous,
        // so earlier queued reports flush first and this one goes straight
        // through.
        self.build_client();
        if let Some(client) = &self.client {
            client.capture_exception(record);
        }
    }

    fn on_signal(&mut self, signal: Signal) {
        match signal {
            Signal::ScriptLoaded => {
                if self.script_loaded {
                    return;
                }
                self.script_loaded = true;
                debug!("agent script loaded");

                if self.client.is_some() {
                    return;
                }
                if self.agent.is_ready() {
                    self.build_client();
                } else if !self.waiting {
                    self.start_wait();
                }
            }
            Signal::AgentReady => {
                self.waiting = false;
                self.script_loaded = true;
                if self.client.is_none() {
                    self.build_client();
                }
            }
            Signal::WaitFailed(err) => {
                self.waiting = false;
                if self.client.is_some() {
                    return;
                }
                self.failed = true;
                let dropped = self.pending.len();
                self.pending.clear();
                warn!("{}, dropping {} queued report(s)", err, dropped);
            }
        }
    }

    /// One-shot: the flag flips before the host call.
    fn insert_script(&mut self) {
        self.script_inserted = true;

        let tag = ScriptTag::for_project(&self.dsn, self.options.integrity.clone());
        debug!("inserting agent script from {}", tag.src);

        let tx = self.signal_tx.clone();
        self.host.insert_script(
            tag,
            Box::new(move || {
                let _ = tx.send(Signal::ScriptLoaded);
            }),
        );
    }

    /// Spawn the readiness poll. The poll owns its timer and stops it when
    /// it settles; the machine only hears the outcome.
    fn start_wait(&mut self) {
        self.waiting = true;

        let agent = Arc::clone(&self.agent);
        let tx = self.signal_tx.clone();
        let policy = self.options.wait;

        debug!(
            "waiting for agent readiness ({} checks, {:?} apart)",
            policy.max_attempts, policy.interval
        );

        tokio::spawn(async move {
            let outcome = wait_for(
                move || agent.is_ready(),
                policy.max_attempts,
                policy.interval,
            )
            .await;

            let signal = match outcome {
                Ok(()) => Signal::AgentReady,
                Err(err) => Signal::WaitFailed(err),
            };

            let _ = tx.send(signal);
        });
    }

    /// Construct the client (at most once) and flush the queue in submission
    /// order. The queue is not reused afterwards: once a client exists,
    /// reports are delivered directly.
    fn build_client(&mut self) {
        if self.client.is_none() {
            debug!(
                "constructing reporting client for {}",
                self.dsn.public_key()
            );
            let options = ClientOptions::for_project(self.dsn.clone());
            self.client = Some(self.agent.new_client(options));
        }

        if !self.pending.is_empty() {
            debug!("flushing {} queued report(s)", self.pending.len());
        }

        while let Some(record) = self.pending.pop_front() {
            if let Some(client) = &self.client {
                client.capture_exception(record);
            }
        }
    }
}
