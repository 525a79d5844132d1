//! Two monitoring projects on one page, each with its own deferred loader.
//!
//! Run with `RUST_LOG=debug cargo run --example two_projects` to watch the
//! bring-up: both reports are submitted before any script has loaded, get
//! queued, and flush once the simulated agent surface appears.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use deferred_reporter::{
    Agent, AgentClient, ClientOptions, DeferredReporter, Dsn, ErrorRecord, LoadCallback,
    ScriptHost, ScriptTag,
};

/// A page that finishes loading every inserted script shortly afterwards.
#[derive(Clone)]
struct SimulatedPage {
    agent: SimulatedAgent,
}

impl ScriptHost for SimulatedPage {
    fn insert_script(&mut self, tag: ScriptTag, on_load: LoadCallback) {
        println!("page: inserting <script src=\"{}\">", tag.src);

        let agent = self.agent.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            agent.finish_evaluation();
            on_load();
        });
    }
}

/// The monitoring library's global surface, shared by every loader on the
/// page; observable once any bundle has been evaluated.
#[derive(Clone, Default)]
struct SimulatedAgent {
    ready: Arc<AtomicBool>,
}

impl SimulatedAgent {
    fn finish_evaluation(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }
}

impl Agent for SimulatedAgent {
    type Client = SimulatedClient;

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn new_client(&self, options: ClientOptions) -> SimulatedClient {
        println!(
            "agent: constructing client for {} ({})",
            options.dsn.public_key(),
            options.release
        );

        SimulatedClient {
            project: options.dsn.public_key().to_string(),
        }
    }
}

struct SimulatedClient {
    project: String,
}

impl AgentClient for SimulatedClient {
    fn capture_exception(&self, record: ErrorRecord) {
        let payload = serde_json::to_string(&record).expect("record serializes");
        println!("transport[{}]: {}", self.project, payload);
    }
}

fn main() {
    env_logger::init();

    let agent = SimulatedAgent::default();

    let dsn1: Dsn = "https://abc123@o0.ingest.example.com/1"
        .parse()
        .expect("valid credential");
    let dsn2: Dsn = "https://def456@o0.ingest.example.com/2"
        .parse()
        .expect("valid credential");

    let project1 = DeferredReporter::new(
        dsn1,
        SimulatedPage {
            agent: agent.clone(),
        },
        agent.clone(),
    );
    let project2 = DeferredReporter::new(
        dsn2,
        SimulatedPage {
            agent: agent.clone(),
        },
        agent.clone(),
    );

    // both reports arrive before either script has loaded
    project1.report(ErrorRecord::new("Error", "error project 1"));
    project2.report(ErrorRecord::new("Error", "error project 2"));

    // dropping the reporters waits for the queued reports to flush
    drop(project1);
    drop(project2);
}
