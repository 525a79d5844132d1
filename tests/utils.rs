use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use deferred_reporter::{
    Agent, AgentClient, ClientOptions, ErrorRecord, LoadCallback, LoaderOptions, ScriptHost,
    ScriptTag, WaitPolicy,
};

pub const DSN: &str = "https://abc123@o0.ingest.example.com/1";

pub fn fast_options() -> LoaderOptions {
    LoaderOptions {
        wait: WaitPolicy {
            max_attempts: 200,
            interval: Duration::from_millis(2),
        },
        integrity: None,
    }
}

/// Poll `cond` until it holds or `timeout` passes.
pub fn eventually(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }

    cond()
}

/// Records insertions and parks the load callback for the test to fire.
#[derive(Clone, Default)]
pub struct FakePage {
    inner: Arc<Mutex<PageInner>>,
}

#[derive(Default)]
struct PageInner {
    inserted: Vec<ScriptTag>,
    on_load: Option<LoadCallback>,
}

impl FakePage {
    pub fn new() -> FakePage {
        FakePage::default()
    }

    pub fn insertions(&self) -> usize {
        self.inner.lock().unwrap().inserted.len()
    }

    pub fn inserted_tags(&self) -> Vec<ScriptTag> {
        self.inner.lock().unwrap().inserted.clone()
    }

    /// Fire the parked load callback. Returns false when nothing has been
    /// inserted or the callback already fired.
    pub fn finish_load(&self) -> bool {
        let callback = self.inner.lock().unwrap().on_load.take();

        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl ScriptHost for FakePage {
    fn insert_script(&mut self, tag: ScriptTag, on_load: LoadCallback) {
        let mut inner = self.inner.lock().unwrap();
        inner.inserted.push(tag);
        inner.on_load = Some(on_load);
    }
}

/// Scripted agent surface: the test flips readiness and inspects captures.
#[derive(Clone, Default)]
pub struct FakeAgent {
    inner: Arc<AgentInner>,
}

#[derive(Default)]
struct AgentInner {
    ready: AtomicBool,
    ready_polls: AtomicUsize,
    clients_built: AtomicUsize,
    last_options: Mutex<Option<ClientOptions>>,
    captured: Mutex<Vec<ErrorRecord>>,
}

impl FakeAgent {
    pub fn new() -> FakeAgent {
        FakeAgent::default()
    }

    pub fn set_ready(&self, ready: bool) {
        self.inner.ready.store(ready, Ordering::SeqCst);
    }

    pub fn ready_polls(&self) -> usize {
        self.inner.ready_polls.load(Ordering::SeqCst)
    }

    pub fn clients_built(&self) -> usize {
        self.inner.clients_built.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<ClientOptions> {
        self.inner.last_options.lock().unwrap().clone()
    }

    pub fn captured(&self) -> Vec<ErrorRecord> {
        self.inner.captured.lock().unwrap().clone()
    }
}

impl Agent for FakeAgent {
    type Client = FakeClient;

    fn is_ready(&self) -> bool {
        self.inner.ready_polls.fetch_add(1, Ordering::SeqCst);
        self.inner.ready.load(Ordering::SeqCst)
    }

    fn new_client(&self, options: ClientOptions) -> FakeClient {
        self.inner.clients_built.fetch_add(1, Ordering::SeqCst);
        *self.inner.last_options.lock().unwrap() = Some(options);

        FakeClient {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub struct FakeClient {
    inner: Arc<AgentInner>,
}

impl AgentClient for FakeClient {
    fn capture_exception(&self, record: ErrorRecord) {
        self.inner.captured.lock().unwrap().push(record);
    }
}
