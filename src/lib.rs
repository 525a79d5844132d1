//! Deferred loader for a browser error-monitoring agent
//!
//! # Overview
//!
//! This crate defers insertion of an external error-monitoring agent's
//! script into a page, queues error reports submitted before the agent is
//! ready, and flushes them in submission order once a reporting client has
//! been constructed. Whenever a report arrives, the loader either delivers
//! it immediately or triggers whichever bring-up steps are still missing.
//! The script is inserted at most once and at most one client is ever
//! constructed, yet no report is lost regardless of when it was submitted
//! relative to those milestones.
//!
//! The page and the agent are seams: [`ScriptHost`] is where the script tag
//! goes, and [`Agent`] is the surface the monitoring library exposes once
//! its bundle has been evaluated. Readiness is a predicate the loader polls,
//! so both seams can be faked in tests.
//!
//! # Examples
//!
//! ```
//! use deferred_reporter::{
//!     Agent, AgentClient, ClientOptions, DeferredReporter, Dsn, ErrorRecord, LoadCallback,
//!     ScriptHost, ScriptTag,
//! };
//!
//! // The page the script tag goes into. A real host hands `tag` to the
//! // document and invokes `on_load` when the browser finishes loading it.
//! struct Page;
//!
//! impl ScriptHost for Page {
//!     fn insert_script(&mut self, _tag: ScriptTag, on_load: LoadCallback) {
//!         on_load();
//!     }
//! }
//!
//! // The agent surface. A real implementation reads the monitoring
//! // library's globals.
//! struct Monitor;
//! struct Session;
//!
//! impl AgentClient for Session {
//!     fn capture_exception(&self, record: ErrorRecord) {
//!         println!("captured {}", record);
//!     }
//! }
//!
//! impl Agent for Monitor {
//!     type Client = Session;
//!
//!     fn is_ready(&self) -> bool {
//!         true
//!     }
//!
//!     fn new_client(&self, _options: ClientOptions) -> Session {
//!         Session
//!     }
//! }
//!
//! let dsn: Dsn = "https://abc123@o0.ingest.example.com/1".parse()?;
//! let reporter = DeferredReporter::new(dsn, Page, Monitor);
//!
//! reporter.report(ErrorRecord::new("TypeError", "x is not a function"));
//! # Ok::<(), deferred_reporter::DsnError>(())
//! ```
//!
//! Reports submitted while the script is still loading are queued; once the
//! agent surface becomes observable, the loader constructs one client with
//! the fixed integration set ([`DEFAULT_INTEGRATIONS`]) and drains the queue
//! into it. If readiness is never observed within the polling budget
//! ([`WaitPolicy`]), the queued reports are dropped and the loss is logged;
//! [`report`] itself never fails.
//!
//! [`report`]: DeferredReporter::report
//!
//! # License
//!
//! MIT

#![warn(missing_docs)]

mod agent;
mod dsn;
mod loader;
mod script;
mod types;
mod wait;

pub use agent::{
    Agent, AgentClient, ClientOptions, Integration, StackParser, Transport, DEFAULT_INTEGRATIONS,
    RELEASE,
};
pub use dsn::{Dsn, DsnError};
pub use loader::{DeferredReporter, LoaderOptions};
pub use script::{CrossOrigin, LoadCallback, ScriptHost, ScriptTag};
pub use types::ErrorRecord;
pub use wait::{wait_for, WaitError, WaitPolicy};
