//! The surface the external monitoring agent exposes once its bundle has
//! been evaluated on the page.
//!
//! The loader never invents behavior here: it only wires together the entry
//! points the agent contract defines. Readiness is an injected predicate so
//! the loader can be exercised against a scripted agent.

use crate::dsn::Dsn;
use crate::types::ErrorRecord;

/// Release identifier wired into every constructed client.
pub const RELEASE: &str = concat!("deferred-reporter@", env!("CARGO_PKG_VERSION"));

/// Capability integrations enabled on every constructed client.
pub const DEFAULT_INTEGRATIONS: [Integration; 4] = [
    Integration::Breadcrumbs,
    Integration::Dedupe,
    Integration::HttpContext,
    Integration::LinkedErrors,
];

/// The external monitoring agent.
///
/// `is_ready` reports whether the agent's global surface is observable yet;
/// it is polled after script insertion. `new_client` is called at most once
/// per loader instance, and only after `is_ready` has returned true.
pub trait Agent {
    /// Handle through which reports are delivered.
    type Client: AgentClient;

    /// Whether the agent surface is observable yet.
    fn is_ready(&self) -> bool;

    /// Build a reporting client from the agent surface.
    fn new_client(&self, options: ClientOptions) -> Self::Client;
}

/// The session handle of a constructed client.
pub trait AgentClient {
    /// Deliver one report. Infallible from the loader's point of view;
    /// transport failures are the agent's concern.
    fn capture_exception(&self, record: ErrorRecord);
}

/// Options a client is constructed with, wired exactly as the agent
/// contract requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientOptions {
    /// Project credential.
    pub dsn: Dsn,
    /// Release identifier, always [`RELEASE`].
    pub release: String,
    /// Transport factory to build the client with.
    pub transport: Transport,
    /// Stack-trace parser to build the client with.
    pub stack_parser: StackParser,
    /// Integrations to enable, always [`DEFAULT_INTEGRATIONS`].
    pub integrations: Vec<Integration>,
}

impl ClientOptions {
    pub(crate) fn for_project(dsn: Dsn) -> ClientOptions {
        ClientOptions {
            dsn,
            release: RELEASE.into(),
            transport: Transport::Fetch,
            stack_parser: StackParser::AgentDefault,
            integrations: DEFAULT_INTEGRATIONS.to_vec(),
        }
    }
}

/// Selects a transport factory from the agent surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// The agent's fetch-based transport.
    Fetch,
}

/// Selects a stack-trace parser from the agent surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackParser {
    /// The agent's default parser.
    AgentDefault,
}

/// A capability integration constructor on the agent surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integration {
    /// Breadcrumb capture.
    Breadcrumbs,
    /// Duplicate-event suppression.
    Dedupe,
    /// HTTP-context enrichment.
    HttpContext,
    /// Linked-error chaining.
    LinkedErrors,
}
