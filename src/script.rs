use serde::Serialize;

use crate::dsn::Dsn;

/// A script-reference element, the loader's only page interaction.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ScriptTag {
    /// Where the agent bundle is downloaded from.
    pub src: String,
    /// Cross-origin mode the element is marked with.
    pub cross_origin: CrossOrigin,
    /// Optional subresource-integrity hash for the bundle.
    pub integrity: Option<String>,
}

impl ScriptTag {
    pub(crate) fn for_project(dsn: &Dsn, integrity: Option<String>) -> ScriptTag {
        ScriptTag {
            src: dsn.bundle_url(),
            cross_origin: CrossOrigin::Anonymous,
            integrity,
        }
    }
}

/// Cross-origin mode of a [`ScriptTag`].
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CrossOrigin {
    /// Fetch without credentials.
    Anonymous,
    /// Fetch with credentials.
    UseCredentials,
}

impl CrossOrigin {
    /// The attribute value as it appears on the element.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossOrigin::Anonymous => "anonymous",
            CrossOrigin::UseCredentials => "use-credentials",
        }
    }
}

/// Invoked by the host once the inserted script has finished loading.
pub type LoadCallback = Box<dyn FnOnce() + Send>;

/// The page the loader inserts the agent script into.
///
/// An implementation places `tag` as a sibling of the first script reference
/// already present in the page and invokes `on_load` (at most once, from any
/// thread) when the script finishes loading. A host that cannot observe load
/// completion may drop the callback; the loader then discovers readiness by
/// polling the agent surface instead.
pub trait ScriptHost {
    /// Insert `tag` into the page, wiring `on_load` as its load callback.
    fn insert_script(&mut self, tag: ScriptTag, on_load: LoadCallback);
}
