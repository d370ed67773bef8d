use hearth_assets::AssetError;
use hearth_input::InputError;
use hearth_scripts::ScriptError;
use hearth_world::WorldError;

/// Host-level failure classification.
///
/// Startup failures abort [`crate::Game::run`]; failures inside callbacks
/// during the run loop are logged and the loop continues.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A file the host or a plugin needs does not exist.
    #[error("resource missing: {0}")]
    ResourceMissing(String),
    /// An operation was attempted in a lifecycle phase that forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// The host refused a malformed request (bad config, bad binding).
    #[error("host rejected: {0}")]
    HostRejected(String),
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
