//! Logging setup and message helpers shared by the library and the CLI.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) {
    let default = if verbose {
        "cascade_select=debug"
    } else {
        "cascade_select=warn"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Prefix a message with the tool name for errors surfaced to the user.
pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("cascade-select: {}", msg.as_ref())
}

pub fn warn(msg: impl AsRef<str>) {
    tracing::warn!("{}", msg.as_ref());
}
