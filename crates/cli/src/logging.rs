use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    // stdout is reserved for command output
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).with_target(false))
            .try_init()?;
    }

    Ok(())
}
