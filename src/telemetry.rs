use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Installs the global subscriber. `local` logs human-readable text,
/// `dev` and `prod` log JSON; `prod` defaults to `info`, the others to
/// `debug`. `RUST_LOG` overrides the default filter.
pub fn init(environment: Environment) {
    let default_level = match environment {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},tower_http=info,sqlx=warn", default_level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    let result = match environment {
        Environment::Local => registry.with(fmt::layer().with_target(false)).try_init(),
        Environment::Dev | Environment::Prod => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
