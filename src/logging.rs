//! Console and Sentry logging.
//!
//! The console output goes to stderr, so that `predict` and `summary` keep stdout for JSON.

use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Log filter read from an environment variable, with fallback directives.
struct LogFilter {
    env: &'static str,
    fallback: &'static str,
}

const CONSOLE_FILTER: LogFilter = LogFilter {
    env: "HOUSE_PRICE_DASHBOARD_LOG",
    fallback: "house_price_dashboard=info,poem=info",
};

/// Debug events of the dashboard become breadcrumbs of the reported errors.
const SENTRY_FILTER: LogFilter = LogFilter {
    env: "HOUSE_PRICE_DASHBOARD_SENTRY_LOG",
    fallback: "house_price_dashboard=debug,poem=info",
};

impl LogFilter {
    fn build(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_env(self.env) {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(self.fallback)
                .with_context(|| format!("invalid fallback directives for `{}`", self.env)),
        }
    }
}

/// Initialises tracing and Sentry. Sentry stays disabled without a DSN.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(sentry_event_filter)
        .span_filter(|metadata| metadata.level() != &Level::TRACE)
        .with_filter(SENTRY_FILTER.build()?);
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(CONSOLE_FILTER.build()?);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(console_layer)
        .try_init()
        .context("failed to initialise the tracing subscriber")?;

    Ok(guard)
}

/// Server errors are logged at the error level and client errors at the info
/// level, so only the former are reported as Sentry events.
fn sentry_event_filter(metadata: &Metadata) -> EventFilter {
    match *metadata.level() {
        Level::ERROR | Level::WARN => EventFilter::Event,
        _ => EventFilter::Breadcrumb,
    }
}
