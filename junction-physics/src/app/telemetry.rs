use std::path::Path;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Creates a subscriber which writes to `console::Term::stderr` and, when a path is given,
/// writes JSON records to that file
///
/// `RUST_LOG` takes precedence over the requested level.
pub(crate) fn get_subscriber(
    env_filter: super::LogLevel,
    log_file: Option<&Path>,
) -> (
    impl Subscriber + Send + Sync,
    Option<tracing_appender::non_blocking::WorkerGuard>,
) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter.to_string()));

    let fmt_layer = tracing_subscriber::fmt::Layer::new()
        .with_writer(console::Term::stderr)
        .without_time();

    let (json_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_os_string())
                .unwrap_or_else(|| "junction.log".into());
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (
                Some(
                    tracing_subscriber::fmt::Layer::new()
                        .with_writer(non_blocking)
                        .json(),
                ),
                Some(guard),
            )
        }
        None => (None, None),
    };

    (
        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .with(json_layer),
        guard,
    )
}

pub(crate) fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> color_eyre::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
