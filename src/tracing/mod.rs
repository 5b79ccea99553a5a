//! Tracing initialization.

use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::TracingConfig;

mod files;
mod stderr;

/// Installs the global tracing subscriber.
///
/// The returned guard must be kept alive for as long as logs should be flushed to files.
pub(crate) fn init(config: &TracingConfig) -> io::Result<Option<WorkerGuard>>
{
	if !config.enable {
		return Ok(None);
	}

	let env_filter = config.env_filter().map_err(io::Error::other)?;
	let stderr = stderr::layer(&config.stderr);
	let (files, guard) = files::layer(&config.files)?.unzip();

	tracing_subscriber::registry()
		.with(Layer::and_then(stderr, files).with_filter(env_filter))
		.try_init()
		.map_err(io::Error::other)?;

	info!("initialized tracing");

	Ok(guard)
}
