use std::path::Path;

use anyhow::Context;
use records_api::Config;

mod cli;

fn main() -> anyhow::Result<()>
{
	if let Err(error) = dotenvy::dotenv() {
		if !error.not_found() {
			return Err(error).context("failed to load `.env` file");
		}
	}

	let args = cli::args();
	let mut config = load_config(&args.config_path, args.config_path_is_default())?;

	args.apply_to_config(&mut config);

	let mut runtime = tokio::runtime::Builder::new_multi_thread();

	if let Some(worker_threads) = config.runtime.worker_threads {
		runtime.worker_threads(worker_threads.get());
	}

	runtime
		.enable_all()
		.build()
		.context("failed to build tokio runtime")?
		.block_on(records_api::run(config))
		.context("failed to run server")
}

/// Loads the configuration file at `path`.
///
/// A missing file is only an error if the path was specified explicitly.
fn load_config(path: &Path, is_default: bool) -> anyhow::Result<Config>
{
	if is_default && !path.try_exists().context("failed to check for configuration file")? {
		return Ok(Config::default());
	}

	Config::load_from_file(path)
		.with_context(|| format!("failed to load configuration from `{}`", path.display()))
}
