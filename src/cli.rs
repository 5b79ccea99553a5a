//! CLI argument handling.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use records_api::Config;

const DEFAULT_CONFIG_PATH: &str = "./records-api.toml";

/* NOTE:
 * We expose a free function here so callers don't need to have
 * `clap::Parser` in-scope.
 */
pub fn args() -> Args
{
	Args::parse()
}

/// HTTP server exposing the records collection.
///
/// The server requires a running MongoDB instance it can connect to. Its address can be set in
/// the configuration file or via the `DATABASE_URL` environment variable.
#[derive(Debug, Parser)]
pub struct Args
{
	/// Path to the configuration file.
	#[arg(long = "config", default_value = DEFAULT_CONFIG_PATH)]
	pub config_path: PathBuf,

	/// The IP address to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub ip: Option<IpAddr>,

	/// The port to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub port: Option<u16>,
}

impl Args
{
	/// Whether the configuration file path was left at its default value.
	pub fn config_path_is_default(&self) -> bool
	{
		self.config_path == Path::new(DEFAULT_CONFIG_PATH)
	}

	/// Applies any relevant config overrides specified as CLI flags in the given `config`
	/// object.
	pub fn apply_to_config(&self, config: &mut Config)
	{
		if let Some(ip) = self.ip {
			config.http.ip = ip;
		}

		if let Some(port) = self.port {
			config.http.port = port;
		}
	}
}
