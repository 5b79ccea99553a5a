//! Service configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZero;
use std::path::{Path, PathBuf};
use std::{env, fmt, fs, io};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{Directive, ParseError};

/// The global configuration for the service.
///
/// This is loaded from a TOML file on startup. Every section is optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config
{
	#[serde(default)]
	pub runtime: RuntimeConfig,

	#[serde(default)]
	pub http: HttpConfig,

	#[serde(default)]
	pub tracing: TracingConfig,

	#[serde(default)]
	pub database: DatabaseConfig,
}

/// Tokio configuration.
#[derive(Default, Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuntimeConfig
{
	/// The amount of worker threads to spawn.
	///
	/// If this value is omitted or 0, tokio will choose the amount.
	#[serde(default, deserialize_with = "deserialize_worker_threads")]
	pub worker_threads: Option<NonZero<usize>>,
}

fn deserialize_worker_threads<'de, D>(deserializer: D) -> Result<Option<NonZero<usize>>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	<usize as serde::Deserialize>::deserialize(deserializer).map(NonZero::new)
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HttpConfig
{
	/// The IP address the server should listen on.
	#[serde(default = "HttpConfig::default_ip")]
	pub ip: IpAddr,

	/// The port the server should listen on.
	#[serde(default = "HttpConfig::default_port")]
	pub port: u16,

	/// The base URI used for the `type` member of error responses.
	#[serde(default = "HttpConfig::default_problem_base_uri")]
	pub problem_base_uri: Box<str>,

	/// CORS settings.
	#[serde(default)]
	pub cors: CorsConfig,
}

impl HttpConfig
{
	/// Returns the [`SocketAddr`] that the HTTP server should listen on.
	pub fn socket_addr(&self) -> SocketAddr
	{
		SocketAddr::new(self.ip, self.port)
	}

	fn default_ip() -> IpAddr
	{
		IpAddr::V4(Ipv4Addr::LOCALHOST)
	}

	fn default_port() -> u16
	{
		5050_u16
	}

	fn default_problem_base_uri() -> Box<str>
	{
		Box::from("/problems")
	}
}

impl Default for HttpConfig
{
	fn default() -> Self
	{
		Self {
			ip: Self::default_ip(),
			port: Self::default_port(),
			problem_base_uri: Self::default_problem_base_uri(),
			cors: CorsConfig::default(),
		}
	}
}

#[derive(Default, Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CorsConfig
{
	/// Origins that are allowed to make cross-origin requests.
	///
	/// If this list is empty, any origin is allowed.
	#[serde(default)]
	pub allowed_origins: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TracingConfig
{
	/// Whether to enable tracing.
	#[serde(default = "default_true")]
	pub enable: bool,

	/// Whether to include HTTP headers in request lifecycle traces.
	#[serde(default)]
	pub include_http_headers: bool,

	/// Filter directives that apply to every layer, in addition to `RUST_LOG`.
	#[serde(default)]
	pub filters: Vec<String>,

	#[serde(default)]
	pub stderr: StderrConfig,

	#[serde(default)]
	pub files: FilesConfig,
}

impl TracingConfig
{
	/// Constructs an [`EnvFilter`] from `RUST_LOG` and the directives specified in the config.
	pub fn env_filter(&self) -> Result<EnvFilter, ParseError>
	{
		let base = EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new("records_api=debug,warn"));

		self.filters
			.iter()
			.map(|directive| directive.parse::<Directive>())
			.try_fold(base, |filter, directive| directive.map(|d| filter.add_directive(d)))
	}
}

impl Default for TracingConfig
{
	fn default() -> Self
	{
		Self {
			enable: true,
			include_http_headers: false,
			filters: Vec::new(),
			stderr: StderrConfig::default(),
			files: FilesConfig::default(),
		}
	}
}

/// Tracing configuration for emitting logs to stderr.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StderrConfig
{
	/// Emit traces to stderr.
	#[serde(default = "default_true")]
	pub enable: bool,

	/// Whether to use ANSI escape codes for colors.
	#[serde(default = "default_true")]
	pub ansi: bool,
}

impl Default for StderrConfig
{
	fn default() -> Self
	{
		Self { enable: true, ansi: true }
	}
}

/// Tracing configuration for emitting logs to files.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilesConfig
{
	/// Emit traces to files.
	#[serde(default)]
	pub enable: bool,

	/// Directory to store log files in.
	#[serde(default = "FilesConfig::default_directory")]
	pub directory: PathBuf,
}

impl FilesConfig
{
	fn default_directory() -> PathBuf
	{
		PathBuf::from("./logs")
	}
}

impl Default for FilesConfig
{
	fn default() -> Self
	{
		Self { enable: false, directory: Self::default_directory() }
	}
}

fn default_true() -> bool
{
	true
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DatabaseConfig
{
	/// The connection string we should connect with.
	///
	/// If this is omitted, the `DATABASE_URL` environment variable is used, and if that is not
	/// set either, a local MongoDB instance on the default port.
	#[serde(default = "DatabaseConfig::default_url")]
	pub url: Box<str>,

	/// The name of the database holding the records.
	#[serde(default = "DatabaseConfig::default_name")]
	pub name: Box<str>,

	/// The name of the collection holding the records.
	#[serde(default = "DatabaseConfig::default_collection")]
	pub collection: Box<str>,

	/// The amount of connections to keep open at all times.
	#[serde(default)]
	pub min_connections: u32,

	/// The maximum amount of connections to open at once.
	///
	/// If this value is omitted, the driver's default is used.
	#[serde(default)]
	pub max_connections: Option<NonZero<u32>>,
}

impl DatabaseConfig
{
	fn default_url() -> Box<str>
	{
		env::var("DATABASE_URL")
			.map_or_else(|_| Box::from("mongodb://localhost:27017"), String::into_boxed_str)
	}

	fn default_name() -> Box<str>
	{
		Box::from("employees")
	}

	fn default_collection() -> Box<str>
	{
		Box::from("records")
	}

	/// Returns [`DatabaseConfig::url`] with any credentials replaced by `***`.
	fn redacted_url(&self) -> String
	{
		let Some((scheme, rest)) = self.url.split_once("://") else {
			return self.url.to_string();
		};

		match rest.split_once('@') {
			Some((_credentials, hosts)) => format!("{scheme}://***@{hosts}"),
			None => self.url.to_string(),
		}
	}
}

impl Default for DatabaseConfig
{
	fn default() -> Self
	{
		Self {
			url: Self::default_url(),
			name: Self::default_name(),
			collection: Self::default_collection(),
			min_connections: 0,
			max_connections: None,
		}
	}
}

impl fmt::Debug for DatabaseConfig
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt.debug_struct("DatabaseConfig")
			.field("url", &self.redacted_url())
			.field("name", &self.name)
			.field("collection", &self.collection)
			.field("min_connections", &self.min_connections)
			.field("max_connections", &self.max_connections)
			.finish()
	}
}

/// Errors that can occur when loading the [`Config`] from a file.
#[derive(Debug, Error)]
pub enum LoadFromFileError
{
	#[error("failed to read configuration file: {0}")]
	ReadFile(#[source] io::Error),

	#[error("failed to parse configuration file: {0}")]
	Deserialize(#[source] toml::de::Error),
}

impl Config
{
	/// Loads a file into memory and parses it into a [`Config`] object.
	pub fn load_from_file(path: &Path) -> Result<Self, LoadFromFileError>
	{
		fs::read_to_string(path)
			.map(|file_contents| toml::from_str(&file_contents))
			.map_err(LoadFromFileError::ReadFile)?
			.map_err(LoadFromFileError::Deserialize)
	}
}
