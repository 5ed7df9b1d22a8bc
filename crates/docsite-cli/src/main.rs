//! docsite CLI
//!
//! Serves the documentation site and inspects its configuration.
//!
//! ## Usage
//!
//! ```bash
//! docsite serve --content build/pages --addr 0.0.0.0:8000
//! docsite redirects --config site.toml
//! docsite check --config site.toml
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use docsite_conf::{Settings, SettingsLoader, validation};
use docsite_server::{FsContentSource, HttpServer, ShutdownCoordinator, app, shutdown_signal};
use docsite_urls::RedirectTable;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Documentation site server", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Serve the documentation site
	Serve {
		/// Site settings file (defaults to the bundled configuration)
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,

		/// Directory holding pre-rendered pages and sidebar files
		#[arg(long, value_name = "DIR", default_value = "content")]
		content: PathBuf,

		/// Address to listen on
		#[arg(long, value_name = "ADDR", default_value = "127.0.0.1:8000")]
		addr: SocketAddr,

		/// Seconds to wait for the server to stop after Ctrl-C
		#[arg(long, value_name = "SECS", default_value_t = 10)]
		shutdown_timeout: u64,
	},

	/// Print the redirect table
	Redirects {
		/// Site settings file (defaults to the bundled configuration)
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},

	/// Validate the site settings
	Check {
		/// Site settings file (defaults to the bundled configuration)
		#[arg(long, value_name = "FILE")]
		config: Option<PathBuf>,
	},
}

fn default_filter(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "info",
		1 => "debug",
		_ => "trace",
	}
}

fn init_tracing(verbosity: u8) {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbosity).into()),
		)
		.init();
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	match cli.command {
		Commands::Serve {
			config,
			content,
			addr,
			shutdown_timeout,
		} => run_serve(config, content, addr, Duration::from_secs(shutdown_timeout)).await,
		Commands::Redirects { config } => {
			let settings = SettingsLoader::new().with_optional_file(config).load()?;
			print!("{}", format_redirects(&RedirectTable::from_rules(&settings.redirects)));
			Ok(())
		}
		Commands::Check { config } => {
			let report = check(config)?;
			println!("{}", report);
			Ok(())
		}
	}
}

async fn run_serve(
	config: Option<PathBuf>,
	content: PathBuf,
	addr: SocketAddr,
	shutdown_timeout: Duration,
) -> Result<()> {
	let settings = SettingsLoader::new().with_optional_file(config).load()?;
	if !content.is_dir() {
		tracing::warn!(path = %content.display(), "content directory does not exist");
	}

	let handler = app(Arc::new(settings), Arc::new(FsContentSource::new(content)));
	let coordinator = ShutdownCoordinator::new(shutdown_timeout);

	let signal = coordinator.clone();
	tokio::spawn(async move {
		shutdown_signal().await;
		signal.shutdown();
	});

	HttpServer::new(handler)
		.listen_with_shutdown(addr, coordinator.clone())
		.await
		.map_err(|err| anyhow!(err))
		.with_context(|| format!("server on {} failed", addr))?;

	coordinator.wait_for_shutdown().await;
	tracing::info!("server stopped");
	Ok(())
}

/// One line per redirect, in configuration order.
fn format_redirects(table: &RedirectTable) -> String {
	let width = table.iter().map(|(source, _)| source.len()).max().unwrap_or(0);
	table
		.iter()
		.map(|(source, redirect)| {
			format!(
				"{} {:width$} -> {}\n",
				redirect.kind.status_code(),
				source,
				redirect.destination,
				width = width
			)
		})
		.collect()
}

/// Loads settings without stopping at the first problem and reports them all.
fn check(config: Option<PathBuf>) -> Result<String> {
	let mut settings = match &config {
		Some(path) => Settings::from_file(path)?,
		None => Settings::bundled()?,
	};
	settings.apply_env_overrides();

	match validation::validate(&settings) {
		Ok(()) => Ok(format!(
			"ok: {} modules, {} redirects",
			settings.modules.len(),
			settings.redirects.len()
		)),
		Err(problems) => {
			for problem in &problems {
				tracing::error!("{}", problem);
			}
			Err(anyhow!("{} problem(s) found", problems.len()))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use docsite_conf::RedirectRule;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_cli_parses_serve() {
		let cli = Cli::try_parse_from([
			"docsite",
			"-vv",
			"serve",
			"--content",
			"pages",
			"--addr",
			"0.0.0.0:9000",
		])
		.unwrap();

		assert_eq!(cli.verbosity, 2);
		match cli.command {
			Commands::Serve { content, addr, config, .. } => {
				assert_eq!(content, PathBuf::from("pages"));
				assert_eq!(addr.port(), 9000);
				assert!(config.is_none());
			}
			_ => panic!("expected serve"),
		}
	}

	#[rstest]
	fn test_cli_rejects_bad_addr() {
		assert!(Cli::try_parse_from(["docsite", "serve", "--addr", "nowhere"]).is_err());
	}

	#[rstest]
	#[case(0, "info")]
	#[case(1, "debug")]
	#[case(5, "trace")]
	fn test_default_filter(#[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(default_filter(verbosity), expected);
	}

	#[rstest]
	fn test_format_redirects_aligns_sources() {
		let table = RedirectTable::from_rules(&[
			RedirectRule::temporary("/a", "/b"),
			RedirectRule::permanent("/longer", "/c"),
		]);

		assert_eq!(
			format_redirects(&table),
			"302 /a      -> /b\n301 /longer -> /c\n"
		);
	}

	#[rstest]
	fn test_check_bundled() {
		let report = check(None).unwrap();
		assert!(report.starts_with("ok: 7 modules"));
	}

	#[rstest]
	fn test_check_reports_problems() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[[modules]]
name = "widget"
versions = []

[[redirects]]
source = "relative"
destination = "/a"
"#
		)
		.unwrap();

		let error = check(Some(file.path().to_path_buf())).unwrap_err();
		assert_eq!(error.to_string(), "2 problem(s) found");
	}
}
