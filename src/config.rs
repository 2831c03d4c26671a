use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::time::Duration;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub temp_dir: String,
    pub max_file_size: u64,
    pub max_download_size: u64,
    pub download_timeout_secs: u64,
    pub convert_timeout_secs: u64,
    /// Accepted extensions, dotted and lowercase.
    pub supported_extensions: Vec<String>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Document-to-Markdown conversion API")]
pub struct Args {
    /// Host to bind to (overrides DOC2MD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides DOC2MD_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory for conversion temp files (overrides DOC2MD_TEMP_DIR)
    #[arg(long)]
    pub temp_dir: Option<String>,

    /// Maximum upload size in bytes (overrides DOC2MD_MAX_FILE_SIZE)
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Maximum URL download size in bytes (overrides DOC2MD_MAX_DOWNLOAD_SIZE)
    #[arg(long)]
    pub max_download_size: Option<u64>,

    /// URL download timeout in seconds (overrides DOC2MD_DOWNLOAD_TIMEOUT)
    #[arg(long)]
    pub download_timeout: Option<u64>,

    /// Per-document conversion timeout in seconds (overrides DOC2MD_CONVERT_TIMEOUT)
    #[arg(long)]
    pub convert_timeout: Option<u64>,
}

const DEFAULT_MAX_SIZE: u64 = 100 * 1024 * 1024;
const DEFAULT_EXTENSIONS: &str = ".pdf,.docx,.pptx,.xlsx,.html,.htm";

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_env(Args::parse())
    }

    /// Merge `args` over environment variables over built-in defaults.
    pub fn from_env(args: Args) -> Result<Self> {
        let env_host = env::var("DOC2MD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = env_parsed("DOC2MD_PORT", 8000)?;
        let env_temp = env::var("DOC2MD_TEMP_DIR").unwrap_or_else(|_| "./tmp/convert".into());
        let env_max_file = env_parsed("DOC2MD_MAX_FILE_SIZE", DEFAULT_MAX_SIZE)?;
        let env_max_download = env_parsed("DOC2MD_MAX_DOWNLOAD_SIZE", DEFAULT_MAX_SIZE)?;
        let env_dl_timeout = env_parsed("DOC2MD_DOWNLOAD_TIMEOUT", 30)?;
        let env_cv_timeout = env_parsed("DOC2MD_CONVERT_TIMEOUT", 120)?;
        let env_extensions =
            env::var("DOC2MD_SUPPORTED_EXTENSIONS").unwrap_or_else(|_| DEFAULT_EXTENSIONS.into());

        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            temp_dir: args.temp_dir.unwrap_or(env_temp),
            max_file_size: args.max_file_size.unwrap_or(env_max_file),
            max_download_size: args.max_download_size.unwrap_or(env_max_download),
            download_timeout_secs: args.download_timeout.unwrap_or(env_dl_timeout),
            convert_timeout_secs: args.convert_timeout.unwrap_or(env_cv_timeout),
            supported_extensions: parse_extensions(&env_extensions),
        };

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn convert_timeout(&self) -> Duration {
        Duration::from_secs(self.convert_timeout_secs)
    }

    /// Comma-joined extension list, for error messages and the format
    /// listing endpoint.
    pub fn extensions_csv(&self) -> String {
        self.supported_extensions.join(",")
    }
}

/// Read an env var that must parse as `T`, with a default when unset.
/// A present-but-unparseable value is a hard error, not a silent default.
fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}

fn parse_extensions(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|ext| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> Args {
        Args {
            host: None,
            port: None,
            temp_dir: None,
            max_file_size: None,
            max_download_size: None,
            download_timeout: None,
            convert_timeout: None,
        }
    }

    #[test]
    fn defaults_apply_without_env_or_flags() {
        // Note: assumes DOC2MD_* vars are unset in the test environment.
        let cfg = AppConfig::from_env(empty_args()).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.max_file_size, 100 * 1024 * 1024);
        assert!(cfg.supported_extensions.contains(&".pdf".to_string()));
        assert!(cfg.supported_extensions.contains(&".htm".to_string()));
    }

    #[test]
    fn cli_args_override_defaults() {
        let mut args = empty_args();
        args.port = Some(9001);
        args.max_file_size = Some(1024);
        let cfg = AppConfig::from_env(args).unwrap();
        assert_eq!(cfg.port, 9001);
        assert_eq!(cfg.max_file_size, 1024);
        assert_eq!(cfg.addr(), "0.0.0.0:9001");
    }

    #[test]
    fn extension_parsing_normalizes() {
        let exts = parse_extensions(" .PDF, .Html ,,.docx");
        assert_eq!(exts, vec![".pdf", ".html", ".docx"]);
    }
}
