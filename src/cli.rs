//! Command-line interface definitions for the news extraction service.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;

/// Command-line arguments for the newsgrab service.
///
/// This struct defines all configuration options that can be passed to the
/// application at runtime: the bind address for the HTTP server, the default
/// per-site article cap, and the fetch/processing time limits.
///
/// # Examples
///
/// ```sh
/// # Defaults: bind 0.0.0.0:8000, 5 articles per site
/// newsgrab
///
/// # Custom bind address and a larger per-site cap
/// newsgrab --bind 127.0.0.1:9000 --max-news 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address and port to bind the HTTP server to
    #[arg(short, long, env = "NEWSGRAB_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// Maximum number of articles returned per site
    #[arg(long, env = "NEWSGRAB_MAX_NEWS", default_value_t = 5)]
    pub max_news: usize,

    /// Timeout for a single page fetch, in seconds
    #[arg(long, env = "NEWSGRAB_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Overall processing deadline per site, in seconds
    #[arg(long, env = "NEWSGRAB_SITE_DEADLINE_SECS", default_value_t = 120)]
    pub site_deadline_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["newsgrab"]);

        assert_eq!(cli.bind, "0.0.0.0:8000");
        assert_eq!(cli.max_news, 5);
        assert_eq!(cli.fetch_timeout_secs, 10);
        assert_eq!(cli.site_deadline_secs, 120);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "newsgrab",
            "--bind",
            "127.0.0.1:9000",
            "--max-news",
            "10",
            "--fetch-timeout-secs",
            "5",
        ]);

        assert_eq!(cli.bind, "127.0.0.1:9000");
        assert_eq!(cli.max_news, 10);
        assert_eq!(cli.fetch_timeout_secs, 5);
    }

    #[test]
    fn test_cli_short_bind_flag() {
        let cli = Cli::parse_from(["newsgrab", "-b", "0.0.0.0:8080"]);

        assert_eq!(cli.bind, "0.0.0.0:8080");
    }
}
