//! Command-line and environment configuration

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "sentiment-dashboard", author, version, about)]
pub struct Args {
    /// Fear/greed index CSV (columns: date, classification)
    #[arg(long, env = "SENTIMENT_CSV", default_value = "fear_greed_index.csv")]
    pub sentiment_path: PathBuf,

    /// Trade log CSV (columns: Timestamp IST, Coin, Side, Closed PnL, ...)
    #[arg(long, env = "TRADES_CSV", default_value = "historical_data.csv")]
    pub trades_path: PathBuf,

    /// Address to bind the web server to
    #[arg(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to run the web server on
    #[arg(short, long, env = "DASHBOARD_PORT", default_value = "8050")]
    pub port: u16,

    /// Directory holding index.html and app.js
    #[arg(long, env = "DASHBOARD_FRONTEND", default_value = "frontend")]
    pub frontend_dir: PathBuf,

    /// Print verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Default tracing directive for this crate
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "sentiment_dashboard=debug"
        } else {
            "sentiment_dashboard=info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sentiment-dashboard"]).unwrap();
        assert_eq!(args.sentiment_path, PathBuf::from("fear_greed_index.csv"));
        assert_eq!(args.trades_path, PathBuf::from("historical_data.csv"));
        assert_eq!(args.socket_addr(), "127.0.0.1:8050".parse::<SocketAddr>().unwrap());
        assert_eq!(args.log_directive(), "sentiment_dashboard=info");
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "sentiment-dashboard",
            "--trades-path",
            "data/trades.csv",
            "--host",
            "0.0.0.0",
            "-p",
            "9000",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.trades_path, PathBuf::from("data/trades.csv"));
        assert_eq!(args.socket_addr(), "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(args.log_directive(), "sentiment_dashboard=debug");
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Args::try_parse_from(["sentiment-dashboard", "--port", "99999"]).is_err());
    }
}
