use clap::{Args, Parser, Subcommand};

/// ATP tennis match predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "tennis-predictor", version, about)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the match prediction web UI
    Serve(ServeConfig),
    /// Run aggregate statistics over the S3 match archive
    Analyze(AnalyzeConfig),
}

#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Web UI listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// Prediction API base URL
    #[arg(long, env = "TENNIS_API_URL", default_value = "http://3.139.106.131:8000")]
    pub api_url: String,

    /// Prediction request timeout in seconds
    #[arg(long, env = "PREDICT_TIMEOUT_SECS", default_value = "5")]
    pub predict_timeout_secs: u64,

    /// Connectivity probe timeout in seconds
    #[arg(long, env = "PROBE_TIMEOUT_SECS", default_value = "3")]
    pub probe_timeout_secs: u64,
}

impl ServeConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url must not be empty");
        }
        if self.predict_timeout_secs == 0 {
            anyhow::bail!("predict_timeout_secs must be positive");
        }
        if self.probe_timeout_secs == 0 {
            anyhow::bail!("probe_timeout_secs must be positive");
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeConfig {
    /// S3 bucket holding the match archive
    #[arg(long, env = "TENNIS_DATA_BUCKET", default_value = "tennis-cfu-2024")]
    pub bucket: String,

    /// Object key of the archive CSV within the bucket
    #[arg(long, env = "TENNIS_DATA_KEY", default_value = "data/atp_tennis.csv")]
    pub key: String,

    /// AWS region of the bucket
    #[arg(long, env = "AWS_DATA_REGION", default_value = "us-east-1")]
    pub region: String,

    /// How many rows to print in the most-active-players table
    #[arg(long, env = "TOP_PLAYERS", default_value = "10")]
    pub top_players: u32,
}

impl AnalyzeConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bucket.is_empty() {
            anyhow::bail!("bucket must not be empty");
        }
        if self.key.is_empty() {
            anyhow::bail!("key must not be empty");
        }
        if self.top_players == 0 {
            anyhow::bail!("top_players must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_config() -> ServeConfig {
        match Config::parse_from(["tennis-predictor", "serve"]).command {
            Command::Serve(cfg) => cfg,
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn serve_defaults() {
        let cfg = serve_config();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
        assert_eq!(cfg.predict_timeout_secs, 5);
        assert_eq!(cfg.probe_timeout_secs, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut cfg = serve_config();
        cfg.predict_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn analyze_defaults_and_overrides() {
        let parsed = Config::parse_from([
            "tennis-predictor",
            "analyze",
            "--bucket",
            "my-bucket",
            "--top-players",
            "5",
        ]);
        match parsed.command {
            Command::Analyze(cfg) => {
                assert_eq!(cfg.bucket, "my-bucket");
                assert_eq!(cfg.key, "data/atp_tennis.csv");
                assert_eq!(cfg.region, "us-east-1");
                assert_eq!(cfg.top_players, 5);
                assert!(cfg.validate().is_ok());
            }
            other => panic!("expected analyze, got {:?}", other),
        }
    }

    #[test]
    fn empty_bucket_is_rejected() {
        let mut cfg = match Config::parse_from(["tennis-predictor", "analyze"]).command {
            Command::Analyze(cfg) => cfg,
            other => panic!("expected analyze, got {:?}", other),
        };
        cfg.bucket.clear();
        assert!(cfg.validate().is_err());
    }
}
