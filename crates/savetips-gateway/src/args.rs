use clap::Parser;
use savetips_common::telemetry::LogFormat;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Bind address. Falls back to 0.0.0.0:$PORT, then 0.0.0.0:8080.
    #[arg(long, env = "SAVETIPS_ADDR")]
    pub listen_addr: Option<String>,

    /// Seed for the promotional tip draw; unseeded when absent.
    #[arg(long, env = "SAVETIPS_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "SAVETIPS_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// OTLP endpoint for exporting traces (e.g. "http://127.0.0.1:4318").
    #[arg(long, env = "OTLP_URL")]
    pub otlp_url: Option<String>,

    /// Bearer token for the OTLP collector.
    #[arg(long, env = "OTLP_TOKEN")]
    pub otlp_token: Option<String>,
}

impl Args {
    pub fn resolve_listen_addr(&self) -> String {
        resolve_listen_addr(self.listen_addr.as_deref(), std::env::var("PORT").ok().as_deref())
    }
}

fn resolve_listen_addr(listen_addr: Option<&str>, port: Option<&str>) -> String {
    match (listen_addr, port) {
        (Some(addr), _) => addr.to_string(),
        (None, Some(port)) => format!("0.0.0.0:{port}"),
        (None, None) => "0.0.0.0:8080".to_string(),
    }
}
