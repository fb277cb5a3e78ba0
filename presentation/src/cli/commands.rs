//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chat-gateway
#[derive(Parser, Debug)]
#[command(name = "chat-gateway")]
#[command(author, version, about = "HTTP chat-completion gateway for AWS Bedrock")]
#[command(long_about = r#"
chat-gateway accepts a conversation over HTTP and forwards it to a Bedrock
model, with a per-call timeout and bounded retries for transient failures.

Endpoints:
  GET  /         liveness message
  GET  /health   status and version
  POST /chat     {"messages": [{"role": "user", "content": "..."}]}

Configuration is loaded from (in priority order):
1. CHAT_GATEWAY_<SECTION>__<KEY>             Environment overrides
2. --config <path>                            Explicit config file
3. ./chat-gateway.toml                        Project-level config
4. ~/.config/chat-gateway/config.toml         Global config

Example:
  chat-gateway --bind 127.0.0.1:8080 -v
  CHAT_GATEWAY_PROVIDER__REGION=eu-west-1 chat-gateway --show-config
"#)]
pub struct Cli {
    /// Address to listen on (overrides server.bind)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
