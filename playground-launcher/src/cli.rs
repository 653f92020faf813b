use backend::{CredentialPrecedence, GatewayConfig};
use clap::{Parser, ValueEnum};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Serve the model comparison playground and its completion gateway")]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,
    /// Directory holding the trunk-built frontend
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,
    /// Server-side API key for the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    /// Server-side base URL of the completion endpoint
    #[arg(long, env = "OPENAI_URL")]
    pub openai_url: Option<String>,
    /// Whether server or browser supplied credentials win when both are present
    #[arg(long, value_enum, default_value_t = Precedence::Environment)]
    pub credential_precedence: Precedence,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Precedence {
    Environment,
    Request,
}

impl Cli {
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_url.clone(),
            precedence: match self.credential_precedence {
                Precedence::Environment => CredentialPrecedence::Environment,
                Precedence::Request => CredentialPrecedence::Request,
            },
        }
    }
}
