use crate::error::GatewayError;
use shared::models::DEFAULT_BASE_URL;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Which side wins when both the server and the request supply a credential or endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CredentialPrecedence {
    /// Server configuration overrides the request.
    #[default]
    Environment,
    /// The request overrides server configuration.
    Request,
}

#[derive(Clone, Debug, Default)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub precedence: CredentialPrecedence,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedEndpoint {
    pub api_key: String,
    pub base_url: String,
}

impl GatewayConfig {
    /// Pick the effective key and endpoint. Blank values count as absent; the
    /// endpoint falls back to the public OpenAI URL.
    pub fn resolve(
        &self,
        request_key: Option<&str>,
        request_url: Option<&str>,
    ) -> Result<ResolvedEndpoint, GatewayError> {
        let api_key = self
            .pick(self.api_key.as_deref(), request_key)
            .ok_or(GatewayError::MissingCredential)?;
        let base_url = self
            .pick(self.base_url.as_deref(), request_url)
            .unwrap_or(DEFAULT_BASE_URL);

        Ok(ResolvedEndpoint {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn pick<'a>(&self, server: Option<&'a str>, request: Option<&'a str>) -> Option<&'a str> {
        let server = server.map(str::trim).filter(|v| !v.is_empty());
        let request = request.map(str::trim).filter(|v| !v.is_empty());
        match self.precedence {
            CredentialPrecedence::Environment => server.or(request),
            CredentialPrecedence::Request => request.or(server),
        }
    }
}
