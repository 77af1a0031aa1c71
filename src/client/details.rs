use super::selection::Selection;
use crate::error::ConnectError;
use crate::token::ConnectionDetails;
use reqwest::Url;
use tracing::{debug, info};

/// Source of connection details for a selection
#[async_trait::async_trait]
pub trait ConnectionDetailsSource: Send + Sync {
    async fn fetch(&self, selection: &Selection) -> Result<ConnectionDetails, ConnectError>;
}

/// Fetches connection details from the token endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpConnectionDetails {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpConnectionDetails {
    /// Resolve `endpoint` against `origin`. An absolute endpoint URL wins.
    pub fn new(origin: &str, endpoint: &str) -> Result<Self, ConnectError> {
        let endpoint = Url::parse(origin)
            .and_then(|base| base.join(endpoint))
            .map_err(|e| ConnectError::Endpoint(format!("{}: {}", endpoint, e)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint URL carrying the selection as query parameters
    pub fn request_url(&self, selection: &Selection) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("language", selection.language.code())
            .append_pair("voice", selection.voice.code());
        url
    }
}

#[async_trait::async_trait]
impl ConnectionDetailsSource for HttpConnectionDetails {
    async fn fetch(&self, selection: &Selection) -> Result<ConnectionDetails, ConnectError> {
        let url = self.request_url(selection);
        debug!("Requesting connection details from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let details: ConnectionDetails = response.json().await?;
        info!(
            "Received connection details for {} in {}",
            details.participant_name, details.room_name
        );

        Ok(details)
    }
}
