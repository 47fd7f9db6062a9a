// transport.rs
use crate::remote::RemoteError;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("listings-map/", env!("CARGO_PKG_VERSION"));

/// Blocking JSON GET. The catalog and geo clients only ever talk to this.
pub trait Transport {
    fn get_json(&self, url: &Url) -> Result<Value, RemoteError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_json(&self, url: &Url) -> Result<Value, RemoteError> {
        (**self).get_json(url)
    }
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &Url) -> Result<Value, RemoteError> {
        let resp = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}
