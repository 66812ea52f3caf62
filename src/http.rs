use tracing::{error, info, info_span};

use crate::error::TransportError;

/// Some sources refuse requests without a browser-looking agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.80 Safari/537.36";

/// Blocking GET boundary. Async callers run it under `spawn_blocking`.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, user_agent: Option<&str>) -> Result<String, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn get(&self, url: &str, user_agent: Option<&str>) -> Result<String, TransportError> {
        let fail = |reason: String| TransportError { url: url.to_string(), reason };

        let response_result = {
            let _span = info_span!("http_get", url = %url).entered();
            let mut request = ureq::get(url);
            if let Some(ua) = user_agent {
                request = request.header("User-Agent", ua);
            }
            request.call()
        };

        match response_result {
            Ok(response) => {
                let status = response.status().as_u16();
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => {
                        info!(status, bytes = body.len(), "Fetched source page");
                        Ok(body)
                    }
                    Err(e) => {
                        error!(error = %e, url = %url, "Failed to read response body");
                        Err(fail(format!("failed to read response body: {}", e)))
                    }
                }
            }
            Err(e) => {
                error!(error = %e, url = %url, "Request failed");
                Err(fail(e.to_string()))
            }
        }
    }
}
