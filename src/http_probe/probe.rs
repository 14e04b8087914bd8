use std::time::{Duration, Instant};

use reqwest::Client;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// A single check against the probe target.
/// Returns the HTTP status code of the response, or an error when no response was received.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self) -> Result<u16, ProbeError>;
}

/// Probes a fixed URL with an unauthenticated HTTP GET.
pub struct HttpProber {
    client: Client,
    url: Url,
}

impl HttpProber {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("oxyprobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProbeError::Client)?;
        Ok(HttpProber { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait::async_trait]
impl Prober for HttpProber {
    async fn probe(&self) -> Result<u16, ProbeError> {
        let start = Instant::now();
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| ProbeError::Transport {
                url: self.url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        log::debug!(
            "GET {} -> {} in {:.2}ms",
            self.url,
            status,
            start.elapsed().as_secs_f64() * 1000.0
        );
        // The body is never read; dropping the response releases the connection.
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prober_for(server: &MockServer, route: &str) -> HttpProber {
        let url = Url::parse(&format!("{}{}", server.uri(), route)).expect("valid url");
        HttpProber::new(url, Duration::from_secs(2)).expect("client")
    }

    #[tokio::test]
    async fn test_probe_reports_ok_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let prober = prober_for(&server, "/health");
        assert_eq!(prober.probe().await.expect("probe"), 200);
    }

    #[tokio::test]
    async fn test_probe_reports_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let prober = prober_for(&server, "/");
        assert_eq!(prober.probe().await.expect("probe"), 500);
    }

    #[tokio::test]
    async fn test_probe_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).expect("valid url");
        let prober = HttpProber::new(url, Duration::from_millis(100)).expect("client");
        let err = prober.probe().await.expect_err("should time out");
        assert!(matches!(err, ProbeError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_probe_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("local addr").port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).expect("valid url");
        let prober = HttpProber::new(url, Duration::from_secs(2)).expect("client");
        assert!(prober.probe().await.is_err());
    }
}
