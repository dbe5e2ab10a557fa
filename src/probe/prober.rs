use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::core::error::Result;
use crate::core::types::ProbeOutcome;
use crate::probe::ProbeSettings;
use crate::probe::classifier::{AttemptOutcome, Classification, classify};

/// One attempt against one target.
///
/// Implementations must never fail: every problem is reported through the
/// returned outcome so a single bad target cannot abort a batch.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &str) -> ProbeOutcome;
}

/// Probes targets with a single HTTPS GET.
///
/// Certificate verification is always on and uses the platform trust store.
/// Only the response head is awaited; the body is never read. A response is
/// only ever classified by status when it arrived over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpsProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpsProber {
    /// Build the prober and its HTTP client. Client construction is the only
    /// fallible step and happens before any probe is started.
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        Self::from_builder(Self::client_builder(settings), settings.timeout)
    }

    fn client_builder(settings: &ProbeSettings) -> reqwest::ClientBuilder {
        let redirect_policy = if settings.follow_redirects {
            Policy::limited(settings.max_redirects)
        } else {
            Policy::none()
        };
        let user_agent = settings.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        // No idle pooling: every probe, duplicates included, does its own handshake.
        reqwest::Client::builder()
            .redirect(redirect_policy)
            .user_agent(user_agent)
            .https_only(settings.https_only)
            .pool_max_idle_per_host(0)
    }

    fn from_builder(builder: reqwest::ClientBuilder, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: builder.build()?,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(&self, target: &str) -> AttemptOutcome {
        // Dropping the request future on expiry tears the connection down.
        match tokio::time::timeout(self.timeout, self.client.get(target).send()).await {
            Ok(Ok(response)) if response.url().scheme() == "https" => {
                AttemptOutcome::from_status(response.status())
            }
            // Only the final URL counts: a redirect may have downgraded the scheme.
            Ok(Ok(response)) => AttemptOutcome::from_plaintext_response(response.url()),
            Ok(Err(err)) => AttemptOutcome::from_error(&err),
            Err(_) => AttemptOutcome::TimedOut(self.timeout),
        }
    }
}

#[async_trait]
impl Probe for HttpsProber {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        let Classification { status, detail } = classify(&self.attempt(target).await);
        ProbeOutcome::new(target, status, detail)
    }
}
