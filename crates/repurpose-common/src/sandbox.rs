use reqwest::redirect::{Attempt, Policy};
use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use crate::error::RepurposeError;

/// Hosts every client may reach without extra configuration.
const DEFAULT_ALLOWLIST: &[&str] = &[
    "clinicaltrials.gov", // ClinicalTrials
    "localhost",          // local mirrors / tests
    "127.0.0.1",          // Localhost alt
];

/// Same cap reqwest applies with its default policy.
const MAX_REDIRECTS: usize = 10;

/// An HTTP client that only allows requests to approved domains.
///
/// The allowlist is checked on the request URL and again on every redirect
/// hop. Cloning is cheap: the inner `reqwest::Client` shares one connection
/// pool, so a single instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: Arc<HashSet<String>>,
}

impl SandboxClient {
    /// Creates a client with the default allowlist and the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, RepurposeError> {
        Self::with_allowed_hosts(timeout, std::iter::empty::<&str>())
    }

    /// Creates a client whose allowlist is the default one plus `extra` exact hostnames.
    pub fn with_allowed_hosts<I, S>(timeout: Duration, extra: I) -> Result<Self, RepurposeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowlist: Arc<HashSet<String>> = Arc::new(
            DEFAULT_ALLOWLIST
                .iter()
                .map(|d| d.to_string())
                .chain(extra.into_iter().map(|d| d.as_ref().to_string()))
                .collect(),
        );

        let redirect_allowlist = Arc::clone(&allowlist);
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("repurpose/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::custom(move |attempt| check_redirect(&redirect_allowlist, attempt)))
            .build()?;

        Ok(Self { client, allowlist })
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|parsed| url_allowed(&self.allowlist, &parsed))
    }

    /// GET request builder, refused for hosts outside the allowlist.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, RepurposeError> {
        if !self.is_allowed(url) {
            return Err(RepurposeError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}

fn url_allowed(allowlist: &HashSet<String>, url: &Url) -> bool {
    let Some(host) = url.host_str() else { return false };
    // Exact match or a subdomain of an allowed domain
    allowlist
        .iter()
        .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
}

fn check_redirect(allowlist: &HashSet<String>, attempt: Attempt) -> reqwest::redirect::Action {
    if attempt.previous().len() > MAX_REDIRECTS {
        return attempt.error(RepurposeError::Security("too many redirects".to_string()));
    }
    if !url_allowed(allowlist, attempt.url()) {
        let msg = format!("redirect target not in allowlist: {}", attempt.url());
        return attempt.error(RepurposeError::Security(msg));
    }
    attempt.follow()
}
