use std::time::Duration;

use reqwest::Client;

const APP_USER_AGENT: &str = "babric-meta/0.1.0";

/// Per-request ceiling. Profile builds depend on upstream fetches; a hung
/// upstream must fail the request instead of pinning a worker.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}
