use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::error::{MatchdayError, Result};

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(MatchdayError::from)
    })
}

/// GET `url` and return the body, failing on non-2xx statuses.
pub fn fetch_text(url: &str) -> Result<String> {
    log::debug!("GET {}", url);
    let response = http_client()?.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}
