use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;

pub fn fetch_text(url: &str) -> Result<String> {
    static CLIENT: Lazy<Client> = Lazy::new(|| {
        Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent("EdisonPortal/0.1 (+https://github.com/edison/edison-portal)")
            .build()
            .expect("http client")
    });

    let response = CLIENT
        .get(url)
        .send()
        .with_context(|| format!("request failed for {url}"))?;
    let response = response
        .error_for_status()
        .with_context(|| format!("non-success status for {url}"))?;
    response
        .text()
        .with_context(|| format!("unable to read response body for {url}"))
}

pub fn clean_text(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_runs_of_whitespace() {
        assert_eq!(clean_text("  Sports \t Meet \n 2024 "), "Sports Meet 2024");
    }
}
