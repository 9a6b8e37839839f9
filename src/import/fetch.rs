use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

// Timeout covers the network fetch only; extraction has none.
pub fn client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("kita-import/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let text = client.get(url).send().await?.error_for_status()?.text().await?;
    Ok(text)
}
