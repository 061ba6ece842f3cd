use serde::de::DeserializeOwned;

/// Decodes a JSON response body, or fails with the status and the service's error body.
pub async fn json_or_error<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    let status = response.status();
    let url = response.url().clone();
    let response_txt = response.text().await?;
    if status.is_client_error() || status.is_server_error() {
        anyhow::bail!("Error: {} {}: {}", status, url.path(), response_txt);
    }
    tracing::debug!("response from {}: len = {}", url.path(), response_txt.len());
    let response: T = serde_json::from_str(&response_txt)?;
    Ok(response)
}
