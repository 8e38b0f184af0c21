//! Loading of external assets.
//!
//! Natively assets are read from `./assets/`; on the web they are fetched from
//! `<origin>/assets/`. Everything here is async so the web build never blocks
//! the event loop.

use anyhow::Context as _;

use crate::config::RetryPolicy;

pub mod loader;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no browser window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("cannot read the page origin: {e:?}"))?;
    let base = reqwest::Url::parse(&format!("{origin}/assets/"))?;
    Ok(base.join(file_name)?)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?
    };

    Ok(data)
}

/// Fetch and decode an image, retrying according to `policy`.
pub async fn load_image(file_name: &str, policy: RetryPolicy) -> anyhow::Result<image::DynamicImage> {
    loader::with_retry(policy, file_name, |_| async move {
        let bytes = load_binary(file_name).await?;
        image::load_from_memory(&bytes).with_context(|| format!("cannot decode {file_name}"))
    })
    .await
}
