//! Print the metadata the hub reports for a dataset handle.
//!
//! Usage: cargo run --example view_metadata -- owner/dataset

use std::sync::Arc;

use kaggle_hub::{Configuration, DatasetHandle, KaggleHubClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "projjal1/human-conversation-training-data".to_string());
    let handle: DatasetHandle = raw.parse()?;

    let client = KaggleHubClient::new(Arc::new(Configuration::from_env()));
    let info = client.dataset_view(&handle).await?;

    println!("Dataset:  {}", handle);
    println!("Title:    {}", info.title.as_deref().unwrap_or("(untitled)"));
    println!(
        "Version:  {}",
        info.current_version_number
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );
    if let Some(bytes) = info.total_bytes {
        println!("Size:     {} bytes", bytes);
    }
    if let Some(license) = &info.license_name {
        println!("License:  {}", license);
    }

    Ok(())
}
