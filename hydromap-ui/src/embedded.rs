//! Gzip-compressed GeoJSON embedded in the app binary.

use anyhow::Context;
use flate2::read::GzDecoder;
use std::io::Read;

/// Inflate one embedded file to text.
pub fn inflate(bytes: &[u8]) -> anyhow::Result<String> {
    let mut text = String::new();
    GzDecoder::new(bytes)
        .read_to_string(&mut text)
        .context("failed to inflate embedded GeoJSON")?;
    Ok(text)
}
