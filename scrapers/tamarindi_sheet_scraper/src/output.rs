use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{fs, path::Path};
use tracing::info;

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .context("Failed to serialize site data")?;
    Ok(buf)
}

/// Write through a sibling temp file so readers never see a partial document.
pub fn write_document<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let bytes = to_pretty_json(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &bytes).with_context(|| format!("Failed to write {:?}", tmp_path))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move {:?} into place", tmp_path))?;

    info!("Wrote {} bytes to {:?}", bytes.len(), path);
    Ok(())
}
