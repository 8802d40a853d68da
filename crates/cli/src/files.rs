//! Loading candidate files from disk.

use std::path::Path;

use anyhow::Context;
use contentscan_core::input::CandidateFile;

/// Read each path into a [`CandidateFile`], keeping the given order.
///
/// The MIME type is inferred from the extension; unknown extensions load
/// as `application/octet-stream`.
pub async fn load_candidates<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<CandidateFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::debug!(file = %name, bytes = data.len(), "Loaded candidate file");
        files.push(CandidateFile::from_bytes(name, data));
    }
    Ok(files)
}
