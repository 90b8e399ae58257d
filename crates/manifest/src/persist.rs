use {
    anyhow::{Context, Result},
    serde::{Serialize, de::DeserializeOwned},
    std::{fs, io::Write, path::Path},
};

/// Reads and parses a manifest file.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest {}", path.display()))
}

/// Replaces the manifest at `path` with the pretty-printed `manifest`.
///
/// The content is written to a sibling temporary file which is then renamed
/// over the destination, so a concurrent reader sees either the old or the
/// new manifest and never a truncated one.
pub fn store<T: Serialize>(path: &Path, manifest: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let json = serde_json::to_string_pretty(manifest)?;
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(json.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)
        .with_context(|| format!("failed to write manifest {}", path.display()))?;

    tracing::debug!(path = %path.display(), "stored manifest");
    Ok(())
}
