use std::path::{Path, PathBuf};

use chrono::Utc;

/// Extension stamped on every stored recording.
const AUDIO_EXT: &str = "webm";

/// Ensure the uploads directory exists and purge any artifacts left over
/// from a previous run.
pub fn prepare_upload_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut purged = 0usize;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            std::fs::remove_file(entry.path())?;
            purged += 1;
        }
    }
    if purged > 0 {
        tracing::info!(purged, dir = %dir.display(), "purged leftover upload artifacts");
    }
    Ok(())
}

/// A temporary audio artifact on disk.
///
/// Removal is tied to scope exit: `Drop` runs exactly once, on success and
/// error paths alike, and skips the removal when the file is already gone.
#[derive(Debug)]
pub struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// Write `bytes` to a timestamp-named file inside `dir`.
    pub fn create(dir: &Path, bytes: &[u8]) -> std::io::Result<Self> {
        let name = format!("recording-{}.{AUDIO_EXT}", Utc::now().timestamp_millis());
        let path = dir.join(name);
        std::fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "stored upload artifact");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove upload artifact");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "veritas-uploads-{tag}-{}",
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn artifact_removed_on_drop() {
        let dir = temp_dir("drop");
        let path = {
            let artifact = TempArtifact::create(&dir, b"fake audio").unwrap();
            assert!(artifact.path().exists());
            artifact.path().to_path_buf()
        };
        assert!(!path.exists(), "artifact should be gone after drop");
    }

    #[test]
    fn drop_tolerates_already_removed_file() {
        let dir = temp_dir("idempotent");
        let artifact = TempArtifact::create(&dir, b"fake audio").unwrap();
        std::fs::remove_file(artifact.path()).unwrap();
        // Drop must not panic on the missing file.
        drop(artifact);
    }

    #[test]
    fn artifact_name_carries_audio_extension() {
        let dir = temp_dir("name");
        let artifact = TempArtifact::create(&dir, b"x").unwrap();
        let name = artifact.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("recording-"));
        assert!(name.ends_with(".webm"));
    }

    #[test]
    fn prepare_creates_missing_dir() {
        let dir = temp_dir("create").join("nested");
        assert!(!dir.exists());
        prepare_upload_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn prepare_purges_existing_files() {
        let dir = temp_dir("purge");
        std::fs::write(dir.join("stale-1.webm"), b"old").unwrap();
        std::fs::write(dir.join("stale-2.webm"), b"old").unwrap();

        prepare_upload_dir(&dir).unwrap();

        let remaining = std::fs::read_dir(&dir).unwrap().count();
        assert_eq!(remaining, 0);
    }
}
