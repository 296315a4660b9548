use cfgsync_store::RESERVED_PREFIX;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub(crate) struct DirEntryInfo {
    pub(crate) file_name: OsString,
    pub(crate) is_dir: bool,
}

/// In-flight dump files are named `.cfgsynctmp.<pid>-<n>`, a prefix no config name may use.
pub(crate) fn is_tmp_name(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}

// The stem does not embed the target name, so a 255-byte name still gets a valid sibling.
fn unique_tmp_path(target: &Path) -> PathBuf {
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    target.with_file_name(format!("{RESERVED_PREFIX}{}-{counter}", std::process::id()))
}

/// Creates `path` and its parents; existing directories are fine.
pub(crate) async fn create_dir(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path).await
}

/// Writes `data` to a unique sibling, syncs it and renames it over `target`.
///
/// On failure the temporary file is removed; `target` is either untouched or fully replaced.
pub(crate) async fn write_atomic(target: &Path, data: &[u8], mode: u32) -> io::Result<()> {
    let temp = unique_tmp_path(target);

    if let Err(err) = write_new(&temp, data, mode).await {
        discard(&temp).await;
        return Err(err);
    }

    if let Err(err) = fs::rename(&temp, target).await {
        discard(&temp).await;
        return Err(err);
    }

    if let Some(parent) = target.parent() {
        sync_dir(parent).await;
    }

    debug!(path = %target.display(), bytes = data.len(), "File saved atomically");
    Ok(())
}

async fn write_new(path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.create_new(true).write(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}

async fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path).await
        && err.kind() != io::ErrorKind::NotFound
    {
        warn!(path = %path.display(), error = %err, "Failed to remove temporary file");
    }
}

async fn sync_dir(path: &Path) {
    match fs::File::open(path).await {
        Ok(dir) => {
            if let Err(err) = dir.sync_all().await {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

/// Direct entries of `path`, sorted by name.
pub(crate) async fn list_dir(path: &Path) -> io::Result<Vec<DirEntryInfo>> {
    let mut reader = fs::read_dir(path).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        // Symlinks are not followed here; a dangling one fails later, on read.
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push(DirEntryInfo { file_name: entry.file_name(), is_dir });
    }

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_names_are_hidden_and_recognized() {
        let tmp = unique_tmp_path(Path::new("/srv/dump/db.yaml"));
        let name = tmp.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with(".cfgsynctmp."));
        assert!(is_tmp_name(name));
        assert_eq!(tmp.parent(), Some(Path::new("/srv/dump")));

        assert!(!is_tmp_name("db.yaml"));
        assert!(!is_tmp_name(".env"));
        assert!(!is_tmp_name(".a.cfgsynctmp.1-1"));
    }

    #[test]
    fn tmp_paths_are_unique() {
        let a = unique_tmp_path(Path::new("x"));
        let b = unique_tmp_path(Path::new("x"));
        assert_ne!(a, b);
    }

    #[test]
    fn tmp_name_length_ignores_target() {
        let long = "x".repeat(255);
        let tmp = unique_tmp_path(&Path::new("/srv/dump").join(&long));
        assert!(tmp.file_name().unwrap().len() < 64);
    }

    #[tokio::test]
    async fn atomic_write_replaces_and_leaves_no_residue() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("app.toml");

        write_atomic(&target, b"old", 0o600).await.unwrap();
        write_atomic(&target, b"new", 0o600).await.unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        let names: Vec<_> = list_dir(dir.path()).await.unwrap().into_iter().map(|e| e.file_name).collect();
        assert_eq!(names, [OsString::from("app.toml")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn atomic_write_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("secret");
        write_atomic(&target, b"x", 0o600).await.unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
