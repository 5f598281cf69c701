use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

const TEMP_ATTEMPTS: usize = 5;

/// Replace `path` with `data` through a synced temporary sibling and a rename,
/// so readers never observe a half-written file.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::other("path has no parent directory"))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path has no file name"))?
        .to_string_lossy()
        .into_owned();
    std::fs::create_dir_all(dir)?;

    let mut last_err = None;
    for _ in 0..TEMP_ATTEMPTS {
        let tmp_path = dir.join(format!("{file_name}.tmp-{:08x}", rand::random::<u32>()));
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(err) => return Err(err),
        };
        let written = file.write_all(data).and_then(|()| file.sync_all());
        drop(file);
        if let Err(err) = written.and_then(|()| replace_file(&tmp_path, path)) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }
        return Ok(());
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free temporary file name next to {}", path.display()),
        )
    }))
}

fn replace_file(temp_path: &Path, path: &Path) -> io::Result<()> {
    match std::fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        #[cfg(target_os = "windows")]
        Err(err)
            if err.kind() == io::ErrorKind::AlreadyExists
                || err.kind() == io::ErrorKind::PermissionDenied =>
        {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(inner) if inner.kind() == io::ErrorKind::NotFound => {}
                Err(inner) => return Err(inner),
            }
            std::fs::rename(temp_path, path)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn overwrites_existing_file_without_leaving_temporaries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        atomic_write(&path, b"[swipe]").unwrap();
        assert!(path.is_file());
    }
}
