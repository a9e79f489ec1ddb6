//! Filesystem collaborator used by the generation pipeline.
//!
//! Everything the core writes goes through [`FileSystem`] so tests and
//! dry runs can swap in their own implementation.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    pub overwrite: bool,
    pub preserve_timestamps: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            overwrite: true,
            preserve_timestamps: false,
        }
    }
}

pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents. Succeeds if it already exists.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Replace the file at `path` with `content`, creating parent directories.
    ///
    /// Readers never observe a partially written file.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// All regular files below `dir`, recursively, as full paths in sorted order.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Immediate subdirectories of `dir` in sorted order.
    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Copy a file, or a directory tree, from `src` to `dest`.
    fn copy(&self, src: &Path, dest: &Path, options: CopyOptions) -> io::Result<()>;

    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        use std::io::Write;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        // The rename must not cross filesystems.
        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(content.as_bytes())?;
        staged.flush()?;
        // Temp files are created 0600.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))?;
        }
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if !dir.exists() {
            return Ok(files);
        }

        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        if !dir.is_dir() {
            return Ok(dirs);
        }

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }

        Ok(dirs)
    }

    fn copy(&self, src: &Path, dest: &Path, options: CopyOptions) -> io::Result<()> {
        if src.is_dir() {
            for entry in WalkDir::new(src).min_depth(1) {
                let entry = entry.map_err(io::Error::from)?;
                let rel = entry
                    .path()
                    .strip_prefix(src)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                let target = dest.join(rel);
                if entry.file_type().is_dir() {
                    std::fs::create_dir_all(&target)?;
                } else if entry.file_type().is_file() {
                    copy_file(entry.path(), &target, options)?;
                }
            }
            std::fs::create_dir_all(dest)
        } else {
            copy_file(src, dest, options)
        }
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            std::fs::remove_dir_all(path)
        } else if path.exists() {
            std::fs::remove_file(path)
        } else {
            Ok(())
        }
    }
}

fn copy_file(src: &Path, dest: &Path, options: CopyOptions) -> io::Result<()> {
    if dest.exists() && !options.overwrite {
        return Ok(());
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(src, dest)?;

    if options.preserve_timestamps {
        let modified = std::fs::metadata(src)?.modified()?;
        let file = std::fs::File::options().write(true).open(dest)?;
        file.set_modified(modified)?;
    }

    Ok(())
}
