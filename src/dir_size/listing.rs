use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub len: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File(u64),
}

/// Read access to a directory tree.
///
/// Every method may fail; callers decide whether a failure is fatal. A
/// listing either succeeds as a whole or fails as a whole, so a directory
/// with one unreadable entry is treated like an unreadable directory.
pub trait DirLister: Sync {
    /// Looks at `path` itself, following symlinks.
    fn probe(&self, path: &Path) -> io::Result<NodeKind>;

    /// Regular files directly inside `dir`.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<FileEntry>>;

    /// Directories directly inside `dir`. Symlinks are not followed.
    fn list_subdirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

impl<L: DirLister + ?Sized> DirLister for &L {
    fn probe(&self, path: &Path) -> io::Result<NodeKind> {
        (**self).probe(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<FileEntry>> {
        (**self).list_files(dir)
    }

    fn list_subdirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_subdirs(dir)
    }
}

/// Lists the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirLister for FsLister {
    fn probe(&self, path: &Path) -> io::Result<NodeKind> {
        let meta = fs::metadata(path)?;
        if meta.is_dir() {
            Ok(NodeKind::Directory)
        } else {
            Ok(NodeKind::File(meta.len()))
        }
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<FileEntry>> {
        fs::read_dir(dir)?
            .map(|entry| -> io::Result<Option<FileEntry>> {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    return Ok(None);
                }
                Ok(Some(FileEntry {
                    path: entry.path(),
                    len: entry.metadata()?.len(),
                }))
            })
            .filter_map(Result::transpose)
            .collect()
    }

    fn list_subdirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(dir)?
            .map(|entry| -> io::Result<Option<PathBuf>> {
                let entry = entry?;
                // file_type does not follow symlinks
                Ok(entry.file_type()?.is_dir().then(|| entry.path()))
            })
            .filter_map(Result::transpose)
            .collect()
    }
}
