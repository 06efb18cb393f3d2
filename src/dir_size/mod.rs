pub mod chonk;
pub mod error;
pub mod iterative;
pub mod listing;
pub mod parallel;
pub mod recursive;

use std::{
    io,
    path::{Path, PathBuf},
};

use log::debug;

pub use chonk::Chonk;
pub use error::DirSizeError;
pub use iterative::IterativeReader;
pub use listing::{DirLister, FileEntry, FsLister, NodeKind};
pub use parallel::ParallelReader;
pub use recursive::RecursiveReader;

/// Total bytes of every regular file under `root`, read from the real
/// filesystem with the queue-based walker.
pub fn compute_size(root: &Path) -> Result<u64, DirSizeError> {
    IterativeReader::new().get_dir_size(root)
}

/// What a single directory adds on its own, plus the children left to visit.
pub(crate) struct Visit {
    pub local: u64,
    pub children: Vec<PathBuf>,
}

/// Reads one directory, zeroing it out instead of failing.
///
/// If the files can't be listed the directory contributes nothing and its
/// children are not visited. If only the subdirectories can't be listed the
/// files still count.
pub(crate) fn visit<L: DirLister + ?Sized>(lister: &L, dir: &Path) -> Visit {
    let local = match lister.list_files(dir) {
        Ok(files) => files.iter().map(|f| f.len).sum(),
        Err(err) => {
            debug!("could not list files in {}: {err}", dir.display());
            return Visit {
                local: 0,
                children: Vec::new(),
            };
        }
    };

    let children = match lister.list_subdirs(dir) {
        Ok(children) => children,
        Err(err) => {
            debug!("could not list subdirectories of {}: {err}", dir.display());
            Vec::new()
        }
    };

    Visit { local, children }
}

/// The root is the one place a failure is reported instead of zeroed.
pub(crate) fn probe_root<L: DirLister + ?Sized>(
    lister: &L,
    root: &Path,
) -> Result<NodeKind, DirSizeError> {
    lister.probe(root).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DirSizeError::NotFound(root.to_path_buf()),
        _ => DirSizeError::Io {
            path: root.to_path_buf(),
            source,
        },
    })
}

#[cfg(test)]
pub(crate) mod test_lister {
    use std::{
        collections::{HashMap, HashSet},
        io,
        path::{Path, PathBuf},
    };

    use super::{DirLister, FileEntry, NodeKind};

    /// In-memory tree. Directories must be added parent first.
    #[derive(Debug, Default, Clone)]
    pub struct MemLister {
        files: HashMap<PathBuf, Vec<u64>>,
        children: HashMap<PathBuf, Vec<PathBuf>>,
        unreadable: HashSet<PathBuf>,
        unlistable_subdirs: HashSet<PathBuf>,
    }

    impl MemLister {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn dir(mut self, path: &str, file_sizes: &[u64]) -> Self {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                if let Some(siblings) = self.children.get_mut(parent) {
                    siblings.push(path.clone());
                }
            }
            self.files.insert(path.clone(), file_sizes.to_vec());
            self.children.insert(path, Vec::new());
            self
        }

        /// Every listing of `path` fails.
        pub fn unreadable(mut self, path: &str) -> Self {
            self.unreadable.insert(PathBuf::from(path));
            self
        }

        /// Files of `path` list fine but its subdirectories don't.
        pub fn unlistable_subdirs(mut self, path: &str) -> Self {
            self.unlistable_subdirs.insert(PathBuf::from(path));
            self
        }

        fn check(&self, dir: &Path) -> io::Result<()> {
            if self.unreadable.contains(dir) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            if !self.files.contains_key(dir) {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            Ok(())
        }
    }

    impl DirLister for MemLister {
        fn probe(&self, path: &Path) -> io::Result<NodeKind> {
            if self.files.contains_key(path) {
                Ok(NodeKind::Directory)
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        }

        fn list_files(&self, dir: &Path) -> io::Result<Vec<FileEntry>> {
            self.check(dir)?;
            Ok(self.files[dir]
                .iter()
                .enumerate()
                .map(|(i, &len)| FileEntry {
                    path: dir.join(format!("file{i}")),
                    len,
                })
                .collect())
        }

        fn list_subdirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
            self.check(dir)?;
            if self.unlistable_subdirs.contains(dir) {
                return Err(io::Error::other("subdirectory listing failed"));
            }
            Ok(self.children[dir].clone())
        }
    }
}
