use rayon::prelude::*;
use std::path::Path;

use super::{
    DirSizeError, NodeKind, chonk::Chonk, listing::{DirLister, FsLister}, probe_root,
    visit,
};

/// Fans out one rayon task per subdirectory. Every branch returns its own
/// subtotal and the parent sums them; nothing is shared between tasks.
#[derive(Debug, Default, Clone)]
pub struct ParallelReader<L = FsLister> {
    lister: L,
}

impl ParallelReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: DirLister> ParallelReader<L> {
    pub fn with_lister(lister: L) -> Self {
        Self { lister }
    }

    fn walk(&self, dir: &Path) -> u64 {
        let node = visit(&self.lister, dir);
        let subtotal: u64 = node
            .children
            .par_iter()
            .map(|child| self.walk(child))
            .sum();
        node.local + subtotal
    }
}

impl<L: DirLister> Chonk for ParallelReader<L> {
    fn get_dir_size(&self, dir: &Path) -> Result<u64, DirSizeError> {
        match probe_root(&self.lister, dir)? {
            NodeKind::File(len) => Ok(len),
            NodeKind::Directory => Ok(self.walk(dir)),
        }
    }
}

// le tests
#[cfg(test)]
mod tests {
    use std::fs;

    use claims::assert_ok_eq;
    use tempfile::tempdir;

    use crate::dir_size::chonk::Chonk;

    use super::ParallelReader;

    #[test]
    fn test_parallel_dir_size() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a"), [0u8; 12]).unwrap();
        fs::create_dir_all(tmp.path().join("b/c")).unwrap();
        fs::write(tmp.path().join("b/c/d"), [0u8; 10]).unwrap();

        let method = ParallelReader::new();
        assert_ok_eq!(method.get_dir_size(tmp.path()), 22);
    }

    #[test]
    fn wide_tree() {
        let tmp = tempdir().unwrap();
        for i in 0..32 {
            let dir = tmp.path().join(format!("d{i}"));
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join("f"), vec![0u8; i]).unwrap();
        }
        // 0 + 1 + ... + 31
        assert_ok_eq!(ParallelReader::new().get_dir_size(tmp.path()), 496);
    }
}
