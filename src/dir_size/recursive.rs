use std::path::Path;

use super::{
    DirSizeError, NodeKind, chonk::Chonk, listing::{DirLister, FsLister}, probe_root,
    visit,
};

/// Plain call-stack recursion, one frame per directory level.
#[derive(Debug, Default, Clone)]
pub struct RecursiveReader<L = FsLister> {
    lister: L,
}

impl RecursiveReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: DirLister> RecursiveReader<L> {
    pub fn with_lister(lister: L) -> Self {
        Self { lister }
    }

    fn walk(&self, dir: &Path) -> u64 {
        let node = visit(&self.lister, dir);
        let subtotal: u64 = node.children.iter().map(|child| self.walk(child)).sum();
        node.local + subtotal
    }
}

impl<L: DirLister> Chonk for RecursiveReader<L> {
    fn get_dir_size(&self, dir: &Path) -> Result<u64, DirSizeError> {
        match probe_root(&self.lister, dir)? {
            NodeKind::File(len) => Ok(len),
            NodeKind::Directory => Ok(self.walk(dir)),
        }
    }
}
