use std::{collections::VecDeque, path::Path};

use super::{
    DirSizeError, NodeKind, chonk::Chonk, listing::{DirLister, FsLister}, probe_root,
    visit,
};

/// Walks the tree with a FIFO queue instead of the call stack, so depth is
/// only bounded by memory.
#[derive(Debug, Default, Clone)]
pub struct IterativeReader<L = FsLister> {
    lister: L,
}

impl IterativeReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: DirLister> IterativeReader<L> {
    pub fn with_lister(lister: L) -> Self {
        Self { lister }
    }
}

impl<L: DirLister> Chonk for IterativeReader<L> {
    fn get_dir_size(&self, dir: &Path) -> Result<u64, DirSizeError> {
        if let NodeKind::File(len) = probe_root(&self.lister, dir)? {
            return Ok(len);
        }

        let mut queue = VecDeque::from([dir.to_path_buf()]);
        let mut size = 0;
        while let Some(current) = queue.pop_front() {
            let node = visit(&self.lister, &current);
            size += node.local;
            queue.extend(node.children);
        }
        Ok(size)
    }
}
