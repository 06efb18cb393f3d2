use std::path::Path;

use super::DirSizeError;

/// A strategy for totalling the bytes of regular files under a directory.
pub trait Chonk {
    fn get_dir_size(&self, dir: &Path) -> Result<u64, DirSizeError>;
}
