pub mod byte_size;
pub mod commands;
pub mod dir_size;
pub mod report;
pub mod settings;
pub mod table;

pub use byte_size::{ByteSize, ByteSizeError, ByteUnit};
pub use dir_size::{Chonk, DirSizeError, compute_size};
