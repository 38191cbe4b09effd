mod directory;
mod filter;

pub use directory::Scanner;
pub use filter::{FileFilter, PathFilter};
