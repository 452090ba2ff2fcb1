//! Read-only filesystem queries scoped to the project root.
//!
//! - **glob**: pattern-based file enumeration
//! - **tree**: depth-bounded directory tree rendering

mod error;
pub mod glob;
pub mod tree;


pub use error::FsError;
pub use glob::{GlobSearch, find_files};
pub use tree::{DEPENDENCY_DIR, is_excluded, render_tree};
