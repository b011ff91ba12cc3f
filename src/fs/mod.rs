pub mod dirs;
pub mod selector;

pub use dirs::{ensure_dir, ensure_dirs};
pub use selector::{select_files, select_files_str, FieldMap, FileSelector, Selector};
