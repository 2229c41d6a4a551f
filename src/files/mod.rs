//! Filesystem helpers: primitive operations, bulk renaming, discovery

mod discovery;
mod ops;
mod rename;

pub use discovery::{collect_audio_files, is_audio_file};
pub use ops::{move_file, remove_file, remove_path_with_files, rename_file, replace_file};
pub use rename::{keyword_target, rename, rename_by_keyword, rename_pairs, RenamePair, RenamePlan};
