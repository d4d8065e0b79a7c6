mod file_copier;
mod file_hasher;
mod file_scanner;
mod path_validator;

pub use file_copier::copy_file_atomic;
pub use file_hasher::{calculate_file_hash, files_identical};
pub use file_scanner::{SourceFile, scan_media_files};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
