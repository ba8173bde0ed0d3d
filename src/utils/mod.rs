pub mod files;
pub mod size;

pub use files::open_input;
pub use size::readable_file_size;
