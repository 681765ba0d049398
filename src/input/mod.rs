//! Document ingestion for the CLI
//! Turns resume and job description files into plain text for scoring

pub mod file_detector;
pub mod text_extractor;
pub mod loader;

pub use file_detector::FileType;
pub use loader::DocumentLoader;
