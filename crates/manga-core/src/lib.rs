pub mod config;
pub mod error;
pub mod images;
pub mod ingest;
pub mod natural;
pub mod scroll;
pub mod state;
pub mod types;

pub use error::MangaError;
pub use ingest::{group_chapters, load_library, scan_directory};
pub use state::{ReaderState, ScrollHint};
pub use types::{Chapter, DisplayMode, FileEntry, Page, ViewPhase};
