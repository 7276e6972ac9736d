pub mod dto;
pub mod http;
pub mod image;
pub mod launcher;
pub mod paths;
pub mod storage;

pub use crate::http::HttpLibraryClient;
pub use crate::launcher::{BrowserLauncher, NoopLauncher};
pub use crate::paths::LensPaths;
