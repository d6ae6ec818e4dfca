pub mod config;
pub mod error;
pub mod gesture;
pub mod host;
pub mod playback;
pub mod presenter;
pub mod progress;
pub mod story;
pub mod viewer;

#[cfg(test)]
mod test_support;

pub use config::{AppConfig, PlaybackConfig};
pub use error::{Error, Result};
pub use host::{NoopHost, StoryHost};
pub use viewer::{FooterView, HeaderView, StoryViewer};
