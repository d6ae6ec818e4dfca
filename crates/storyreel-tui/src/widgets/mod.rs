mod content;
mod footer;
mod header;
mod progress_track;
mod status_bar;
mod text;

pub use content::ContentWidget;
pub use footer::FooterWidget;
pub use header::HeaderWidget;
pub use progress_track::{segment_spans, ProgressTrackWidget};
pub use status_bar::StatusBarWidget;
pub use text::{format_clock, relative_age, truncate_to_width};
