pub mod text;
pub mod time;

pub use text::truncate_preview;
pub use time::current_human_timestamp;
