pub mod logging;

pub use logging::{format_countdown, truncate_text};
