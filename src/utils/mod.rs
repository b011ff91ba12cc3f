pub mod constants;
pub mod intern;
pub mod progress;
pub mod time;

pub use constants::*;
pub use intern::{intern_str, Interner};
pub use progress::{
    progress_begin, progress_end, set_show_progress, show_progress, ProgressReporter, Stopwatch,
};
pub use time::{from_epoch, from_epoch_filename, from_epoch_verbose, plural_suffix, to_epoch};
