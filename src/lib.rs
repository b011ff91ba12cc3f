pub mod cli;
pub mod error;
pub mod fs;
pub mod logging;
pub mod settings;
pub mod signal;
pub mod utils;

pub use error::{Result, UtilError};
pub use logging::setup_logging;
pub use settings::Settings;
