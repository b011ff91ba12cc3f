/// Timestamp formats
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIME_FORMAT_VERBOSE: &str = "%a, %d %b %Y %H:%M:%S";
pub const TIME_FORMAT_FILENAME: &str = "%Y-%m-%d_%H-%M-%S";

/// Configuration sources
pub const CONFIG_FILE_STEM: &str = "seismo-util";
pub const ENV_PREFIX: &str = "SEISMO";

/// Logging defaults
pub const PROGRAM_NAME: &str = "seismo-util";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_TARGET_WIDTH: usize = 20;
pub const LOG_LEVEL_WIDTH: usize = 8;

/// Decimation filter defaults
pub const DEFAULT_FIR_ORDER: usize = 30;
pub const DEFAULT_IIR_ORDER: usize = 8;
pub const IIR_PASSBAND_RIPPLE_DB: f64 = 0.05;
pub const IIR_CUTOFF_SCALE: f64 = 0.8;

/// Largest single stage the decimation table considers
pub const DECITAB_MAX_STAGE: u32 = 9;
pub const DECITAB_INITIAL_MAX: u32 = 100;

/// Progress labels
pub const SELECT_FILES_LABEL: &str = "selecting files...";
