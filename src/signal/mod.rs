pub mod decimate;
pub mod decitab;
pub mod filter;

pub use decimate::{decimate, decimate_slice, decimated_len, DecimateOptions, FilterType};
pub use decitab::{decitab, DecimationTable, Stages};
pub use filter::{cheby1, firwin, lfilter, FilterCoefficients};
