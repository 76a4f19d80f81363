pub mod date_pattern;
pub mod dates;
pub mod mask;
pub mod numbers;
pub mod strings;

pub use crate::domain::model::{DateRange, MaskOptions, Period, RandomOptions};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
