pub mod indicator_result;
pub mod symbol;

pub use indicator_result::{IndicatorResult, MacdValue};
pub use symbol::Symbol;
