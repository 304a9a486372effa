//! Interest rate conversion between nominal and effective annual rates

mod convert;
mod schedule;

pub use convert::{to_effective, to_nominal};
pub use schedule::{CompoundingSchedule, RateSpec};
