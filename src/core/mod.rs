mod axis;
mod scale;
mod types;

pub use axis::{Measure, ValueAxis};
pub use scale::LinearScale;
pub use types::DataPoint;
