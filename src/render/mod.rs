mod baseline;
mod capture;

pub use baseline::{BaselineOutcome, compare_with_baseline, first_difference};
pub use capture::{
    CapturedValue, ChartSnapshot, FrameCapture, PriceLineSnapshot, PriceScaleSnapshot,
    SeriesSnapshot, TimeScaleSnapshot,
};
