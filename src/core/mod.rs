pub mod candlestick;
pub mod color;
pub mod generators;
pub mod point;
pub mod primitives;
pub mod types;

pub use candlestick::OhlcBar;
pub use color::Color;
pub use generators::{
    DEFAULT_PALETTE, LinearValues, TimeStepping, colored_series, fixed_series, linear_series,
    ohlc_at, ohlc_series, sparse_series,
};
pub use point::{
    DataShape, LinePoint, SeriesData, SeriesItem, validate_strictly_increasing,
};
pub use types::{Timestamp, Viewport};
