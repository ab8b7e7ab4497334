mod chart_options;
mod facade;
mod price_line;
mod series_options;
mod validation;

pub use chart_options::{
    ChartOptions, LayoutOptions, PriceScaleMode, PriceScaleOptions, TimeScaleOptions,
};
pub use facade::{
    ChartBackend, ChartHandle, PriceLineId, SeriesHandle, SeriesId, TimeRange, TimeScaleHandle,
    create_chart, create_chart_with_backend,
};
pub use price_line::PriceLineOptions;
pub use series_options::{
    BarStyleOptions, LineStyle, PriceFormat, PriceRange, PriceScaleId, SeriesKind, SeriesOptions,
};
