use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{SeriesData, SeriesItem, Timestamp, Viewport};
use crate::error::{ScenarioError, ScenarioResult};
use crate::frame::Container;
use crate::headless::HeadlessChart;
use crate::render::ChartSnapshot;

use super::{ChartOptions, PriceLineOptions, SeriesKind, SeriesOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u32);

impl SeriesId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriceLineId(u32);

impl PriceLineId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Visible time interval requested through `set_visible_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeRange {
    pub from: Timestamp,
    pub to: Timestamp,
}

impl TimeRange {
    #[must_use]
    pub fn new(from: impl Into<Timestamp>, to: impl Into<Timestamp>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Contract implemented by any chart engine driven by scenarios.
///
/// Options and data reach the backend already validated by the handles; the
/// backend owns everything about how state is turned into a frame.
pub trait ChartBackend {
    fn resize(&mut self, viewport: Viewport) -> ScenarioResult<()>;

    fn add_series(&mut self, kind: SeriesKind, options: SeriesOptions) -> ScenarioResult<SeriesId>;

    fn set_data(&mut self, series: SeriesId, data: SeriesData) -> ScenarioResult<()>;

    fn update(&mut self, series: SeriesId, item: SeriesItem) -> ScenarioResult<()>;

    fn create_price_line(
        &mut self,
        series: SeriesId,
        options: PriceLineOptions,
    ) -> ScenarioResult<PriceLineId>;

    fn fit_content(&mut self) -> ScenarioResult<()>;

    fn set_visible_range(&mut self, range: TimeRange) -> ScenarioResult<()>;

    /// Materializes current state for one frame.
    fn snapshot(&mut self) -> ScenarioResult<ChartSnapshot>;
}

type SharedBackend = Rc<RefCell<dyn ChartBackend>>;

/// Creates a chart backed by the in-process [`HeadlessChart`] and attaches it
/// to `container`.
pub fn create_chart(container: &Container, options: ChartOptions) -> ScenarioResult<ChartHandle> {
    let options = options.validate()?;
    let backend = HeadlessChart::new(container.viewport(), options)?;
    create_chart_with_backend(container, backend)
}

/// Attaches an externally provided backend to `container`.
pub fn create_chart_with_backend(
    container: &Container,
    backend: impl ChartBackend + 'static,
) -> ScenarioResult<ChartHandle> {
    let backend: SharedBackend = Rc::new(RefCell::new(backend));
    let chart = ChartHandle { backend };
    container.attach_chart(chart.clone());
    debug!(charts = container.chart_count(), "chart attached to container");
    Ok(chart)
}

/// Caller-held chart handle. Clones share the same chart.
#[derive(Clone)]
pub struct ChartHandle {
    backend: SharedBackend,
}

impl fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartHandle").finish_non_exhaustive()
    }
}

impl ChartHandle {
    pub fn add_series(
        &self,
        kind: SeriesKind,
        options: SeriesOptions,
    ) -> ScenarioResult<SeriesHandle> {
        let options = options.validate(kind)?;
        let id = self.backend.borrow_mut().add_series(kind, options)?;
        debug!(series = %id, ?kind, "series added");
        Ok(SeriesHandle {
            backend: Rc::clone(&self.backend),
            id,
            kind,
        })
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScaleHandle {
        TimeScaleHandle {
            backend: Rc::clone(&self.backend),
        }
    }

    pub fn snapshot(&self) -> ScenarioResult<ChartSnapshot> {
        self.backend.borrow_mut().snapshot()
    }

    pub(crate) fn resize(&self, viewport: Viewport) -> ScenarioResult<()> {
        self.backend.borrow_mut().resize(viewport)
    }
}

/// Caller-held series handle.
#[derive(Clone)]
pub struct SeriesHandle {
    backend: SharedBackend,
    id: SeriesId,
    kind: SeriesKind,
}

impl fmt::Debug for SeriesHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl SeriesHandle {
    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Replaces the whole data set.
    pub fn set_data(&self, data: impl Into<SeriesData>) -> ScenarioResult<()> {
        let data = data.into();
        if data.shape() != self.kind.data_shape() {
            return Err(ScenarioError::InvalidData(format!(
                "{:?} series expects {:?} items, got {:?}",
                self.kind,
                self.kind.data_shape(),
                data.shape()
            )));
        }
        data.validate()?;
        debug!(series = %self.id, items = data.len(), "series data set");
        self.backend.borrow_mut().set_data(self.id, data)
    }

    /// Replaces the item at an equal time or appends a newer one.
    pub fn update(&self, item: impl Into<SeriesItem>) -> ScenarioResult<()> {
        let item = item.into();
        if item.shape() != self.kind.data_shape() {
            return Err(ScenarioError::InvalidData(format!(
                "{:?} series expects {:?} items, got {:?}",
                self.kind,
                self.kind.data_shape(),
                item.shape()
            )));
        }
        item.validate()?;
        debug!(series = %self.id, time = %item.time(), "series item updated");
        self.backend.borrow_mut().update(self.id, item)
    }

    pub fn create_price_line(&self, options: PriceLineOptions) -> ScenarioResult<PriceLineId> {
        let options = options.validate()?;
        self.backend
            .borrow_mut()
            .create_price_line(self.id, options)
    }
}

/// Time-scale controls of one chart.
#[derive(Clone)]
pub struct TimeScaleHandle {
    backend: SharedBackend,
}

impl fmt::Debug for TimeScaleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeScaleHandle").finish_non_exhaustive()
    }
}

impl TimeScaleHandle {
    pub fn fit_content(&self) -> ScenarioResult<()> {
        self.backend.borrow_mut().fit_content()
    }

    pub fn set_visible_range(&self, range: TimeRange) -> ScenarioResult<()> {
        if range.from > range.to {
            return Err(ScenarioError::InvalidData(format!(
                "visible range start {} is after end {}",
                range.from, range.to
            )));
        }
        self.backend.borrow_mut().set_visible_range(range)
    }
}
