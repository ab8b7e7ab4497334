use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::api::{
    ChartBackend, ChartOptions, PriceLineId, PriceLineOptions, PriceRange, PriceScaleId,
    PriceScaleOptions, SeriesId, SeriesKind, SeriesOptions, TimeRange,
};
use crate::core::primitives::format_price;
use crate::core::{SeriesData, SeriesItem, Timestamp, Viewport};
use crate::error::{ScenarioError, ScenarioResult};
use crate::render::{
    CapturedValue, ChartSnapshot, PriceLineSnapshot, PriceScaleSnapshot, SeriesSnapshot,
    TimeScaleSnapshot,
};

use super::time_scale::{StrictRange, TimePointIndex, TimeScale};

#[derive(Debug, Clone)]
struct SeriesState {
    kind: SeriesKind,
    options: SeriesOptions,
    items: Vec<SeriesItem>,
    price_lines: SmallVec<[(PriceLineId, PriceLineOptions); 2]>,
}

impl SeriesState {
    fn last_time(&self) -> Option<Timestamp> {
        self.items.last().map(SeriesItem::time)
    }
}

/// In-process reference backend.
///
/// Keeps the merged timeline, logical time-scale state and per-scale
/// autoscale ranges so every frame can be captured as plain data. It never
/// rasterizes anything.
#[derive(Debug, Clone)]
pub struct HeadlessChart {
    viewport: Viewport,
    options: ChartOptions,
    time_scale: TimeScale,
    timeline: Vec<Timestamp>,
    price_scales: IndexMap<PriceScaleId, PriceScaleOptions>,
    series: IndexMap<SeriesId, SeriesState>,
    next_series_id: u32,
    next_price_line_id: u32,
}

impl HeadlessChart {
    pub fn new(viewport: Viewport, options: ChartOptions) -> ScenarioResult<Self> {
        let options = options.validate()?;
        let mut price_scales = IndexMap::new();
        price_scales.insert(PriceScaleId::Right, options.right_price_scale);
        price_scales.insert(PriceScaleId::Left, options.left_price_scale);
        Ok(Self {
            viewport,
            options,
            time_scale: TimeScale::new(options.time_scale, f64::from(viewport.width)),
            timeline: Vec::new(),
            price_scales,
            series: IndexMap::new(),
            next_series_id: 0,
            next_price_line_id: 0,
        })
    }

    #[must_use]
    pub fn options(&self) -> ChartOptions {
        self.options
    }

    #[must_use]
    pub fn timeline(&self) -> &[Timestamp] {
        &self.timeline
    }

    fn series_mut(&mut self, id: SeriesId) -> ScenarioResult<&mut SeriesState> {
        self.series
            .get_mut(&id)
            .ok_or(ScenarioError::UnknownSeries(id.raw()))
    }

    /// Rebuilds the merged timeline and returns the new base index.
    fn rebuild_timeline(&mut self) -> Option<TimePointIndex> {
        let mut merged: Vec<Timestamp> = self
            .series
            .values()
            .flat_map(|series| series.items.iter().map(SeriesItem::time))
            .collect();
        merged.sort();
        merged.dedup();
        self.timeline = merged;
        self.time_scale.set_points_len(self.timeline.len());

        self.series
            .values()
            .filter_map(|series| {
                series
                    .items
                    .iter()
                    .rev()
                    .find(|item| item.has_value())
                    .map(SeriesItem::time)
            })
            .max()
            .and_then(|time| self.index_of(time))
    }

    fn index_of(&self, time: Timestamp) -> Option<TimePointIndex> {
        self.timeline
            .binary_search(&time)
            .ok()
            .map(|index| index as TimePointIndex)
    }

    /// First timeline index at or after `time`, clamped to the timeline.
    fn index_at_or_after(&self, time: Timestamp) -> Option<TimePointIndex> {
        let last = self.timeline.len().checked_sub(1)?;
        let index = self.timeline.partition_point(|slot| *slot < time).min(last);
        Some(index as TimePointIndex)
    }

    /// Last timeline index at or before `time`, clamped to the timeline.
    fn index_at_or_before(&self, time: Timestamp) -> Option<TimePointIndex> {
        if self.timeline.is_empty() {
            return None;
        }
        let after = self.timeline.partition_point(|slot| *slot <= time);
        Some(after.saturating_sub(1) as TimePointIndex)
    }

    fn timeline_at(&self, index: TimePointIndex) -> Option<Timestamp> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.timeline.get(index).copied())
    }

    fn visible_range(&self) -> Option<StrictRange> {
        self.time_scale.visible_index_range()
    }

    fn series_snapshot(
        &self,
        id: SeriesId,
        series: &SeriesState,
        visible: Option<StrictRange>,
    ) -> ScenarioResult<SeriesSnapshot> {
        let color = series.options.effective_color(series.kind);
        let precision = series.options.price_format.precision;

        let mut visible_values = Vec::new();
        if series.options.visible
            && let Some(range) = visible
        {
            for item in &series.items {
                let Some(value) = item_value(item) else {
                    continue;
                };
                if self
                    .index_of(item.time())
                    .is_some_and(|index| range.contains(index))
                {
                    visible_values.push(CapturedValue {
                        time: item.time(),
                        value,
                    });
                }
            }
        }

        let last_value = series.items.iter().rev().find_map(|item| {
            item_value(item).map(|value| CapturedValue {
                time: item.time(),
                value,
            })
        });
        let last_value_label = match last_value {
            Some(last) if series.options.last_value_visible => {
                Some(format_price(last.value, precision)?)
            }
            _ => None,
        };
        let price_line = match last_value {
            Some(last) if series.options.price_line_visible => Some(PriceLineSnapshot {
                id: None,
                price: last.value,
                color: series.options.price_line_color.unwrap_or(color),
                line_width: series.options.price_line_width,
                line_style: series.options.price_line_style,
                line_visible: true,
                title: String::new(),
                axis_label: None,
            }),
            _ => None,
        };

        let mut price_lines = Vec::with_capacity(series.price_lines.len());
        for (line_id, line) in &series.price_lines {
            price_lines.push(PriceLineSnapshot {
                id: Some(*line_id),
                price: line.price,
                color: line.color.unwrap_or(color),
                line_width: line.line_width,
                line_style: line.line_style,
                line_visible: line.line_visible,
                title: line.title.clone(),
                axis_label: if line.axis_label_visible {
                    Some(format_price(line.price, precision)?)
                } else {
                    None
                },
            });
        }

        let whitespace_count = series.items.iter().filter(|item| !item.has_value()).count();
        let color_overrides = series
            .items
            .iter()
            .filter(|item| matches!(item, SeriesItem::SingleValue(point) if point.color.is_some()))
            .count();

        Ok(SeriesSnapshot {
            id,
            kind: series.kind,
            price_scale_id: series.options.price_scale_id.clone(),
            visible: series.options.visible,
            color,
            line_width: series.options.line_width,
            line_style: series.options.line_style,
            item_count: series.items.len(),
            whitespace_count,
            visible_value_count: visible_values.len(),
            first_visible: visible_values.first().copied(),
            last_visible: visible_values.last().copied(),
            last_value,
            last_value_label,
            color_overrides,
            price_line,
            price_lines,
        })
    }

    fn price_scale_range(
        &self,
        scale_id: &PriceScaleId,
        visible: Option<StrictRange>,
    ) -> Option<PriceRange> {
        let mut range: Option<PriceRange> = None;
        for series in self
            .series
            .values()
            .filter(|series| series.options.visible && &series.options.price_scale_id == scale_id)
        {
            let contribution = if let Some(fixed) = series.options.autoscale_price_range {
                Some(fixed)
            } else {
                visible.and_then(|visible| {
                    series
                        .items
                        .iter()
                        .filter(|item| {
                            self.index_of(item.time())
                                .is_some_and(|index| visible.contains(index))
                        })
                        .filter_map(item_extent)
                        .reduce(PriceRange::merge)
                })
            };
            if let Some(contribution) = contribution {
                range = Some(range.map_or(contribution, |current| current.merge(contribution)));
            }
        }
        range
    }
}

fn item_value(item: &SeriesItem) -> Option<f64> {
    match item {
        SeriesItem::SingleValue(point) => point.value,
        SeriesItem::Ohlc(bar) => Some(bar.close),
    }
}

fn item_extent(item: &SeriesItem) -> Option<PriceRange> {
    match item {
        SeriesItem::SingleValue(point) => point.value.map(PriceRange::point),
        SeriesItem::Ohlc(bar) => Some(PriceRange::new(bar.low, bar.high)),
    }
}

impl ChartBackend for HeadlessChart {
    fn resize(&mut self, viewport: Viewport) -> ScenarioResult<()> {
        self.viewport = viewport;
        self.time_scale.set_width(f64::from(viewport.width))
    }

    fn add_series(&mut self, kind: SeriesKind, options: SeriesOptions) -> ScenarioResult<SeriesId> {
        let id = SeriesId::new(self.next_series_id);
        self.next_series_id += 1;
        self.price_scales
            .entry(options.price_scale_id.clone())
            .or_insert_with(PriceScaleOptions::hidden);
        self.series.insert(
            id,
            SeriesState {
                kind,
                options,
                items: Vec::new(),
                price_lines: SmallVec::new(),
            },
        );
        Ok(id)
    }

    fn set_data(&mut self, series: SeriesId, data: SeriesData) -> ScenarioResult<()> {
        let state = self.series_mut(series)?;
        if data.shape() != state.kind.data_shape() {
            return Err(ScenarioError::InvalidData(format!(
                "series {series} does not accept {:?} data",
                data.shape()
            )));
        }
        state.items = data.into_items();
        let base_index = self.rebuild_timeline();
        self.time_scale.set_base_index(base_index);
        trace!(series = %series, timeline = self.timeline.len(), ?base_index, "timeline rebuilt");
        Ok(())
    }

    fn update(&mut self, series: SeriesId, item: SeriesItem) -> ScenarioResult<()> {
        let appends_slot = self.timeline.last().is_none_or(|last| item.time() > *last);
        let previous_base = self.time_scale.base_index_or_null();

        let state = self.series_mut(series)?;
        match state.last_time() {
            Some(last) if item.time() == last => {
                if let Some(slot) = state.items.last_mut() {
                    *slot = item;
                }
            }
            Some(last) if item.time() < last => {
                return Err(ScenarioError::UnorderedData {
                    index: state.items.len(),
                    previous: last.unix_seconds(),
                    current: item.time().unix_seconds(),
                });
            }
            _ => state.items.push(item),
        }

        let base_index = self.rebuild_timeline();
        if let (Some(previous), Some(next)) = (previous_base, base_index) {
            let delta = next - previous;
            let options = self.options.time_scale;
            let shifts = options.shift_visible_range_on_new_bar
                && (appends_slot || options.allow_shift_visible_range_on_whitespace_replacement);
            if delta > 0 && !shifts {
                self.time_scale.compensate_base_index_shift(delta);
                debug!(series = %series, delta, "visible range held on base index change");
            }
        }
        self.time_scale.set_base_index(base_index);
        Ok(())
    }

    fn create_price_line(
        &mut self,
        series: SeriesId,
        options: PriceLineOptions,
    ) -> ScenarioResult<PriceLineId> {
        let id = PriceLineId::new(self.next_price_line_id);
        self.series_mut(series)?.price_lines.push((id, options));
        self.next_price_line_id += 1;
        Ok(id)
    }

    fn fit_content(&mut self) -> ScenarioResult<()> {
        self.time_scale.fit_content()
    }

    fn set_visible_range(&mut self, range: TimeRange) -> ScenarioResult<()> {
        let (Some(left), Some(right)) = (
            self.index_at_or_after(range.from),
            self.index_at_or_before(range.to),
        ) else {
            return Ok(());
        };
        let strict = StrictRange::new(left.min(right), right.max(left));
        self.time_scale.set_visible_range(strict, false)
    }

    fn snapshot(&mut self) -> ScenarioResult<ChartSnapshot> {
        let visible = self.visible_range();
        let visible_time_range = visible.and_then(|range| {
            Some(TimeRange {
                from: self.timeline_at(range.left())?,
                to: self.timeline_at(range.right())?,
            })
        });

        let mut series = Vec::with_capacity(self.series.len());
        for (id, state) in &self.series {
            series.push(self.series_snapshot(*id, state, visible)?);
        }

        let price_scales = self
            .price_scales
            .iter()
            .map(|(id, options)| PriceScaleSnapshot {
                id: id.clone(),
                mode: options.mode,
                visible: options.visible,
                auto_scale: options.auto_scale,
                range: self.price_scale_range(id, visible),
            })
            .collect();

        Ok(ChartSnapshot {
            viewport: self.viewport,
            attribution_logo: self.options.layout.attribution_logo,
            time_scale: TimeScaleSnapshot {
                bar_spacing: self.time_scale.bar_spacing(),
                right_offset: self.time_scale.right_offset(),
                timeline_len: self.timeline.len(),
                base_index: self.time_scale.base_index_or_null(),
                logical_range: self.time_scale.visible_logical_range(),
                visible_time_range,
            },
            price_scales,
            series,
        })
    }
}
