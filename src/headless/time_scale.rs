use serde::{Deserialize, Serialize};

use crate::api::TimeScaleOptions;
use crate::error::{ScenarioError, ScenarioResult};

pub type TimePointIndex = i64;

const MIN_VISIBLE_BARS_COUNT: f64 = 2.0;

/// Visible range in fractional timeline indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalRange {
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictRange {
    left: TimePointIndex,
    right: TimePointIndex,
}

impl StrictRange {
    #[must_use]
    pub fn new(left: TimePointIndex, right: TimePointIndex) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn left(self) -> TimePointIndex {
        self.left
    }

    #[must_use]
    pub fn right(self) -> TimePointIndex {
        self.right
    }

    #[must_use]
    pub fn count(self) -> f64 {
        (self.right - self.left + 1) as f64
    }

    #[must_use]
    pub fn contains(self, index: TimePointIndex) -> bool {
        self.left <= index && index <= self.right
    }
}

/// Logical horizontal state: bar spacing, right offset and edge constraints
/// over a timeline of `points_len` slots whose last valued slot is the base
/// index.
#[derive(Debug, Clone)]
pub struct TimeScale {
    options: TimeScaleOptions,
    width: f64,
    points_len: usize,
    base_index_or_null: Option<TimePointIndex>,
    right_offset: f64,
    bar_spacing: f64,
    /// Range requested while the width was zero, applied on the next resize.
    pending_range: Option<(StrictRange, bool)>,
}

impl TimeScale {
    #[must_use]
    pub fn new(options: TimeScaleOptions, width: f64) -> Self {
        Self {
            options,
            width: width.max(0.0),
            points_len: 0,
            base_index_or_null: None,
            right_offset: options.right_offset,
            bar_spacing: options.bar_spacing,
            pending_range: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> TimeScaleOptions {
        self.options
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, new_width: f64) -> ScenarioResult<()> {
        if !new_width.is_finite() || new_width < 0.0 {
            return Err(ScenarioError::InvalidData(
                "time scale width must be finite and >= 0".to_owned(),
            ));
        }
        let old_width = self.width;
        if (old_width - new_width).abs() <= f64::EPSILON {
            return Ok(());
        }
        let pinned_left = self.options.fix_left_edge
            && self
                .visible_logical_range()
                .is_some_and(|range| range.from <= 0.0);
        self.width = new_width;

        if pinned_left && old_width > 0.0 {
            let delta = old_width - new_width;
            self.right_offset -= (delta / self.bar_spacing).round() + 1.0;
        }

        self.correct_bar_spacing();
        self.correct_offset();
        self.do_fix_left_edge();

        if self.width > 0.0
            && let Some((range, apply_default_offset)) = self.pending_range.take()
        {
            return self.set_visible_range(range, apply_default_offset);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.points_len == 0 || self.base_index_or_null.is_none()
    }

    #[must_use]
    pub fn points_len(&self) -> usize {
        self.points_len
    }

    pub fn set_points_len(&mut self, points_len: usize) {
        self.points_len = points_len;
        self.correct_offset();
    }

    pub fn set_base_index(&mut self, base_index: Option<TimePointIndex>) {
        self.base_index_or_null = base_index;
        self.correct_offset();
        self.do_fix_left_edge();
    }

    #[must_use]
    pub fn base_index_or_null(&self) -> Option<TimePointIndex> {
        self.base_index_or_null
    }

    #[must_use]
    pub fn base_index(&self) -> TimePointIndex {
        self.base_index_or_null.unwrap_or(0)
    }

    #[must_use]
    pub fn right_offset(&self) -> f64 {
        self.right_offset
    }

    /// Moves the right edge so the visible logical range stays in place while
    /// the base index advances by `delta` bars.
    pub fn compensate_base_index_shift(&mut self, delta: TimePointIndex) {
        self.right_offset -= delta as f64;
    }

    #[must_use]
    pub fn bar_spacing(&self) -> f64 {
        self.bar_spacing
    }

    pub fn set_bar_spacing(&mut self, new_bar_spacing: f64) -> ScenarioResult<()> {
        if !new_bar_spacing.is_finite() || new_bar_spacing <= 0.0 {
            return Err(ScenarioError::InvalidData(
                "time scale bar spacing must be finite and > 0".to_owned(),
            ));
        }
        self.bar_spacing = new_bar_spacing;
        self.correct_bar_spacing();
        self.correct_offset();
        Ok(())
    }

    /// Fits `strict_range` into the full width.
    ///
    /// With `apply_default_offset` the configured right offset is restored
    /// afterwards instead of anchoring the right edge at `strict_range.right()`.
    pub fn set_visible_range(
        &mut self,
        strict_range: StrictRange,
        apply_default_offset: bool,
    ) -> ScenarioResult<()> {
        let length = strict_range.count();
        if !length.is_finite() || length <= 0.0 {
            return Err(ScenarioError::InvalidData(
                "visible strict range must be non-empty".to_owned(),
            ));
        }
        if self.width <= 0.0 {
            self.pending_range = Some((strict_range, apply_default_offset));
            return Ok(());
        }
        self.pending_range = None;
        self.set_bar_spacing(self.width / length)?;
        self.right_offset = if apply_default_offset {
            self.options.right_offset
        } else {
            strict_range.right() as f64 - self.base_index() as f64
        };
        self.correct_offset();
        self.do_fix_left_edge();
        Ok(())
    }

    pub fn fit_content(&mut self) -> ScenarioResult<()> {
        let Some(last) = self.last_index() else {
            return Ok(());
        };
        if self.width <= 0.0 {
            return Ok(());
        }
        let right = last + self.options.right_offset.max(0.0) as TimePointIndex;
        self.set_visible_range(StrictRange::new(0, right), true)
    }

    #[must_use]
    pub fn visible_logical_range(&self) -> Option<LogicalRange> {
        if self.is_empty() {
            return None;
        }
        let bars_length = self.width / self.bar_spacing;
        let right_border = self.right_offset + self.base_index() as f64;
        let left_border = right_border - bars_length + 1.0;
        Some(LogicalRange {
            from: left_border,
            to: right_border,
        })
    }

    /// Timeline indices whose slot center lies inside the visible range.
    #[must_use]
    pub fn visible_index_range(&self) -> Option<StrictRange> {
        let range = self.visible_logical_range()?;
        let last = self.last_index()?;
        let left = (range.from.ceil() as TimePointIndex).max(0);
        let right = (range.to.floor() as TimePointIndex).min(last);
        (left <= right).then(|| StrictRange::new(left, right))
    }

    #[must_use]
    pub fn last_index(&self) -> Option<TimePointIndex> {
        if self.points_len == 0 {
            None
        } else {
            Some(self.points_len as TimePointIndex - 1)
        }
    }

    fn correct_bar_spacing(&mut self) {
        let min = self.min_bar_spacing();
        let max = self.max_bar_spacing();
        if max < min {
            return;
        }
        self.bar_spacing = self.bar_spacing.clamp(min, max);
    }

    fn min_bar_spacing(&self) -> f64 {
        if self.options.fix_left_edge && self.options.fix_right_edge && self.points_len > 0 {
            return self.width / self.points_len as f64;
        }
        self.options.min_bar_spacing
    }

    fn max_bar_spacing(&self) -> f64 {
        self.width * 0.5
    }

    fn min_right_offset(&self) -> Option<f64> {
        let base = self.base_index_or_null?;
        if self.points_len == 0 {
            return None;
        }
        let bars_estimation = if self.options.fix_left_edge {
            self.width / self.bar_spacing
        } else {
            MIN_VISIBLE_BARS_COUNT.min(self.points_len as f64)
        };
        Some(-(base as f64) - 1.0 + bars_estimation)
    }

    fn max_right_offset(&self) -> f64 {
        if self.options.fix_right_edge {
            0.0
        } else {
            self.width / self.bar_spacing - MIN_VISIBLE_BARS_COUNT.min(self.points_len as f64)
        }
    }

    fn correct_offset(&mut self) {
        if self.width <= 0.0 {
            return;
        }
        if let Some(min_right_offset) = self.min_right_offset()
            && self.right_offset < min_right_offset
        {
            self.right_offset = min_right_offset;
        }
        let max_right_offset = self.max_right_offset();
        if self.right_offset > max_right_offset {
            self.right_offset = max_right_offset;
        }
    }

    fn do_fix_left_edge(&mut self) {
        if !self.options.fix_left_edge {
            return;
        }
        let Some(range) = self.visible_logical_range() else {
            return;
        };
        let delta = range.from.floor();
        if delta < 0.0 {
            self.right_offset -= delta;
        }
        self.correct_bar_spacing();
    }
}

#[cfg(test)]
mod tests {
    use super::{StrictRange, TimeScale};
    use crate::api::TimeScaleOptions;

    fn scale_with_points(options: TimeScaleOptions, width: f64, len: usize) -> TimeScale {
        let mut time_scale = TimeScale::new(options, width);
        time_scale.set_points_len(len);
        time_scale.set_base_index(Some(len as i64 - 1));
        time_scale
    }

    #[test]
    fn default_range_ends_at_base_index_plus_right_offset() {
        let options = TimeScaleOptions {
            right_offset: 7.0,
            ..TimeScaleOptions::default()
        };
        let time_scale = scale_with_points(options, 600.0, 500);
        let range = time_scale.visible_logical_range().expect("range");
        assert!((range.to - 506.0).abs() <= 1e-9);
        assert!((range.from - 407.0).abs() <= 1e-9);
    }

    #[test]
    fn fixed_left_edge_pins_first_bar_to_the_left_border() {
        let options = TimeScaleOptions {
            fix_left_edge: true,
            ..TimeScaleOptions::default()
        };
        let time_scale = scale_with_points(options, 600.0, 20);
        let range = time_scale.visible_logical_range().expect("range");
        assert!(range.from.abs() <= 1e-9);
        assert_eq!(time_scale.visible_index_range(), Some(StrictRange::new(0, 19)));
    }

    #[test]
    fn zero_width_has_no_visible_range() {
        let time_scale = scale_with_points(TimeScaleOptions::default(), 0.0, 20);
        assert!(time_scale.is_empty());
        assert!(time_scale.visible_logical_range().is_none());
    }

    #[test]
    fn visible_range_requested_at_zero_width_applies_on_resize() {
        let mut time_scale = scale_with_points(TimeScaleOptions::default(), 0.0, 500);
        time_scale
            .set_visible_range(StrictRange::new(10, 19), false)
            .expect("deferred range");
        assert!(time_scale.visible_logical_range().is_none());

        time_scale.set_width(600.0).expect("resize");
        assert!((time_scale.bar_spacing() - 60.0).abs() <= 1e-9);
        assert_eq!(time_scale.visible_index_range(), Some(StrictRange::new(10, 19)));

        time_scale.set_width(300.0).expect("second resize");
        assert!((time_scale.bar_spacing() - 60.0).abs() <= 1e-9);
    }
}
