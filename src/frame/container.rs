use std::cell::{Cell, RefCell};

use tracing::{debug, trace};

use crate::api::ChartHandle;
use crate::core::Viewport;
use crate::error::ScenarioResult;
use crate::render::FrameCapture;

use super::FrameSequencer;

/// Rendering target a scenario draws into.
///
/// Frames are produced only by [`Container::tick`] while the container is
/// attached and has a non-zero viewport. Each produced frame captures every
/// attached chart, then releases the continuations queued before it.
#[derive(Debug)]
pub struct Container {
    viewport: Cell<Viewport>,
    attached: Cell<bool>,
    charts: RefCell<Vec<ChartHandle>>,
    frames: FrameSequencer,
}

impl Container {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport: Cell::new(viewport),
            attached: Cell::new(true),
            charts: RefCell::new(Vec::new()),
            frames: FrameSequencer::new(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Frame sequencer bound to this container.
    #[must_use]
    pub fn frames(&self) -> FrameSequencer {
        self.frames.clone()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Stops frame production. Pending continuations are kept.
    pub fn detach(&self) {
        self.attached.set(false);
        debug!("container detached");
    }

    pub fn attach(&self) {
        self.attached.set(true);
    }

    #[must_use]
    pub fn can_render(&self) -> bool {
        self.is_attached() && self.viewport().is_valid()
    }

    /// Changes the viewport and forwards it to every attached chart.
    pub fn resize(&self, viewport: Viewport) -> ScenarioResult<()> {
        self.viewport.set(viewport);
        for chart in self.charts.borrow().iter() {
            chart.resize(viewport)?;
        }
        debug!(width = viewport.width, height = viewport.height, "container resized");
        Ok(())
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.charts.borrow().len()
    }

    pub(crate) fn attach_chart(&self, chart: ChartHandle) {
        self.charts.borrow_mut().push(chart);
    }

    /// Produces the next frame, or `None` when the container cannot render.
    pub fn tick(&self) -> ScenarioResult<Option<FrameCapture>> {
        if !self.can_render() {
            trace!(
                attached = self.is_attached(),
                width = self.viewport().width,
                height = self.viewport().height,
                "frame skipped"
            );
            return Ok(None);
        }

        // Snapshot before releasing continuations: they may add charts or
        // mutate the ones captured here.
        let charts: Vec<ChartHandle> = self.charts.borrow().clone();
        let mut snapshots = Vec::with_capacity(charts.len());
        for chart in &charts {
            snapshots.push(chart.snapshot()?);
        }
        let capture = FrameCapture {
            frame: self.frames.frames_rendered() + 1,
            viewport: self.viewport(),
            charts: snapshots,
        };

        let info = self.frames.complete_frame();
        trace!(frame = info.index, charts = capture.charts.len(), "frame produced");
        Ok(Some(capture))
    }
}
