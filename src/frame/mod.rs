//! Frame production and frame-aligned continuation scheduling.

mod container;
mod sequencer;

pub use container::Container;
pub use sequencer::{FrameInfo, FrameSequencer, NextFrame};
