use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use serde::{Deserialize, Serialize};

/// Identifies one produced frame. Frame indices start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameInfo {
    pub index: u64,
}

type FrameCallback = Box<dyn FnOnce(FrameInfo)>;

#[derive(Default)]
struct FrameLoopState {
    frames_rendered: u64,
    callbacks: VecDeque<FrameCallback>,
    wakers: Vec<Waker>,
}

/// Orders continuations against frame boundaries of one rendering target.
///
/// A continuation scheduled while frame `N` is the latest produced frame runs
/// after frame `N + 1` has rendered and before frame `N + 2` starts. Work
/// scheduled from inside a continuation always waits for the following
/// frame, so chained steps observe each other's rendered effect in order.
///
/// The sequencer never produces frames itself and has no timeout: if the
/// owning container stops rendering, pending continuations stay pending.
#[derive(Clone, Default)]
pub struct FrameSequencer {
    state: Rc<RefCell<FrameLoopState>>,
}

impl fmt::Debug for FrameSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FrameSequencer")
            .field("frames_rendered", &state.frames_rendered)
            .field("pending_callbacks", &state.callbacks.len())
            .field("pending_wakers", &state.wakers.len())
            .finish()
    }
}

impl FrameSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.state.borrow().frames_rendered
    }

    /// Resolves once a frame later than every frame produced so far has rendered.
    #[must_use]
    pub fn next_frame(&self) -> NextFrame {
        NextFrame {
            state: Rc::clone(&self.state),
            target: self.frames_rendered() + 1,
        }
    }

    /// Callback form of [`FrameSequencer::next_frame`].
    pub fn request_frame(&self, callback: impl FnOnce(FrameInfo) + 'static) {
        self.state
            .borrow_mut()
            .callbacks
            .push_back(Box::new(callback));
    }

    #[must_use]
    pub fn pending_callbacks(&self) -> usize {
        self.state.borrow().callbacks.len()
    }

    /// Marks a frame as rendered, then runs the callbacks queued before it
    /// in FIFO order and wakes waiting futures.
    pub(crate) fn complete_frame(&self) -> FrameInfo {
        let (info, callbacks, wakers) = {
            let mut state = self.state.borrow_mut();
            state.frames_rendered += 1;
            (
                FrameInfo {
                    index: state.frames_rendered,
                },
                std::mem::take(&mut state.callbacks),
                std::mem::take(&mut state.wakers),
            )
        };
        for callback in callbacks {
            callback(info);
        }
        for waker in wakers {
            waker.wake();
        }
        info
    }
}

/// Future returned by [`FrameSequencer::next_frame`].
#[must_use = "futures do nothing unless awaited"]
pub struct NextFrame {
    state: Rc<RefCell<FrameLoopState>>,
    target: u64,
}

impl fmt::Debug for NextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextFrame")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Future for NextFrame {
    type Output = FrameInfo;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if state.frames_rendered >= self.target {
            return Poll::Ready(FrameInfo {
                index: state.frames_rendered,
            });
        }
        if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
