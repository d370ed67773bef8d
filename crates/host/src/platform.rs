use crate::config::GameConfig;
use crate::error::HostError;
use hearth_common::{KeyCode, KeyState, Modifiers};
use hearth_render::Frame;
use std::collections::VecDeque;

/// An input or surface event delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    Key {
        key: KeyCode,
        state: KeyState,
        mods: Modifiers,
    },
    /// Cursor moved, in normalized screen coordinates ([-1, 1] per axis).
    CursorMoved { x: f64, y: f64 },
    /// The surface was resized to new pixel dimensions.
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// Dimensions reported when a surface is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: u32,
    pub height: u32,
}

/// The windowing and presentation seam.
///
/// A real backend owns an OS window and swapchain behind this trait; the
/// host only ever opens a surface, polls events, and presents frames.
pub trait Platform {
    /// Create the render surface. Called once, between the game-open and
    /// window-open hooks.
    fn open_surface(&mut self, config: &GameConfig) -> Result<SurfaceInfo, HostError>;

    /// Drain all events that arrived since the last poll.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// Present one finished frame.
    fn present(&mut self, frame: &Frame);
}

/// A windowless platform driven by scripted events.
///
/// Events are queued per frame in advance; each poll pops one frame's
/// batch. After `frame_budget` polls the platform reports a close request,
/// so a run loop against it always terminates.
pub struct HeadlessPlatform {
    width: u32,
    height: u32,
    queued: VecDeque<Vec<PlatformEvent>>,
    frame_budget: Option<u64>,
    polls: u64,
    presented: u64,
    last_frame_len: usize,
}

impl HeadlessPlatform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            queued: VecDeque::new(),
            frame_budget: None,
            polls: 0,
            presented: 0,
            last_frame_len: 0,
        }
    }

    /// Request a close after this many polled frames.
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.frame_budget = Some(frames);
        self
    }

    /// Queue a batch of events to be delivered on a subsequent poll, one
    /// batch per frame in queueing order.
    pub fn queue_frame(&mut self, events: Vec<PlatformEvent>) {
        self.queued.push_back(events);
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Draw-call count of the most recently presented frame.
    pub fn last_frame_len(&self) -> usize {
        self.last_frame_len
    }
}

impl Platform for HeadlessPlatform {
    fn open_surface(&mut self, config: &GameConfig) -> Result<SurfaceInfo, HostError> {
        tracing::info!(title = %config.title, width = self.width, height = self.height, "opened headless surface");
        Ok(SurfaceInfo {
            width: self.width,
            height: self.height,
        })
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.polls += 1;
        let mut events = self.queued.pop_front().unwrap_or_default();
        if let Some(budget) = self.frame_budget {
            if self.polls >= budget {
                events.push(PlatformEvent::CloseRequested);
            }
        }
        events
    }

    fn present(&mut self, frame: &Frame) {
        self.presented += 1;
        self.last_frame_len = frame.len();
    }
}
