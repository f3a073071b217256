//! tilecraft_animation - Tile animation sequences for tilecraft
//!
//! Tiled tilesets attach a cyclic list of `(tile id, duration)` frames to a
//! tile. This crate holds that data plus the per-instance playback state and
//! the scheduler that advances it. The scheduler has no clock of its own;
//! callers feed it elapsed milliseconds each tick.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tilecraft_animation::{Animation, AnimationState, Frame};
//!
//! let waterfall = Animation::new(vec![
//!     Frame::new(120, 240),
//!     Frame::new(121, 240),
//!     Frame::new(122, 240),
//! ])?;
//!
//! let mut state = AnimationState::new();
//! let visible_tile = waterfall.advance(&mut state, delta_ms);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for invalid animation definitions
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    #[error("animation has no frames")]
    Empty,
    #[error("animation frames sum to zero duration")]
    ZeroDuration,
}

/// A single animation frame: which tile to show and for how long
///
/// The referenced tile id is not restricted to the defining tile's own row
/// in the atlas; sequences freely borrow frames from anywhere in the tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Tile to display while this frame is active
    pub tile_id: u32,
    /// How long the frame stays visible, in milliseconds
    pub duration_ms: u32,
}

impl Frame {
    pub const fn new(tile_id: u32, duration_ms: u32) -> Self {
        Self {
            tile_id,
            duration_ms,
        }
    }
}

/// An ordered, cyclic frame sequence
///
/// Sequences always loop; there is no one-shot mode in tileset animations.
/// Construction enforces the two invariants the scheduler relies on: at
/// least one frame, and a positive total duration (individual frames may
/// still be zero-length and are skipped over when reached).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Frame>", into = "Vec<Frame>")]
pub struct Animation {
    frames: Vec<Frame>,
}

impl Animation {
    /// Build a sequence, rejecting malformed frame lists
    pub fn new(frames: Vec<Frame>) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::Empty);
        }
        if frames.iter().all(|f| f.duration_ms == 0) {
            return Err(AnimationError::ZeroDuration);
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Total duration of one loop in milliseconds
    pub fn total_duration_ms(&self) -> u32 {
        self.frames.iter().map(|f| f.duration_ms).sum()
    }

    /// Tile currently visible for `state`, without advancing
    pub fn current_tile(&self, state: &AnimationState) -> u32 {
        self.frames[state.frame_index % self.frames.len()].tile_id
    }

    /// Advance playback by `delta_ms` and return the tile visible for the
    /// tick that just started.
    ///
    /// Accumulates the delta, then consumes whole frame durations, wrapping
    /// to the first frame after the last. A zero delta never changes the
    /// state, so the call is safe to repeat within a tick.
    pub fn advance(&self, state: &mut AnimationState, delta_ms: u32) -> u32 {
        // A state carried over from a different sequence may point past the
        // end; fold it back before using it to index.
        if state.frame_index >= self.frames.len() {
            state.frame_index %= self.frames.len();
        }
        let visible = self.frames[state.frame_index].tile_id;

        // Consuming a frame always leaves elapsed_ms below the duration of
        // the frame landed on (zero-length frames are consumed immediately),
        // so a zero delta can never move a state produced by this loop.
        state.elapsed_ms = state.elapsed_ms.saturating_add(delta_ms);
        while state.elapsed_ms >= self.frames[state.frame_index].duration_ms {
            state.elapsed_ms -= self.frames[state.frame_index].duration_ms;
            state.frame_index = (state.frame_index + 1) % self.frames.len();
        }

        visible
    }
}

impl TryFrom<Vec<Frame>> for Animation {
    type Error = AnimationError;

    fn try_from(frames: Vec<Frame>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

impl From<Animation> for Vec<Frame> {
    fn from(animation: Animation) -> Self {
        animation.frames
    }
}

/// Playback position of one rendered tile instance
///
/// Owned by the renderer, one per visible animated tile; discard when the
/// instance leaves view and reset on level load. Not shared across threads
/// without external synchronization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    /// Index into the sequence's frame list
    pub frame_index: usize,
    /// Time spent in the current frame, in milliseconds
    pub elapsed_ms: u32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewind to the first frame
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
