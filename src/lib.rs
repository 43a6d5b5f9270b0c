//! Flipbook is a sprite-sheet flip-book animation engine.
//!
//! An animation is one or more large sheet images, each a grid of frames.
//! The engine advances frames on a timer and swaps the visible sheet without
//! pop-in by double-buffering: the front surface shows the current sheet
//! while the back surface pre-decodes the sheet that takes over next.
//!
//! # Engine overview
//!
//! 1. **Geometry**: [`SheetGeometry`] maps a frame index to its sheet, crop
//!    rectangle, and the sheet's (possibly irregular last-sheet) pixel size.
//! 2. **Loading**: [`SheetResourceManager`] tracks per-sheet load state,
//!    deduplicates requests, and reports completions from the host's
//!    [`SheetFetcher`].
//! 3. **Presentation**: [`SurfaceController`] owns at most two host
//!    [`Surface`]s and keeps the front/staged invariant.
//! 4. **Playback**: [`SpriteAnimation`] ticks at the configured rate, runs
//!    the cancelable lifecycle-signal pipeline, and commits frames.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single logical thread**: ticks and load completions are the only
//!   suspension points; everything between them is synchronous.
//! - **No blocking**: fetches and ticks return immediately; waiting is
//!   always a future notification.
//! - **Explicit cancellation**: lifecycle signals return a
//!   [`SignalResponse`] verdict instead of mutating shared event state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod geometry;
mod host;
mod playback;
mod sheets;
mod surface;

pub use config::model::AnimationConfig;
pub use config::parse::{parse_flag, parse_pair};
pub use foundation::core::{DensityScale, FrameIndex, Grid, Point, Rect, SheetIndex, Size, Vec2};
pub use foundation::error::{FlipbookError, FlipbookResult};
pub use geometry::grid::SheetGeometry;
pub use host::registry::{AnimationRegistry, Command};
pub use playback::engine::{SpriteAnimation, TickTimer};
pub use playback::signal::{DiscardSignals, Signal, SignalResponse, SignalSink};
pub use sheets::manager::{SheetFetcher, SheetLoadSender, SheetNotice, SheetResourceManager};
pub use surface::controller::{SheetPaint, SlotPosition, Surface, SurfaceController};
