use crate::foundation::core::{FrameIndex, SheetIndex};

/// Lifecycle notification emitted at defined points in playback and loading.
///
/// [`std::fmt::Display`] renders the host-facing event names: `play`,
/// `frame-{n}-show`, `frame-last-show`, `frame-{n}-shown`,
/// `frame-last-shown`, `sheet-{i}-loaded`, `sheet-{i}-load-failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Signal {
    /// Playback is about to start.
    Play,
    /// The frame is about to be shown; canceling skips the advance.
    FrameShow(FrameIndex),
    /// The last valid frame is about to be shown.
    LastFrameShow,
    /// The frame was committed and painted.
    FrameShown(FrameIndex),
    /// The last valid frame was committed and painted.
    LastFrameShown,
    /// A sheet finished loading.
    SheetLoaded(SheetIndex),
    /// A sheet fetch was rejected.
    SheetLoadFailed(SheetIndex),
}

impl Signal {
    /// Whether a [`SignalResponse::Cancel`] verdict stops playback.
    ///
    /// True for the play and frame signals. For the pre-show pair a cancel
    /// also skips the frame advance; for the shown pair the committed frame
    /// stands. The sheet signals are informational and any verdict on them is
    /// ignored.
    pub fn is_cancelable(self) -> bool {
        !matches!(self, Self::SheetLoaded(_) | Self::SheetLoadFailed(_))
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Play => write!(f, "play"),
            Self::FrameShow(frame) => write!(f, "frame-{}-show", frame.0),
            Self::LastFrameShow => write!(f, "frame-last-show"),
            Self::FrameShown(frame) => write!(f, "frame-{}-shown", frame.0),
            Self::LastFrameShown => write!(f, "frame-last-shown"),
            Self::SheetLoaded(sheet) => write!(f, "sheet-{}-loaded", sheet.0),
            Self::SheetLoadFailed(sheet) => write!(f, "sheet-{}-load-failed", sheet.0),
        }
    }
}

/// Verdict returned by a [`SignalSink`] for each signal.
///
/// Cancellation is explicit control flow consumed synchronously by the
/// scheduler; there is no shared mutable event state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignalResponse {
    /// Keep going.
    #[default]
    Continue,
    /// Abort the in-flight step and stop playback.
    Cancel,
}

/// Host consumer of lifecycle signals.
///
/// Implemented for free by any `FnMut(&Signal) -> SignalResponse` closure.
pub trait SignalSink {
    /// Observe one signal and return a verdict.
    fn signal(&mut self, signal: &Signal) -> SignalResponse;
}

impl<F> SignalSink for F
where
    F: FnMut(&Signal) -> SignalResponse,
{
    fn signal(&mut self, signal: &Signal) -> SignalResponse {
        self(signal)
    }
}

/// Sink that ignores every signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiscardSignals;

impl SignalSink for DiscardSignals {
    fn signal(&mut self, _signal: &Signal) -> SignalResponse {
        SignalResponse::Continue
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/signal.rs"]
mod tests;
