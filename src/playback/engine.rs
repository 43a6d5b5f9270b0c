use std::time::Duration;

use crate::{
    config::model::AnimationConfig,
    foundation::core::{FrameIndex, SheetIndex},
    foundation::error::{FlipbookError, FlipbookResult},
    geometry::grid::SheetGeometry,
    playback::signal::{Signal, SignalResponse, SignalSink},
    sheets::manager::{SheetFetcher, SheetNotice, SheetResourceManager},
    surface::controller::{Surface, SurfaceController},
};

/// Platform interval timer driving the periodic tick.
///
/// An implementation arranges for [`SpriteAnimation::tick`] to be called
/// repeatedly at the given interval until stopped. There is only ever one
/// outstanding schedule per animation: `start` on a running timer restarts it
/// rather than stacking, and `stop` is idempotent.
pub trait TickTimer {
    /// Begin (or restart) ticking at the given interval.
    fn start(&mut self, interval: Duration);

    /// Cancel the outstanding schedule, if any.
    fn stop(&mut self);
}

/// The flip-book playback engine for one animation instance.
///
/// Drives a two-state machine (Stopped and Running; there is no pause — a
/// host wanting to pause tracks the frame itself and replays). Each timer
/// tick advances one frame through a fixed, synchronous pipeline of
/// lifecycle signals, commits the frame to the double-buffered surfaces, and
/// pre-stages the next sheet. Sheet-load completions arrive through the
/// resource manager's channel and are drained at the start of every tick (or
/// explicitly via [`Self::process_load_events`]).
pub struct SpriteAnimation<S: Surface> {
    config: AnimationConfig,
    geometry: SheetGeometry,
    surfaces: SurfaceController<S>,
    sheets: SheetResourceManager,
    fetcher: Box<dyn SheetFetcher>,
    timer: Box<dyn TickTimer>,
    sink: Box<dyn SignalSink>,
    frames_per_second: f64,
    current_frame: Option<FrameIndex>,
    running: bool,
    play_on_first_sheet: bool,
}

impl<S: Surface> SpriteAnimation<S> {
    /// Construct an engine instance from a validated config.
    ///
    /// `surfaces` must hold exactly [`SheetGeometry::surface_count`] host
    /// surfaces. With `autoload` set, sheet 0 (and sheet 1, when present) is
    /// requested immediately and frame 0 is shown without waiting for
    /// playback. With `autoplay` set, [`Self::play`] is deferred until sheet
    /// 0's load notice arrives, so playback never starts against an unpainted
    /// surface.
    pub fn new(
        config: AnimationConfig,
        surfaces: Vec<S>,
        fetcher: Box<dyn SheetFetcher>,
        timer: Box<dyn TickTimer>,
        sink: Box<dyn SignalSink>,
    ) -> FlipbookResult<Self> {
        config.validate()?;
        let geometry = SheetGeometry::of(&config);
        let surfaces = SurfaceController::new(&config, surfaces)?;
        let mut engine = Self {
            play_on_first_sheet: config.autoplay,
            frames_per_second: config.frames_per_second,
            config,
            geometry,
            surfaces,
            sheets: SheetResourceManager::new(),
            fetcher,
            timer,
            sink,
            current_frame: None,
            running: false,
        };
        if engine.config.autoload {
            engine.show_frame(FrameIndex(0))?;
        }
        Ok(engine)
    }

    /// The engine's immutable configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// The engine's frame/sheet geometry.
    pub fn geometry(&self) -> SheetGeometry {
        self.geometry
    }

    /// Last committed frame, or `None` before playback or autoload touched
    /// one.
    pub fn current_frame(&self) -> Option<FrameIndex> {
        self.current_frame
    }

    /// Whether the scheduler is in the Running state.
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[tracing::instrument(skip(self))]
    /// Start playback.
    ///
    /// Emits the cancelable [`Signal::Play`]; a cancel verdict leaves the
    /// engine Stopped. When already Running the timer is restarted at the
    /// current rate.
    pub fn play(&mut self) {
        if self.emit(Signal::Play) == SignalResponse::Cancel {
            return;
        }
        self.running = true;
        self.timer.start(self.tick_interval());
    }

    /// Stop playback and discard the outstanding timer schedule. Idempotent.
    pub fn stop(&mut self) {
        self.timer.stop();
        self.running = false;
    }

    /// Change the playback rate.
    ///
    /// When Running, the timer restarts immediately at the new interval; the
    /// already-committed frame is not skipped.
    pub fn set_frame_rate(&mut self, fps: f64) -> FlipbookResult<()> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(FlipbookError::config("frames per second must be > 0"));
        }
        self.frames_per_second = fps;
        if self.running {
            self.timer.start(self.tick_interval());
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    /// Advance one frame.
    ///
    /// Called by the [`TickTimer`] at the configured interval. Signal order
    /// within a tick is fixed: pre-show, pre-show-last (if applicable),
    /// commit, shown, shown-last (if applicable). A cancel verdict on either
    /// pre-show signal stops playback without advancing; on either shown
    /// signal it stops playback with the frame committed. All work is
    /// synchronous, so ticks never overlap.
    pub fn tick(&mut self) {
        self.process_load_events();
        if !self.running {
            return;
        }

        let next = self.geometry.next_frame(self.current_frame);
        if self.emit(Signal::FrameShow(next)) == SignalResponse::Cancel {
            self.stop();
            return;
        }
        let last = self.geometry.is_last_frame(next);
        if last && self.emit(Signal::LastFrameShow) == SignalResponse::Cancel {
            self.stop();
            return;
        }

        self.current_frame = Some(next);
        self.render_current();

        if self.emit(Signal::FrameShown(next)) == SignalResponse::Cancel {
            self.stop();
            return;
        }
        if last && self.emit(Signal::LastFrameShown) == SignalResponse::Cancel {
            self.stop();
        }
    }

    /// Show a specific frame immediately, outside the tick cycle.
    ///
    /// Requests the frame's sheet (and the staged successor) when still
    /// unloaded; the paint is deferred to the load notification in that case.
    pub fn show_frame(&mut self, frame: FrameIndex) -> FlipbookResult<()> {
        if frame.0 >= self.config.frame_count {
            return Err(FlipbookError::usage(format!(
                "frame {} out of range 0..{}",
                frame.0, self.config.frame_count
            )));
        }
        self.current_frame = Some(frame);
        self.render_current();
        Ok(())
    }

    /// Request sheets on behalf of the host.
    ///
    /// Already-loaded sheets produce an immediate synthetic
    /// [`Signal::SheetLoaded`]; in-flight ones produce one more notice when
    /// the fetch completes. The underlying fetch is never re-issued.
    pub fn request_sheets(&mut self, sheets: &[SheetIndex]) {
        let config = &self.config;
        let notices = self
            .sheets
            .request(sheets, |s| config.sheet_url(s), self.fetcher.as_mut());
        self.dispatch_notices(notices);
    }

    /// Drain pending sheet-load completions and react to them.
    ///
    /// Hosts whose fetcher completes outside the tick cadence may call this
    /// directly; [`Self::tick`] also drains first.
    pub fn process_load_events(&mut self) {
        let notices = self.sheets.drain();
        self.dispatch_notices(notices);
    }

    fn dispatch_notices(&mut self, notices: Vec<SheetNotice>) {
        for notice in notices {
            match notice {
                SheetNotice::Loaded(sheet) => {
                    tracing::debug!(sheet = sheet.0, "sheet loaded");
                    self.emit(Signal::SheetLoaded(sheet));
                    if let Some(frame) = self.current_frame
                        && self.geometry.sheet_index_of(frame) == sheet
                    {
                        self.paint_current();
                    }
                    if sheet.0 == 0 && self.play_on_first_sheet {
                        self.play_on_first_sheet = false;
                        self.play();
                    }
                }
                SheetNotice::Failed(sheet) => {
                    self.emit(Signal::SheetLoadFailed(sheet));
                }
            }
        }
    }

    /// Ensure the current frame's sheets are requested, then repaint.
    fn render_current(&mut self) {
        let Some(frame) = self.current_frame else {
            return;
        };
        let needed = self.surfaces.sheets_for(frame);
        let config = &self.config;
        self.sheets
            .ensure(&needed, |s| config.sheet_url(s), self.fetcher.as_mut());
        self.paint_current();
    }

    /// Repaint without issuing load requests (safe from load dispatch).
    fn paint_current(&mut self) {
        let Some(frame) = self.current_frame else {
            return;
        };
        let sheets = &self.sheets;
        self.surfaces.show_frame(frame, |s| sheets.is_loaded(s));
        self.surfaces.prepare_next_sheet(frame);
    }

    fn emit(&mut self, signal: Signal) -> SignalResponse {
        self.sink.signal(&signal)
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.frames_per_second).round() as u64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/engine.rs"]
mod tests;
