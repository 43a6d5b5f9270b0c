use std::collections::HashMap;

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::foundation::core::SheetIndex;

/// Asynchronous sheet-image loader implemented by the host.
///
/// `fetch` must return immediately; the eventual outcome is reported through
/// `done`, which resolves or rejects exactly once. The engine never inspects
/// image pixel data, only the completion.
pub trait SheetFetcher {
    /// Start fetching the sheet image at `url`.
    fn fetch(&mut self, sheet: SheetIndex, url: &str, done: SheetLoadSender);
}

/// One-shot completion handle for a single sheet fetch.
///
/// Consuming `resolve`/`reject` by value makes double delivery impossible.
#[derive(Debug)]
pub struct SheetLoadSender {
    sheet: SheetIndex,
    tx: Sender<SheetLoadUpdate>,
}

impl SheetLoadSender {
    /// Report the sheet image as decoded and ready.
    pub fn resolve(self) {
        let _ = self.tx.send(SheetLoadUpdate {
            sheet: self.sheet,
            result: Ok(()),
        });
    }

    /// Report the fetch as failed.
    pub fn reject(self, reason: impl Into<String>) {
        let _ = self.tx.send(SheetLoadUpdate {
            sheet: self.sheet,
            result: Err(reason.into()),
        });
    }
}

#[derive(Debug)]
struct SheetLoadUpdate {
    sheet: SheetIndex,
    result: Result<(), String>,
}

/// Completion notification owed to a requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetNotice {
    /// The sheet became loaded (or already was, for synthetic notices).
    Loaded(SheetIndex),
    /// The fetch was rejected; the sheet is requestable again.
    Failed(SheetIndex),
}

#[derive(Debug)]
enum LoadState {
    /// Fetch in flight; `pending` notices are owed on completion.
    Requested { pending: u32 },
    Loaded,
}

/// Tracks per-sheet load state and deduplicates concurrent load requests.
///
/// States move Unrequested -> Requested -> Loaded, never backward; the one
/// exception is a rejected fetch, which clears the entry so a later request
/// can retry. No automatic retry is performed here. The manager is the sole
/// writer of the table; everyone else reads through [`Self::is_loaded`].
#[derive(Debug)]
pub struct SheetResourceManager {
    states: HashMap<SheetIndex, LoadState>,
    tx: Sender<SheetLoadUpdate>,
    rx: Receiver<SheetLoadUpdate>,
}

impl Default for SheetResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetResourceManager {
    /// Create an empty manager with its completion channel.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            states: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Request the given sheets on behalf of a caller.
    ///
    /// Idempotent with respect to the underlying fetch: an index already
    /// Requested gets no second fetch but is owed one more completion notice;
    /// an index already Loaded yields an immediate synthetic notice in the
    /// returned list. Every call site request produces exactly one notice.
    pub fn request(
        &mut self,
        sheets: &[SheetIndex],
        url_for: impl Fn(SheetIndex) -> String,
        fetcher: &mut dyn SheetFetcher,
    ) -> Vec<SheetNotice> {
        let mut ready = Vec::new();
        for &sheet in sheets {
            match self.states.get_mut(&sheet) {
                None => self.start_fetch(sheet, &url_for, fetcher),
                Some(LoadState::Requested { pending }) => *pending += 1,
                Some(LoadState::Loaded) => ready.push(SheetNotice::Loaded(sheet)),
            }
        }
        ready
    }

    /// Start fetches for any of the given sheets that are still Unrequested.
    ///
    /// Unlike [`Self::request`] this owes no extra notices for sheets already
    /// in flight or loaded, so it is safe to call every tick.
    pub fn ensure(
        &mut self,
        sheets: &[SheetIndex],
        url_for: impl Fn(SheetIndex) -> String,
        fetcher: &mut dyn SheetFetcher,
    ) {
        for &sheet in sheets {
            if !self.states.contains_key(&sheet) {
                self.start_fetch(sheet, &url_for, fetcher);
            }
        }
    }

    fn start_fetch(
        &mut self,
        sheet: SheetIndex,
        url_for: &impl Fn(SheetIndex) -> String,
        fetcher: &mut dyn SheetFetcher,
    ) {
        let url = url_for(sheet);
        tracing::debug!(sheet = sheet.0, %url, "fetching sheet");
        self.states
            .insert(sheet, LoadState::Requested { pending: 1 });
        fetcher.fetch(
            sheet,
            &url,
            SheetLoadSender {
                sheet,
                tx: self.tx.clone(),
            },
        );
    }

    /// Drain fetch completions without blocking.
    ///
    /// Each completion expands into one notice per owed request, in
    /// completion order. Sheets may finish in any order relative to each
    /// other.
    pub fn drain(&mut self) -> Vec<SheetNotice> {
        let mut notices = Vec::new();
        while let Ok(update) = self.rx.try_recv() {
            let Some(LoadState::Requested { pending }) = self.states.get(&update.sheet) else {
                // Stale completion for a sheet no longer in flight.
                continue;
            };
            let owed = *pending;
            match update.result {
                Ok(()) => {
                    self.states.insert(update.sheet, LoadState::Loaded);
                    notices
                        .extend(std::iter::repeat_n(SheetNotice::Loaded(update.sheet), owed as usize));
                }
                Err(reason) => {
                    tracing::warn!(sheet = update.sheet.0, %reason, "sheet load failed");
                    self.states.remove(&update.sheet);
                    notices
                        .extend(std::iter::repeat_n(SheetNotice::Failed(update.sheet), owed as usize));
                }
            }
        }
        notices
    }

    /// Whether the sheet has finished loading.
    pub fn is_loaded(&self, sheet: SheetIndex) -> bool {
        matches!(self.states.get(&sheet), Some(LoadState::Loaded))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sheets/manager.rs"]
mod tests;
