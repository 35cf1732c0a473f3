//! Image attachment intake for a haircut draft.
//!
//! Each accepted source is encoded on its own thread and appended to the
//! draft as soon as it is done, so the final order follows completion, not
//! submission.

use crate::errors::{AppError, AppResult};
use crate::models::MAX_IMAGES;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Raw image bytes plus the media type used in the data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageSource {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read an image file, guessing the media type from its extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let mime = mime_for(path)
            .ok_or_else(|| AppError::Image(format!("{} is not a supported image", path.display())))?;
        let bytes = fs::read(path)
            .map_err(|e| AppError::Image(format!("cannot read {}: {e}", path.display())))?;
        Ok(Self::new(mime, bytes))
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct DraftState {
    images: Vec<String>,
    in_flight: usize,
}

/// The `images` field of a record being edited. Cloning shares the draft.
#[derive(Debug, Clone, Default)]
pub struct ImageDraft {
    state: Arc<Mutex<DraftState>>,
}

impl ImageDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from images already on a record.
    pub fn with_images(images: Vec<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DraftState {
                images,
                in_flight: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DraftState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Free slots, counting conversions that are still running.
    pub fn remaining_capacity(&self) -> usize {
        let s = self.lock();
        MAX_IMAGES.saturating_sub(s.images.len() + s.in_flight)
    }

    pub fn images(&self) -> Vec<String> {
        self.lock().images.clone()
    }

    pub fn remove(&self, index: usize) -> Option<String> {
        let mut s = self.lock();
        (index < s.images.len()).then(|| s.images.remove(index))
    }

    /// Accept as many sources as there is room for and start converting them.
    /// The rest are reported as rejected in the returned handle.
    pub fn attach(&self, sources: Vec<ImageSource>) -> PendingImages {
        let offered = sources.len();
        let accepted: Vec<ImageSource> = {
            let mut s = self.lock();
            let room = MAX_IMAGES.saturating_sub(s.images.len() + s.in_flight);
            let take = room.min(offered);
            s.in_flight += take;
            sources.into_iter().take(take).collect()
        };

        let handles = accepted
            .into_iter()
            .map(|source| {
                let draft = self.clone();
                thread::spawn(move || {
                    let slot = InFlight::new(&draft);
                    slot.complete(source.to_data_url());
                })
            })
            .collect::<Vec<_>>();

        let pending = PendingImages {
            accepted: handles.len(),
            rejected: offered - handles.len(),
            handles,
        };
        debug!(
            accepted = pending.accepted,
            rejected = pending.rejected,
            "image intake started"
        );
        pending
    }

    /// Wait for running conversions and return the final image list.
    pub fn finish(self, pending: PendingImages) -> AppResult<Vec<String>> {
        pending.wait()?;
        Ok(self.images())
    }
}

/// A reserved slot in the draft. Completing it appends the image and frees
/// the reservation under one lock; dropping it unfinished only frees it.
struct InFlight<'a> {
    draft: &'a ImageDraft,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn new(draft: &'a ImageDraft) -> Self {
        Self { draft, done: false }
    }

    fn complete(mut self, url: String) {
        let mut s = self.draft.lock();
        s.images.push(url);
        s.in_flight = s.in_flight.saturating_sub(1);
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            let mut s = self.draft.lock();
            s.in_flight = s.in_flight.saturating_sub(1);
        }
    }
}

/// Conversions started by [`ImageDraft::attach`].
#[derive(Debug)]
pub struct PendingImages {
    accepted: usize,
    rejected: usize,
    handles: Vec<JoinHandle<()>>,
}

impl PendingImages {
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn wait(self) -> AppResult<()> {
        for h in self.handles {
            h.join()
                .map_err(|_| AppError::Image("image conversion thread panicked".into()))?;
        }
        Ok(())
    }
}
