//! Stitch pass events
//!
//! Observers receive these over a flume channel in the order they happen.

use crate::renderer::{AtlasNode, TextureHandle};
use image::RgbaImage;

#[derive(Debug, Clone)]
pub enum StitchEvent {
    /// One tile was packed
    Added { name: String, node: AtlasNode },
    /// Every tile of the pass is packed
    AddedAll { count: usize },
    /// Index and size tables were replaced
    UpdatedSides,
    /// The mip pyramid was handed to the texture sink
    UpdateTexture { handle: TextureHandle, levels: usize },
    /// A mip level, emitted only with `debug` enabled
    DebugMipLevel { level: usize, image: RgbaImage },
}

/// Sender half of the current subscription, if any
pub type EventSender = Option<flume::Sender<StitchEvent>>;

/// Open a fresh subscription. The returned receiver may be cloned to fan out
/// to several observers.
pub fn create_event_channel() -> (flume::Sender<StitchEvent>, flume::Receiver<StitchEvent>) {
    flume::unbounded()
}

/// True while some receiver of the subscription is alive
pub fn has_observers(sender: &EventSender) -> bool {
    sender.as_ref().map_or(false, |tx| !tx.is_disconnected())
}

/// Send an event. Observers are optional: without a live receiver the event
/// is dropped instead of queued.
pub fn emit(sender: &EventSender, event: StitchEvent) {
    let Some(tx) = sender else { return };
    if tx.send(event).is_err() {
        log::trace!("[events::emit] No event receivers left");
    }
}
