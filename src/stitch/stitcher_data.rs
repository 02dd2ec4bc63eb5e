//! Stitcher Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in stitcher_operations.rs

use super::events::EventSender;
use super::index_resolver::TextureTables;
use super::plan::TexturePlan;
use crate::renderer::{TextureAtlasData, TextureHandle};
use crate::StitcherConfig;
use std::cell::Cell;
use std::rc::Rc;

/// Shared flag marking a pass in flight
pub type SessionSlot = Rc<Cell<bool>>;

/// State that outlives a single pass
pub struct StitcherData {
    pub config: StitcherConfig,
    /// Atlas of the last completed pass
    pub atlas: TextureAtlasData,
    /// Tables of the last completed pass
    pub tables: TextureTables,
    /// Plan of the last completed pass
    pub plan: TexturePlan,
    pub handle: Option<TextureHandle>,
    /// Completed passes
    pub generation: u64,

    /// Current event subscription; events are dropped while it is `None`
    /// or its receivers are gone
    pub events: EventSender,
    pub session_slot: SessionSlot,
}

/// Exclusive state of one in-flight pass. Only one session exists per
/// stitcher at a time; dropping it frees the slot.
#[derive(Debug)]
pub struct StitchSession {
    pub generation: u64,
    pub count_loading: usize,
    pub count_loaded: usize,
    pub slot: SessionSlot,
}

/// Outcome of a completed pass
#[derive(Debug, Clone, PartialEq)]
pub struct StitchReport {
    pub generation: u64,
    pub count_loading: usize,
    pub count_loaded: usize,
    pub handle: TextureHandle,
    pub mip_levels: usize,
    pub utilization: f32,
}
