//! Stitcher Operations - Pure DOP Functions
//!
//! A pass runs: plan -> fetch every unique texture -> pad and pack each tile
//! -> (all loaded) -> resolve index tables -> build mip pyramid -> upload.
//!
//! Fetches run concurrently on the caller's executor. Their results are
//! consumed in plan order, so the atlas layout depends only on the registry
//! contents, never on which fetch finishes first. All mutation happens on the
//! polling thread, one result at a time.
//!
//! A pass builds a fresh atlas and fresh tables and commits them only when
//! every step succeeded. A failed pass leaves the previous generation in
//! place.

use super::events::{create_event_channel, emit, has_observers, StitchEvent};
use super::image_source::ImageSource;
use super::index_resolver::{self, resolve_indices, TextureTables};
use super::plan::{plan_textures, TexturePlan};
use super::stitcher_data::{StitchReport, StitchSession, StitcherData};
use crate::error::{StitchError, StitchResult};
use crate::renderer::mip_pyramid::build_pyramid;
use crate::renderer::texture_atlas_data::TextureAtlasData;
use crate::renderer::texture_atlas_operations::{create_texture_atlas, pack, utilization};
use crate::renderer::{EdgeRepeat, PaddingTransform, TextureSink};
use crate::world::core::{BlockFace, BlockId, TextureRegistry, TEXTURE_PROPERTY};
use crate::StitcherConfig;
use futures::stream::{self, StreamExt};
use std::cell::Cell;
use std::rc::Rc;

/// Create new stitcher data
pub fn create_stitcher(config: StitcherConfig) -> StitchResult<StitcherData> {
    config.validate()?;

    Ok(StitcherData {
        atlas: create_texture_atlas(config.atlas_size, config.tile_pad),
        tables: TextureTables::default(),
        plan: TexturePlan::default(),
        handle: None,
        generation: 0,
        events: None,
        session_slot: Rc::new(Cell::new(false)),
        config,
    })
}

/// Claim the stitcher for one pass.
///
/// Fails with `SessionActive` while another session is alive.
pub fn begin_session(data: &StitcherData) -> StitchResult<StitchSession> {
    if data.session_slot.replace(true) {
        return Err(StitchError::SessionActive);
    }
    Ok(StitchSession {
        generation: data.generation + 1,
        count_loading: 0,
        count_loaded: 0,
        slot: Rc::clone(&data.session_slot),
    })
}

impl Drop for StitchSession {
    fn drop(&mut self) {
        self.slot.set(false);
    }
}

/// True once every queued texture has been packed
pub fn is_complete(session: &StitchSession) -> bool {
    session.count_loaded == session.count_loading
}

/// Subscribe to this stitcher's events.
///
/// Replaces any earlier subscription. Until someone subscribes, and once
/// every receiver is dropped, events are discarded rather than queued.
pub fn events(data: &mut StitcherData) -> flume::Receiver<StitchEvent> {
    let (sender, receiver) = create_event_channel();
    data.events = Some(sender);
    receiver
}

/// Texture index of one block face from the last completed pass
pub fn texture_index(data: &StitcherData, block: BlockId, face: BlockFace) -> Option<u32> {
    index_resolver::texture_index(&data.tables, block, face)
}

/// Run a full stitch pass with edge-repeat padding
pub async fn stitch<R, S, K>(
    data: &mut StitcherData,
    registry: &R,
    source: &S,
    sink: &mut K,
) -> StitchResult<StitchReport>
where
    R: TextureRegistry + ?Sized,
    S: ImageSource + ?Sized,
    K: TextureSink + ?Sized,
{
    stitch_with_padding(data, registry, source, sink, &EdgeRepeat).await
}

/// Rebuild the atlas after the registry or image set changed. Passes always
/// rebuild from scratch, so this is a full stitch.
pub async fn refresh<R, S, K>(
    data: &mut StitcherData,
    registry: &R,
    source: &S,
    sink: &mut K,
) -> StitchResult<StitchReport>
where
    R: TextureRegistry + ?Sized,
    S: ImageSource + ?Sized,
    K: TextureSink + ?Sized,
{
    log::info!(
        "[stitcher_operations::refresh] Re-stitching over generation {}",
        data.generation
    );
    stitch(data, registry, source, sink).await
}

/// Run a stitch pass to completion on the current thread
pub fn stitch_blocking<R, S, K>(
    data: &mut StitcherData,
    registry: &R,
    source: &S,
    sink: &mut K,
) -> StitchResult<StitchReport>
where
    R: TextureRegistry + ?Sized,
    S: ImageSource + ?Sized,
    K: TextureSink + ?Sized,
{
    pollster::block_on(stitch(data, registry, source, sink))
}

/// Run a full stitch pass with a custom padding transform.
///
/// `UpdatedSides` is emitted together with `UpdateTexture`, after the upload
/// succeeded and the new tables were committed. Emitting it earlier would
/// announce tables that a failed upload then discards.
pub async fn stitch_with_padding<R, S, K, P>(
    data: &mut StitcherData,
    registry: &R,
    source: &S,
    sink: &mut K,
    padder: &P,
) -> StitchResult<StitchReport>
where
    R: TextureRegistry + ?Sized,
    S: ImageSource + ?Sized,
    K: TextureSink + ?Sized,
    P: PaddingTransform + ?Sized,
{
    let mut session = begin_session(data)?;
    log::info!(
        "[stitcher_operations::stitch] Starting pass {}",
        session.generation
    );

    let specs = registry.block_props_all(TEXTURE_PROPERTY);
    let plan = plan_textures(&specs, data.config.count_voxel_id)?;
    session.count_loading = plan.names.len();

    let atlas = load_and_pack(data, &mut session, &plan, registry, source, padder).await?;
    emit(
        &data.events,
        StitchEvent::AddedAll {
            count: session.count_loaded,
        },
    );

    let tables = resolve_indices(&plan, &atlas, &data.config, specs.len())?;

    let pyramid = build_pyramid(&atlas.atlas_image, data.config.min_mip_size);
    if data.config.debug && has_observers(&data.events) {
        for (level, image) in pyramid.iter().enumerate() {
            emit(
                &data.events,
                StitchEvent::DebugMipLevel {
                    level,
                    image: image.clone(),
                },
            );
        }
    }
    let handle = sink.upload(&pyramid)?;

    let report = StitchReport {
        generation: session.generation,
        count_loading: session.count_loading,
        count_loaded: session.count_loaded,
        handle,
        mip_levels: pyramid.len(),
        utilization: utilization(&atlas),
    };

    data.atlas = atlas;
    data.tables = tables;
    data.plan = plan;
    data.handle = Some(handle);
    data.generation = session.generation;
    emit(&data.events, StitchEvent::UpdatedSides);
    emit(
        &data.events,
        StitchEvent::UpdateTexture {
            handle,
            levels: report.mip_levels,
        },
    );

    log::info!(
        "[stitcher_operations::stitch] Pass {} complete: {} textures, {} mip levels, {:.1}% of atlas used",
        report.generation,
        report.count_loaded,
        report.mip_levels,
        report.utilization
    );
    Ok(report)
}

/// Fetch every planned texture and pack it into a fresh atlas.
///
/// Every issued fetch is drained. The first packing failure stops further
/// packing and wins over fetch failures, which are logged alongside it.
/// Otherwise fetch failures are reported together once all fetches finished.
async fn load_and_pack<R, S, P>(
    data: &StitcherData,
    session: &mut StitchSession,
    plan: &TexturePlan,
    registry: &R,
    source: &S,
    padder: &P,
) -> StitchResult<TextureAtlasData>
where
    R: TextureRegistry + ?Sized,
    S: ImageSource + ?Sized,
    P: PaddingTransform + ?Sized,
{
    let config = &data.config;
    let mut atlas = create_texture_atlas(config.atlas_size, config.tile_pad);
    let mut failed = Vec::new();
    let mut pack_error: Option<StitchError> = None;

    let mut fetches = stream::iter(plan.names.iter())
        .map(|name| async move { (name, source.fetch_image(name).await) })
        .buffered(plan.names.len().max(1));

    while let Some((name, fetched)) = fetches.next().await {
        let image = match fetched {
            Ok(image) => image,
            Err(e) => {
                log::error!(
                    "[stitcher_operations::load_and_pack] Failed to fetch '{}' (used by {}): {:#}",
                    name,
                    describe_users(plan, registry, name),
                    e
                );
                failed.push(name.clone());
                continue;
            }
        };

        // Issued fetches still run to completion after a packing failure
        if pack_error.is_some() {
            continue;
        }

        let tile = image.to_rgba8();
        let padded = padder.repeat_border(&tile, config.tile_pad, config.tile_pad);
        let node = match pack(&mut atlas, name, &padded) {
            Ok(node) => node,
            Err(e) => {
                log::error!(
                    "[stitcher_operations::load_and_pack] Aborting pass {}: {}",
                    session.generation,
                    e
                );
                pack_error = Some(e);
                continue;
            }
        };
        session.count_loaded += 1;

        if config.verbose {
            log::debug!(
                "[stitcher_operations::load_and_pack] Packed '{}' ({}x{}) at ({}, {}) [{}/{}]",
                name,
                tile.width(),
                tile.height(),
                node.x,
                node.y,
                session.count_loaded,
                session.count_loading
            );
        }
        emit(
            &data.events,
            StitchEvent::Added {
                name: name.clone(),
                node,
            },
        );
    }

    if let Some(e) = pack_error {
        if !failed.is_empty() {
            log::error!(
                "[stitcher_operations::load_and_pack] Pass {} also failed to fetch: {}",
                session.generation,
                failed.join(", ")
            );
        }
        return Err(e);
    }
    if !failed.is_empty() {
        return Err(StitchError::FetchFailed { names: failed });
    }
    debug_assert!(is_complete(session));
    Ok(atlas)
}

/// Block names waiting on a texture, for diagnostics
fn describe_users<R: TextureRegistry + ?Sized>(plan: &TexturePlan, registry: &R, name: &str) -> String {
    let mut blocks: Vec<BlockId> = plan
        .side_map
        .get(name)
        .map(|sides| sides.iter().map(|(block, _)| *block).collect())
        .unwrap_or_default();
    blocks.dedup();

    blocks
        .iter()
        .map(|b| registry.block_name(*b).unwrap_or_else(|| b.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}
