//! Texture planning
//!
//! Turns the registry's per-block descriptors into the work list of one
//! stitch pass: every distinct texture name once, in first-seen order, plus
//! the block faces waiting on each name.

use crate::error::{StitchError, StitchResult};
use crate::world::core::{expand, BlockFace, BlockId, EntityTextureSpec};
use rustc_hash::FxHashMap;

/// Texture name -> every (block, face) that shows it, in discovery order
pub type SideMap = FxHashMap<String, Vec<(BlockId, BlockFace)>>;

/// Work list of one stitch pass
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TexturePlan {
    /// Unique texture names, first-seen order
    pub names: Vec<String>,
    pub side_map: SideMap,
}

/// Plan a pass over `specs`, indexed by block id. Index 0 is AIR and is never
/// textured. `capacity` is capped at the number of 16-bit block ids.
pub fn plan_textures(specs: &[EntityTextureSpec], capacity: usize) -> StitchResult<TexturePlan> {
    let capacity = capacity.min(u16::MAX as usize + 1);
    if specs.len() > capacity {
        return Err(StitchError::EntityOverflow {
            id: specs.len() - 1,
            capacity,
        });
    }

    let mut plan = TexturePlan::default();

    for (index, spec) in specs.iter().enumerate() {
        let block = BlockId(u16::try_from(index).map_err(|_| StitchError::EntityOverflow {
            id: index,
            capacity,
        })?);
        if block.is_air() {
            continue;
        }
        let faces = expand(spec, block)?;

        for (face, name) in BlockFace::ALL.into_iter().zip(faces) {
            let Some(name) = name else { continue };
            let sides = plan.side_map.entry(name.clone()).or_insert_with(|| {
                plan.names.push(name);
                Vec::new()
            });
            sides.push((block, face));
        }
    }

    log::debug!(
        "[plan::plan_textures] {} unique textures across {} blocks",
        plan.names.len(),
        specs.len().saturating_sub(1)
    );
    Ok(plan)
}
