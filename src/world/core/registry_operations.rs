//! Block Registry Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects.
//! No methods, no self, just transformations.

use super::registry::TextureRegistry;
use super::registry_data::{BlockRegistration, BlockRegistryData, TEXTURE_PROPERTY};
use super::texture_spec::EntityTextureSpec;
use super::BlockId;
use crate::error::{StitchError, StitchResult};
use rustc_hash::FxHashMap;

/// Create new block registry data
pub fn create_block_registry() -> BlockRegistryData {
    BlockRegistryData {
        name_to_id: FxHashMap::default(),
        registrations: Vec::new(),
        next_id: 1, // 0 is reserved for AIR
    }
}

/// Register a new block type with its texture descriptor
pub fn register_block(
    data: &mut BlockRegistryData,
    name: &str,
    texture: EntityTextureSpec,
) -> StitchResult<BlockId> {
    if let Some(&id) = data.name_to_id.get(name) {
        log::warn!(
            "[registry_operations::register_block] '{}' already registered as {}, ignoring",
            name,
            id.0
        );
        return Ok(id);
    }

    if data.next_id == u16::MAX {
        return Err(StitchError::EntityOverflow {
            id: data.next_id as usize,
            capacity: u16::MAX as usize,
        });
    }

    let id = BlockId(data.next_id);
    data.next_id += 1;

    data.name_to_id.insert(name.to_string(), id);
    data.registrations.push(BlockRegistration {
        id,
        name: name.to_string(),
        texture,
    });

    log::debug!(
        "[registry_operations::register_block] Registered block '{}' with ID {}",
        name,
        id.0
    );
    Ok(id)
}

/// Build a registry from a JSON list of `{ "name": ..., "texture": ... }`
/// entries. Ids are assigned in list order starting at 1.
pub fn load_registry_json(json: &str) -> StitchResult<BlockRegistryData> {
    let entries: Vec<BlockRegistration> = serde_json::from_str(json)?;
    let mut data = create_block_registry();
    for entry in entries {
        register_block(&mut data, &entry.name, entry.texture)?;
    }
    Ok(data)
}

/// Get a block ID by name
pub fn get_id(data: &BlockRegistryData, name: &str) -> Option<BlockId> {
    data.name_to_id.get(name).copied()
}

/// Get all registered blocks
pub fn get_registrations(data: &BlockRegistryData) -> &[BlockRegistration] {
    &data.registrations
}

fn registration(data: &BlockRegistryData, id: BlockId) -> Option<&BlockRegistration> {
    // ids are dense and start at 1
    id.index()
        .checked_sub(1)
        .and_then(|i| data.registrations.get(i))
}

impl TextureRegistry for BlockRegistryData {
    fn block_props_all(&self, property: &str) -> Vec<EntityTextureSpec> {
        if property != TEXTURE_PROPERTY {
            log::warn!(
                "[registry_operations::block_props_all] Unknown property '{}'",
                property
            );
            return vec![EntityTextureSpec::Absent; self.next_id as usize];
        }

        let mut props = Vec::with_capacity(self.next_id as usize);
        props.push(EntityTextureSpec::Absent); // AIR
        props.extend(self.registrations.iter().map(|r| r.texture.clone()));
        props
    }

    fn block_name(&self, id: BlockId) -> Option<String> {
        registration(self, id).map(|r| r.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_after_air() {
        let mut data = create_block_registry();
        let dirt = register_block(&mut data, "dirt", "dirt".into()).unwrap();
        let stone = register_block(&mut data, "stone", "stone".into()).unwrap();
        assert_eq!(dirt, BlockId(1));
        assert_eq!(stone, BlockId(2));
        assert_eq!(get_id(&data, "stone"), Some(stone));
        assert_eq!(data.block_name(stone).as_deref(), Some("stone"));
        assert_eq!(data.block_name(BlockId::AIR), None);
    }

    #[test]
    fn test_duplicate_registration_keeps_first_id() {
        let mut data = create_block_registry();
        let first = register_block(&mut data, "dirt", "dirt".into()).unwrap();
        let second = register_block(&mut data, "dirt", "other".into()).unwrap();
        assert_eq!(first, second);
        assert_eq!(get_registrations(&data).len(), 1);
    }

    #[test]
    fn test_props_are_indexed_by_block_id() {
        let mut data = create_block_registry();
        register_block(&mut data, "dirt", "dirt".into()).unwrap();
        register_block(&mut data, "stone", "stone".into()).unwrap();

        let props = data.block_props_all(TEXTURE_PROPERTY);
        assert_eq!(
            props,
            vec![
                EntityTextureSpec::Absent,
                EntityTextureSpec::from("dirt"),
                EntityTextureSpec::from("stone"),
            ]
        );
    }

    #[test]
    fn test_load_registry_json() {
        let data = load_registry_json(
            r#"[
                {"name": "dirt", "texture": "dirt"},
                {"name": "grass", "texture": ["grass_top", "dirt", "grass_side"]},
                {"name": "glass"}
            ]"#,
        )
        .unwrap();
        assert_eq!(get_id(&data, "grass"), Some(BlockId(2)));
        let props = data.block_props_all(TEXTURE_PROPERTY);
        assert_eq!(props.len(), 4);
        assert_eq!(props[3], EntityTextureSpec::Absent);
    }
}
