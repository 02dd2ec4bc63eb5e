use super::texture_spec::EntityTextureSpec;
use super::BlockId;

/// Source of block texture descriptors.
///
/// Implemented by the host's block registry. `block_props_all` returns one
/// entry per block id, index 0 being AIR.
pub trait TextureRegistry {
    fn block_props_all(&self, property: &str) -> Vec<EntityTextureSpec>;

    /// Display name, used only in diagnostics
    fn block_name(&self, id: BlockId) -> Option<String>;
}

impl<T: TextureRegistry + ?Sized> TextureRegistry for &T {
    fn block_props_all(&self, property: &str) -> Vec<EntityTextureSpec> {
        (**self).block_props_all(property)
    }

    fn block_name(&self, id: BlockId) -> Option<String> {
        (**self).block_name(id)
    }
}

impl TextureRegistry for Vec<EntityTextureSpec> {
    fn block_props_all(&self, _property: &str) -> Vec<EntityTextureSpec> {
        self.clone()
    }

    fn block_name(&self, id: BlockId) -> Option<String> {
        (id.index() < self.len()).then(|| format!("block#{}", id.0))
    }
}
