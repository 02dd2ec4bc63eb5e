//! Texture sinks
//!
//! A sink receives the finished mip pyramid once per stitch pass and hands
//! back an opaque handle that identifies the uploaded texture.

use crate::error::{StitchError, StitchResult};
use image::RgbaImage;

/// Opaque handle of an uploaded atlas texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Receiver of finished atlas pyramids
pub trait TextureSink {
    fn upload(&mut self, pyramid: &[RgbaImage]) -> StitchResult<TextureHandle>;
}

impl<T: TextureSink + ?Sized> TextureSink for &mut T {
    fn upload(&mut self, pyramid: &[RgbaImage]) -> StitchResult<TextureHandle> {
        (**self).upload(pyramid)
    }
}

/// Keeps every uploaded pyramid in memory. Handles are upload indices.
#[derive(Debug, Default)]
pub struct MemoryTextureSink {
    pub uploads: Vec<Vec<RgbaImage>>,
}

impl MemoryTextureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pyramid of the most recent upload
    pub fn latest(&self) -> Option<&[RgbaImage]> {
        self.uploads.last().map(Vec::as_slice)
    }
}

impl TextureSink for MemoryTextureSink {
    fn upload(&mut self, pyramid: &[RgbaImage]) -> StitchResult<TextureHandle> {
        if pyramid.is_empty() {
            return Err(StitchError::TextureUpload("empty mip pyramid".to_string()));
        }
        self.uploads.push(pyramid.to_vec());
        Ok(TextureHandle(self.uploads.len() as u64 - 1))
    }
}

#[cfg(feature = "gpu")]
pub use gpu::WgpuTextureSink;

#[cfg(feature = "gpu")]
mod gpu {
    use super::{TextureHandle, TextureSink};
    use crate::error::{StitchError, StitchResult};
    use image::RgbaImage;
    use std::sync::Arc;
    use wgpu::{Device, Queue, Sampler, Texture, TextureView};

    /// Uploads the pyramid as one mipmapped wgpu texture. Each upload
    /// replaces the previous texture.
    pub struct WgpuTextureSink {
        device: Arc<Device>,
        queue: Arc<Queue>,
        texture: Option<(Texture, TextureView)>,
        sampler: Sampler,
        generation: u64,
    }

    impl WgpuTextureSink {
        pub fn new(device: Arc<Device>, queue: Arc<Queue>) -> Self {
            let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Stitched Atlas Sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            });

            Self {
                device,
                queue,
                texture: None,
                sampler,
                generation: 0,
            }
        }

        /// Get texture view for binding
        pub fn texture_view(&self) -> Option<&TextureView> {
            self.texture.as_ref().map(|(_, view)| view)
        }

        /// Get sampler for binding
        pub fn sampler(&self) -> &Sampler {
            &self.sampler
        }
    }

    impl TextureSink for WgpuTextureSink {
        fn upload(&mut self, pyramid: &[RgbaImage]) -> StitchResult<TextureHandle> {
            let base = pyramid
                .first()
                .ok_or_else(|| StitchError::TextureUpload("empty mip pyramid".to_string()))?;

            let max_dimension = self.device.limits().max_texture_dimension_2d;
            if base.width() > max_dimension || base.height() > max_dimension {
                return Err(StitchError::TextureUpload(format!(
                    "atlas {}x{} exceeds GPU limit {}",
                    base.width(),
                    base.height(),
                    max_dimension
                )));
            }

            let texture = self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Stitched Atlas"),
                size: wgpu::Extent3d {
                    width: base.width(),
                    height: base.height(),
                    depth_or_array_layers: 1,
                },
                mip_level_count: pyramid.len() as u32,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            for (level, image) in pyramid.iter().enumerate() {
                self.queue.write_texture(
                    wgpu::ImageCopyTexture {
                        texture: &texture,
                        mip_level: level as u32,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    image.as_raw(),
                    wgpu::ImageDataLayout {
                        offset: 0,
                        bytes_per_row: Some(4 * image.width()),
                        rows_per_image: Some(image.height()),
                    },
                    wgpu::Extent3d {
                        width: image.width(),
                        height: image.height(),
                        depth_or_array_layers: 1,
                    },
                );
            }

            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            self.texture = Some((texture, view));
            self.generation += 1;

            log::info!(
                "[WgpuTextureSink::upload] Uploaded {}x{} atlas with {} mip levels",
                base.width(),
                base.height(),
                pyramid.len()
            );
            Ok(TextureHandle(self.generation))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_hands_out_sequential_handles() {
        let mut sink = MemoryTextureSink::new();
        let pyramid = vec![RgbaImage::new(4, 4), RgbaImage::new(2, 2)];
        assert_eq!(sink.upload(&pyramid).unwrap(), TextureHandle(0));
        assert_eq!(sink.upload(&pyramid).unwrap(), TextureHandle(1));
        assert_eq!(sink.latest().map(<[RgbaImage]>::len), Some(2));
    }

    #[test]
    fn test_memory_sink_rejects_empty_pyramid() {
        let mut sink = MemoryTextureSink::new();
        assert!(matches!(
            sink.upload(&[]),
            Err(StitchError::TextureUpload(_))
        ));
    }
}
