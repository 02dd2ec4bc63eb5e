//! Image sources
//!
//! The stitcher asks a source for each unique texture name once per pass.
//! Fetches are futures so that slow sources (archives, network) overlap.

use anyhow::{anyhow, Context};
use futures::future::{FutureExt, LocalBoxFuture};
use image::DynamicImage;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

/// Asynchronous provider of tile images by texture name
pub trait ImageSource {
    fn fetch_image<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, anyhow::Result<DynamicImage>>;
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn fetch_image<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, anyhow::Result<DynamicImage>> {
        (**self).fetch_image(name)
    }
}

/// Serves images from memory
#[derive(Default)]
pub struct MemoryImageSource {
    images: FxHashMap<String, DynamicImage>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, image: impl Into<DynamicImage>) {
        self.images.insert(name.to_string(), image.into());
    }

    pub fn with(mut self, name: &str, image: impl Into<DynamicImage>) -> Self {
        self.insert(name, image);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn fetch_image<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, anyhow::Result<DynamicImage>> {
        async move {
            self.images
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow!("no image named '{}'", name))
        }
        .boxed_local()
    }
}

/// Loads `<root>/<name>.png`
pub struct DirectoryImageSource {
    root: PathBuf,
}

impl DirectoryImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.png", name))
    }
}

impl ImageSource for DirectoryImageSource {
    fn fetch_image<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, anyhow::Result<DynamicImage>> {
        let path = self.path_for(name);
        async move {
            image::open(&path).with_context(|| format!("loading texture '{}' from {}", name, path.display()))
        }
        .boxed_local()
    }
}
