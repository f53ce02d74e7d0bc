//! Gallery assets: texture manifest and image decoding.
//!
//! Textures are addressed by [`TextureSlot`]; only the manifest knows file
//! names. Loading is fail-fast: a missing or corrupt image aborts startup
//! instead of leaving an uninitialised texture behind.

use gallery_common::config::PICTURE_COUNT;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};

/// A named texture the gallery draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextureSlot {
    Floor,
    Ceiling,
    Wall,
    LightFixture,
    Frame,
    Centerpiece,
    /// Framed picture, numbered from 1.
    Picture(u8),
}

impl TextureSlot {
    pub fn file_name(&self) -> String {
        match self {
            TextureSlot::Floor => "floor.jpg".into(),
            TextureSlot::Ceiling => "ceiling.jpg".into(),
            TextureSlot::Wall => "wall.jpg".into(),
            TextureSlot::LightFixture => "light_fixture.jpg".into(),
            TextureSlot::Frame => "frame.jpg".into(),
            TextureSlot::Centerpiece => "centerpiece.jpg".into(),
            TextureSlot::Picture(n) => format!("pic{n}.jpg"),
        }
    }
}

/// Decoded RGBA8 image, rows ordered bottom-up.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// This image followed by successively halved copies down to 1x1.
    pub fn mip_chain(&self) -> Vec<ImageData> {
        let mut levels = vec![self.clone()];
        let Some(mut current) = RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
        else {
            tracing::warn!(
                width = self.width,
                height = self.height,
                "pixel buffer does not match size, skipping mipmaps"
            );
            return levels;
        };
        while current.width() > 1 || current.height() > 1 {
            let width = (current.width() / 2).max(1);
            let height = (current.height() / 2).max(1);
            current = imageops::resize(&current, width, height, FilterType::Triangle);
            levels.push(ImageData {
                width,
                height,
                rgba: current.as_raw().clone(),
            });
        }
        levels
    }
}

/// Levels in a full mip chain for a `width` x `height` texture.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("texture not found: {0}")]
    Missing(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decode an image file into RGBA8, flipped so the first row is the bottom
/// of the picture.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageData, AssetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.flipv().into_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!("decoded {} ({width}x{height})", path.display());
    Ok(ImageData {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// The set of textures to load, resolved against an asset directory.
#[derive(Debug, Clone)]
pub struct TextureManifest {
    root: PathBuf,
    slots: Vec<TextureSlot>,
}

impl TextureManifest {
    pub fn new(root: impl Into<PathBuf>, slots: Vec<TextureSlot>) -> Self {
        Self {
            root: root.into(),
            slots,
        }
    }

    /// Every texture the gallery uses: room surfaces, fixtures and pictures.
    pub fn gallery(root: impl Into<PathBuf>) -> Self {
        let mut slots = vec![
            TextureSlot::Floor,
            TextureSlot::Ceiling,
            TextureSlot::Wall,
            TextureSlot::LightFixture,
            TextureSlot::Frame,
            TextureSlot::Centerpiece,
        ];
        slots.extend((1..=PICTURE_COUNT).map(TextureSlot::Picture));
        Self::new(root, slots)
    }

    /// Only the textures the room surfaces are drawn with.
    pub fn room(root: impl Into<PathBuf>) -> Self {
        Self::new(
            root,
            vec![TextureSlot::Floor, TextureSlot::Ceiling, TextureSlot::Wall],
        )
    }

    pub fn path_of(&self, slot: TextureSlot) -> PathBuf {
        self.root.join(slot.file_name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureSlot, PathBuf)> + '_ {
        self.slots.iter().map(|s| (*s, self.path_of(*s)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Paths in the manifest that do not exist on disk.
    pub fn missing(&self) -> Vec<PathBuf> {
        self.iter()
            .map(|(_, path)| path)
            .filter(|path| !path.exists())
            .collect()
    }

    /// Decode every texture, stopping at the first failure.
    pub fn load(&self) -> Result<LoadedTextures, AssetError> {
        let mut images = Vec::with_capacity(self.slots.len());
        for (slot, path) in self.iter() {
            images.push((slot, load_image(&path)?));
        }
        tracing::info!(
            "loaded {} textures from {}",
            images.len(),
            self.root.display()
        );
        Ok(LoadedTextures { images })
    }
}

/// Decoded textures keyed by slot, in manifest order.
#[derive(Debug, Clone, Default)]
pub struct LoadedTextures {
    images: Vec<(TextureSlot, ImageData)>,
}

impl LoadedTextures {
    pub fn get(&self, slot: TextureSlot) -> Option<&ImageData> {
        self.images
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, image)| image)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

pub fn crate_info() -> &'static str {
    "gallery-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 2x2 PNG with a red top row and a blue bottom row.
    fn write_two_tone(path: &Path) {
        let img = RgbaImage::from_fn(2, 2, |_, y| if y == 0 { RED } else { BLUE });
        // PNG bytes even behind a .jpg name; decoding sniffs the content.
        img.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    #[test]
    fn slot_file_names() {
        assert_eq!(TextureSlot::Floor.file_name(), "floor.jpg");
        assert_eq!(TextureSlot::LightFixture.file_name(), "light_fixture.jpg");
        assert_eq!(TextureSlot::Picture(7).file_name(), "pic7.jpg");
    }

    #[test]
    fn gallery_manifest_lists_everything() {
        let manifest = TextureManifest::gallery("assets");
        assert_eq!(manifest.len(), 26);
        let paths: Vec<_> = manifest.iter().map(|(_, p)| p).collect();
        assert_eq!(paths[0], Path::new("assets").join("floor.jpg"));
        assert_eq!(paths[25], Path::new("assets").join("pic20.jpg"));
    }

    #[test]
    fn room_manifest_is_subset_of_gallery() {
        let gallery: Vec<_> = TextureManifest::gallery("a").iter().collect();
        let room = TextureManifest::room("a");
        assert_eq!(room.len(), 3);
        for entry in room.iter() {
            assert!(gallery.contains(&entry));
        }
    }

    #[test]
    fn load_image_flips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two_tone.png");
        write_two_tone(&path);

        let image = load_image(&path).unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.rgba.len(), 16);
        assert_eq!(&image.rgba[0..4], &BLUE.0);
        assert_eq!(&image.rgba[8..12], &RED.0);
        assert_eq!(image.bytes_per_row(), 8);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(dir.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, AssetError::Missing(_)));
        assert!(err.to_string().contains("nope.jpg"));
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn manifest_load_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        write_two_tone(&dir.path().join("floor.jpg"));
        let manifest = TextureManifest::new(
            dir.path(),
            vec![TextureSlot::Floor, TextureSlot::Ceiling],
        );
        assert_eq!(manifest.missing(), vec![dir.path().join("ceiling.jpg")]);

        let err = manifest.load().unwrap_err();
        match err {
            AssetError::Missing(path) => assert!(path.ends_with("ceiling.jpg")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn manifest_load_succeeds_when_complete() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = TextureManifest::new(
            dir.path(),
            vec![TextureSlot::Wall, TextureSlot::Picture(1)],
        );
        for (_, path) in manifest.iter() {
            write_two_tone(&path);
        }
        assert!(manifest.missing().is_empty());

        let loaded = manifest.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.get(TextureSlot::Wall).is_some());
        assert!(loaded.get(TextureSlot::Picture(1)).is_some());
        assert!(loaded.get(TextureSlot::Floor).is_none());
    }

    #[test]
    fn mip_level_count_reaches_one_pixel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(8, 2), 4);
        assert_eq!(mip_level_count(1024, 512), 11);
        assert_eq!(mip_level_count(1000, 3), 10);
    }

    #[test]
    fn mip_chain_halves_non_square_image() {
        let base = ImageData {
            width: 8,
            height: 2,
            rgba: vec![200; 8 * 2 * 4],
        };
        let chain = base.mip_chain();
        let sizes: Vec<_> = chain.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        assert_eq!(chain.len() as u32, mip_level_count(8, 2));
        assert_eq!(chain[0], base);
        for level in &chain {
            assert_eq!(level.rgba.len(), (level.width * level.height * 4) as usize);
            // Uniform colour survives filtering.
            assert!(level.rgba.iter().all(|&c| c.abs_diff(200) <= 1));
        }
    }

    #[test]
    fn mip_chain_of_odd_size_rounds_down() {
        let base = ImageData {
            width: 5,
            height: 3,
            rgba: vec![0; 5 * 3 * 4],
        };
        let sizes: Vec<_> = base.mip_chain().iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, vec![(5, 3), (2, 1), (1, 1)]);
    }
}
