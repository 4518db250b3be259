//! Ghost sprite loading
//!
//! Ghost looks come from named PNG resources. Any failure is logged and
//! replaced by a solid placeholder colour for that ghost index, so the game
//! always starts with a full set of sprites.

use std::collections::HashMap;

use image::imageops::FilterType;

use crate::consts::GHOST_SIZE;

/// Image resources, one per ghost identity
pub const GHOST_IMAGES: [&str; 4] = ["ghl.png", "kajabi.png", "sk.png", "sys.png"];

/// Placeholder colours by ghost index
pub const PLACEHOLDER_COLORS: [[u8; 3]; 4] = [
    [255, 0, 0],
    [255, 184, 255],
    [0, 255, 255],
    [255, 184, 82],
];

/// Per-channel multiplier applied to edible ghosts
pub const EDIBLE_TINT: [u8; 4] = [80, 80, 255, 200];

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed image {name}: {reason}")]
    Malformed { name: String, reason: String },
}

/// Where raw asset bytes come from
pub trait AssetSource {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError>;
}

/// Assets read from a directory on disk
#[cfg(not(target_arch = "wasm32"))]
pub struct DirSource {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetSource for DirSource {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
            _ => AssetError::Io {
                name: path.display().to_string(),
                source: e,
            },
        })
    }
}

/// No assets at all (every ghost gets its placeholder)
pub struct NoAssets;

impl AssetSource for NoAssets {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        Err(AssetError::NotFound(name.to_string()))
    }
}

/// Assets already in memory (fetched over HTTP on the web)
#[derive(Debug, Clone, Default)]
pub struct BytesSource {
    files: HashMap<String, Vec<u8>>,
}

impl BytesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(name.into(), bytes);
    }
}

impl AssetSource for BytesSource {
    fn load(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

/// RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Sprite {
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![[rgb[0], rgb[1], rgb[2], 255]; width as usize * height as usize],
        }
    }

    /// Wrap a tightly packed RGBA buffer; `None` unless it holds exactly
    /// `width * height` pixels
    pub fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Option<Self> {
        let count = (width as usize).checked_mul(height as usize)?;
        if count == 0 || raw.len() != count.checked_mul(4)? {
            return None;
        }
        let pixels = raw
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Multiply every channel by `tint / 255`
    pub fn tinted(&self, tint: [u8; 4]) -> Self {
        let pixels = self
            .pixels
            .iter()
            .map(|p| {
                let mut out = [0u8; 4];
                for c in 0..4 {
                    out[c] = ((p[c] as u16 * tint[c] as u16) / 255) as u8;
                }
                out
            })
            .collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Decode an image and scale it (nearest neighbour) to `size` x `size`
pub fn decode_sprite(name: &str, bytes: &[u8], size: u32) -> Result<Sprite, AssetError> {
    let image = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
        name: name.to_string(),
        source,
    })?;
    let rgba = image.resize_exact(size, size, FilterType::Nearest).to_rgba8();
    let (width, height) = rgba.dimensions();
    Sprite::from_raw(width, height, rgba.into_raw()).ok_or_else(|| AssetError::Malformed {
        name: name.to_string(),
        reason: format!("pixel buffer does not match {}x{}", width, height),
    })
}

/// Base and edible sprites for every ghost identity
#[derive(Debug, Clone)]
pub struct GhostSprites {
    base: Vec<Sprite>,
    edible: Vec<Sprite>,
}

impl GhostSprites {
    /// Load every ghost image, substituting placeholders on failure
    pub fn load(source: &dyn AssetSource) -> Self {
        let base: Vec<Sprite> = GHOST_IMAGES
            .iter()
            .enumerate()
            .map(|(index, name)| Self::load_or_placeholder(source, index, name))
            .collect();
        Self::from_base(base)
    }

    fn load_or_placeholder(source: &dyn AssetSource, index: usize, name: &str) -> Sprite {
        let size = GHOST_SIZE as u32;
        match source
            .load(name)
            .and_then(|bytes| decode_sprite(name, &bytes, size))
        {
            Ok(sprite) => {
                log::info!("Loaded ghost image {}", name);
                sprite
            }
            Err(e) => {
                log::warn!("Error loading image {}: {}, using placeholder", name, e);
                Sprite::solid(size, size, PLACEHOLDER_COLORS[index % PLACEHOLDER_COLORS.len()])
            }
        }
    }

    pub fn from_base(base: Vec<Sprite>) -> Self {
        let edible = base.iter().map(|s| s.tinted(EDIBLE_TINT)).collect();
        Self { base, edible }
    }

    /// Number of identities (one ghost is spawned per identity)
    pub fn identity_count(&self) -> usize {
        self.base.len()
    }

    pub fn get(&self, identity: usize, edible: bool) -> Option<&Sprite> {
        if edible {
            self.edible.get(identity)
        } else {
            self.base.get(identity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_scales_to_size() {
        let sprite = decode_sprite("t", &png(8, 4, [10, 20, 30, 255]), 24).unwrap();
        assert_eq!((sprite.width, sprite.height), (24, 24));
        assert_eq!(sprite.pixels.len(), 24 * 24);
        assert_eq!(sprite.pixel(23, 23), [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_keeps_transparency() {
        let sprite = decode_sprite("t", &png(2, 2, [1, 2, 3, 0]), 24).unwrap();
        assert_eq!(sprite.pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_sprite("t", b"not an image", 24),
            Err(AssetError::Decode { .. })
        ));
        let mut truncated = png(4, 4, [1, 2, 3, 255]);
        truncated.truncate(truncated.len() / 2);
        assert!(decode_sprite("t", &truncated, 24).is_err());
    }

    #[test]
    fn test_from_raw_checks_dimensions() {
        assert!(Sprite::from_raw(2, 1, vec![0; 8]).is_some());
        assert!(Sprite::from_raw(2, 1, vec![0; 7]).is_none());
        assert!(Sprite::from_raw(0, 5, Vec::new()).is_none());
        // Header-sized dimensions with no pixels behind them
        assert!(Sprite::from_raw(65536, 65536, vec![0; 12]).is_none());
        assert!(Sprite::from_raw(u32::MAX, u32::MAX, vec![0; 4]).is_none());
    }

    #[test]
    fn test_oversized_header_falls_back_to_placeholder() {
        let mut files = BytesSource::new();
        files.insert("ghl.png", b"P6\n65536 65536\n255\n".to_vec());
        let sprites = GhostSprites::load(&files);
        let sprite = sprites.get(0, false).unwrap();
        assert_eq!(sprite.width, GHOST_SIZE as u32);
        assert_eq!(sprite.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_tint_multiplies() {
        let sprite = Sprite::solid(1, 1, [255, 255, 255]);
        assert_eq!(sprite.tinted(EDIBLE_TINT).pixel(0, 0), EDIBLE_TINT);
        let red = Sprite::solid(1, 1, [255, 0, 0]);
        assert_eq!(red.tinted(EDIBLE_TINT).pixel(0, 0), [80, 0, 0, 200]);
    }

    #[test]
    fn test_missing_assets_fall_back_to_placeholders() {
        let sprites = GhostSprites::load(&NoAssets);
        assert_eq!(sprites.identity_count(), GHOST_IMAGES.len());
        for (i, color) in PLACEHOLDER_COLORS.iter().enumerate() {
            let sprite = sprites.get(i, false).unwrap();
            assert_eq!(sprite.width, GHOST_SIZE as u32);
            assert_eq!(sprite.pixel(0, 0), [color[0], color[1], color[2], 255]);
        }
    }

    #[test]
    fn test_mixed_sources() {
        let mut files = BytesSource::new();
        files.insert("kajabi.png", png(8, 8, [1, 2, 3, 255]));
        files.insert("sk.png", b"not an image".to_vec());
        let sprites = GhostSprites::load(&files);

        assert_eq!(sprites.identity_count(), 4);
        // Loaded and scaled up to ghost size
        let loaded = sprites.get(1, false).unwrap();
        assert_eq!(loaded.width, GHOST_SIZE as u32);
        assert_eq!(loaded.pixel(23, 23), [1, 2, 3, 255]);
        // Undecodable file falls back to its index colour
        assert_eq!(sprites.get(2, false).unwrap().pixel(0, 0), [0, 255, 255, 255]);
        // Edible variant derives from the base
        assert_eq!(sprites.get(0, true).unwrap().pixel(0, 0), [80, 0, 0, 200]);
        assert!(sprites.get(4, false).is_none());
    }

    #[test]
    fn test_error_source_chain() {
        let err = decode_sprite("sk.png", b"nope", 24).unwrap_err();
        assert!(err.to_string().starts_with("failed to decode sk.png"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_dir_source_missing_file() {
        let source = DirSource::new("definitely/not/here");
        assert!(matches!(source.load("ghl.png"), Err(AssetError::NotFound(_))));
    }
}
