//! Image decoding off the UI thread and a small per-deck image cache

use std::collections::{HashMap, HashSet};
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use tokio::sync::mpsc;
use tracing::debug;

/// Result of an async image load operation
pub enum ImageLoadResult {
    Success { item_id: String, image: DynamicImage },
    Failure { item_id: String, error: String },
}

impl ImageLoadResult {
    pub fn item_id(&self) -> &str {
        match self {
            ImageLoadResult::Success { item_id, .. } | ImageLoadResult::Failure { item_id, .. } => {
                item_id
            }
        }
    }
}

/// An image that should be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub item_id: String,
    pub source: String,
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Decode an image from a local path
pub fn decode(source: &str) -> Result<DynamicImage, String> {
    if is_remote(source) {
        return Err(format!("remote media is not supported: {}", source));
    }
    let path = Path::new(source);
    if !path.exists() {
        return Err(format!("file not found: {}", source));
    }
    image::open(path).map_err(|e| e.to_string())
}

/// Decode on the blocking pool and send the result back to the UI loop
pub fn spawn_image_load(request: LoadRequest, tx: mpsc::UnboundedSender<ImageLoadResult>) {
    tokio::task::spawn_blocking(move || {
        let LoadRequest { item_id, source } = request;
        let result = match decode(&source) {
            Ok(image) => ImageLoadResult::Success { item_id, image },
            Err(error) => ImageLoadResult::Failure { item_id, error },
        };
        // Receiver gone means the viewer already shut down
        let _ = tx.send(result);
    });
}

/// Decoded images keyed by item id, plus the last scaled frame
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, DynamicImage>,
    failed: HashMap<String, String>,
    loading: HashSet<String>,
    scaled: Option<ScaledFrame>,
}

struct ScaledFrame {
    item_id: String,
    columns: u16,
    rows: u16,
    pixels: RgbaImage,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self, item_id: &str) -> bool {
        self.images.contains_key(item_id)
    }

    pub fn is_loading(&self, item_id: &str) -> bool {
        self.loading.contains(item_id)
    }

    pub fn failure(&self, item_id: &str) -> Option<&str> {
        self.failed.get(item_id).map(String::as_str)
    }

    /// Mark a request as in flight; returns false if it is already known
    pub fn start_loading(&mut self, item_id: &str) -> bool {
        if self.is_ready(item_id) || self.failed.contains_key(item_id) {
            return false;
        }
        self.loading.insert(item_id.to_string())
    }

    pub fn finish(&mut self, result: ImageLoadResult) {
        match result {
            ImageLoadResult::Success { item_id, image } => {
                debug!(item = %item_id, "Image decoded");
                self.loading.remove(&item_id);
                self.images.insert(item_id, image);
            }
            ImageLoadResult::Failure { item_id, error } => {
                self.loading.remove(&item_id);
                self.failed.insert(item_id, error);
            }
        }
    }

    /// Drop decoded images not in `keep`
    pub fn retain(&mut self, keep: &[&str]) {
        self.images.retain(|id, _| keep.contains(&id.as_str()));
        if let Some(frame) = &self.scaled {
            if !keep.contains(&frame.item_id.as_str()) {
                self.scaled = None;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image scaled to fit `columns` x `rows` halfblock cells
    ///
    /// The last result is reused while the item and area stay the same.
    pub fn fit(&mut self, item_id: &str, columns: u16, rows: u16) -> Option<&RgbaImage> {
        let cached = self
            .scaled
            .as_ref()
            .is_some_and(|f| f.item_id == item_id && f.columns == columns && f.rows == rows);
        if !cached {
            let image = self.images.get(item_id)?;
            let pixels = scale_to_cells(image, columns, rows);
            self.scaled = Some(ScaledFrame {
                item_id: item_id.to_string(),
                columns,
                rows,
                pixels,
            });
        }
        self.scaled.as_ref().map(|f| &f.pixels)
    }
}

/// Aspect-preserving resize where each cell holds two vertical pixels
pub fn scale_to_cells(image: &DynamicImage, columns: u16, rows: u16) -> RgbaImage {
    let target_width = u32::from(columns).max(1);
    let target_height = (u32::from(rows) * 2).max(1);

    let (img_width, img_height) = image.dimensions();
    let scale_w = target_width as f32 / img_width.max(1) as f32;
    let scale_h = target_height as f32 / img_height.max(1) as f32;
    let scale = scale_w.min(scale_h);

    let new_width = ((img_width as f32 * scale) as u32).clamp(1, target_width);
    let new_height = ((img_height as f32 * scale) as u32).clamp(1, target_height);

    image
        .resize_exact(new_width, new_height, FilterType::Triangle)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
    }

    #[test]
    fn test_decode_local_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        solid(4, 4).save(&path).unwrap();

        let image = decode(path.to_str().unwrap()).unwrap();
        assert_eq!(image.dimensions(), (4, 4));
    }

    #[test]
    fn test_decode_missing_and_remote() {
        assert!(decode("/definitely/not/here.png").unwrap_err().contains("not found"));
        assert!(decode("https://cdn.example.com/a.png").is_err());
    }

    #[test]
    fn test_cache_lifecycle() {
        let mut cache = ImageCache::new();
        assert!(cache.start_loading("a"));
        assert!(!cache.start_loading("a"));
        assert!(cache.is_loading("a"));

        cache.finish(ImageLoadResult::Success {
            item_id: "a".to_string(),
            image: solid(2, 2),
        });
        assert!(cache.is_ready("a"));
        assert!(!cache.is_loading("a"));
        assert!(!cache.start_loading("a"));

        cache.start_loading("b");
        cache.finish(ImageLoadResult::Failure {
            item_id: "b".to_string(),
            error: "corrupt".to_string(),
        });
        assert_eq!(cache.failure("b"), Some("corrupt"));
        assert!(!cache.start_loading("b"));

        cache.retain(&["b"]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_scale_preserves_aspect() {
        // 100x50 into 20 columns x 20 rows (20x40 pixels): width bound
        let scaled = scale_to_cells(&solid(100, 50), 20, 20);
        assert_eq!(scaled.dimensions(), (20, 10));

        // 50x100 into 40 columns x 10 rows (40x20 pixels): height bound
        let scaled = scale_to_cells(&solid(50, 100), 40, 10);
        assert_eq!(scaled.dimensions(), (10, 20));
    }

    #[test]
    fn test_fit_reuses_frame() {
        let mut cache = ImageCache::new();
        cache.finish(ImageLoadResult::Success {
            item_id: "a".to_string(),
            image: solid(10, 10),
        });
        assert_eq!(cache.fit("a", 5, 5).map(|p| p.dimensions()), Some((5, 5)));
        assert_eq!(cache.fit("a", 5, 5).map(|p| p.dimensions()), Some((5, 5)));
        assert_eq!(cache.fit("a", 4, 1).map(|p| p.dimensions()), Some((2, 2)));
        assert!(cache.fit("missing", 4, 4).is_none());
    }
}
