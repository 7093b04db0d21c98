//! # Image blobs
//!
//! A card's image is either a URL the user typed or a reference the host
//! hands out for an uploaded file. The host side is abstracted as
//! [`BlobHost`]: it turns raw bytes into a displayable reference and is told
//! when that reference is no longer needed.
//!
//! - [`ObjectUrlHost`] issues transient `blob:` references backed by an
//!   in-memory table, the way a browser's object URLs behave. References are
//!   valid only while the host lives and until released.
//! - [`DataUrlHost`] inlines the bytes as a base64 `data:` URL. The reference
//!   is self-contained, so release is a no-op. The CLI uses this one.

use crate::error::{CardboxError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

/// Bytes of an uploaded image plus the name it was uploaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(CardboxError::Io)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    /// Media type guessed from the file extension.
    pub fn media_type(&self) -> &'static str {
        let ext = Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "bmp" => "image/bmp",
            "avif" => "image/avif",
            _ => "application/octet-stream",
        }
    }
}

/// A displayable reference issued by a [`BlobHost`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobRef(String);

impl BlobRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub trait BlobHost {
    /// Make `blob` displayable and return the reference to show it by.
    fn create_ref(&mut self, blob: &ImageBlob) -> Result<BlobRef>;

    /// The reference is no longer needed. Releasing an unknown reference is a no-op.
    fn release(&mut self, reference: &BlobRef);

    /// Whether an image string (URL or reference) can be shown by this host.
    fn can_display(&self, image: &str) -> bool {
        is_remote_or_inline(image)
    }
}

fn is_remote_or_inline(image: &str) -> bool {
    image.starts_with("https://") || image.starts_with("http://") || image.starts_with("data:")
}

const OBJECT_URL_PREFIX: &str = "blob:cardbox/";

#[derive(Debug, Default)]
pub struct ObjectUrlHost {
    live: HashMap<BlobRef, ImageBlob>,
}

impl ObjectUrlHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// References created and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, reference: &str) -> bool {
        self.live.contains_key(&BlobRef(reference.to_string()))
    }

    pub fn resolve(&self, reference: &BlobRef) -> Option<&ImageBlob> {
        self.live.get(reference)
    }
}

impl BlobHost for ObjectUrlHost {
    fn create_ref(&mut self, blob: &ImageBlob) -> Result<BlobRef> {
        let reference = BlobRef(format!("{}{}", OBJECT_URL_PREFIX, Uuid::new_v4()));
        self.live.insert(reference.clone(), blob.clone());
        debug!(reference = %reference.0, name = %blob.name, "object url created");
        Ok(reference)
    }

    fn release(&mut self, reference: &BlobRef) {
        if self.live.remove(reference).is_some() {
            debug!(reference = %reference.0, "object url released");
        }
    }

    fn can_display(&self, image: &str) -> bool {
        is_remote_or_inline(image) || self.is_live(image)
    }
}

#[derive(Debug, Default)]
pub struct DataUrlHost;

impl DataUrlHost {
    pub fn new() -> Self {
        Self
    }
}

impl BlobHost for DataUrlHost {
    fn create_ref(&mut self, blob: &ImageBlob) -> Result<BlobRef> {
        Ok(BlobRef(format!(
            "data:{};base64,{}",
            blob.media_type(),
            STANDARD.encode(&blob.bytes)
        )))
    }

    fn release(&mut self, _reference: &BlobRef) {}
}
