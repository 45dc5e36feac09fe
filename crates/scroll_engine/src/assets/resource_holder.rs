//! Identifier-keyed resource storage

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{FontId, TextureId};

/// Resource loading and lookup errors
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The file could not be read
    #[error("Failed to load {path:?}: {source}")]
    NotFound {
        /// File that was requested
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file was read but could not be decoded
    #[error("Failed to decode {path:?}: {reason}")]
    Decode {
        /// File that was requested
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// No resource was loaded under this identifier
    #[error("Resource not loaded: {0}")]
    Missing(String),

    /// A resource was already loaded under this identifier
    #[error("Resource loaded twice: {0}")]
    Duplicate(String),
}

/// A resource that can be loaded from a file
pub trait Resource: Sized {
    /// Load the resource from `path`
    fn load_from_file(path: &Path) -> Result<Self, ResourceError>;
}

/// Texture metadata
///
/// The core only needs texture dimensions, to check that sprite rectangles
/// lie inside their texture. Pixel data stays with the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
}

impl Texture {
    /// Create a texture description of the given size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width in texels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Resource for Texture {
    fn load_from_file(path: &Path) -> Result<Self, ResourceError> {
        if !path.is_file() {
            return Err(ResourceError::NotFound {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }

        let (width, height) = image::image_dimensions(path).map_err(|e| ResourceError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self::new(width, height))
    }
}

/// Font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    data: Vec<u8>,
}

impl Font {
    /// Wrap raw font file bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Raw font file bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Resource for Font {
    fn load_from_file(path: &Path) -> Result<Self, ResourceError> {
        let data = std::fs::read(path).map_err(|source| ResourceError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if data.is_empty() {
            return Err(ResourceError::Decode {
                path: path.to_path_buf(),
                reason: "font file is empty".to_string(),
            });
        }

        Ok(Self::from_bytes(data))
    }
}

/// Resources of one type, keyed by identifier
pub struct ResourceHolder<Id, R> {
    resources: HashMap<Id, R>,
}

/// Texture storage
pub type TextureHolder = ResourceHolder<TextureId, Texture>;

/// Font storage
pub type FontHolder = ResourceHolder<FontId, Font>;

impl<Id, R> ResourceHolder<Id, R>
where
    Id: Copy + Eq + Hash + Debug,
{
    /// Create an empty holder
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Load a resource from file and store it under `id`
    pub fn load(&mut self, id: Id, path: impl AsRef<Path>) -> Result<(), ResourceError>
    where
        R: Resource,
    {
        let path = path.as_ref();
        let resource = R::load_from_file(path)?;
        log::debug!("Loaded {:?} from {}", id, path.display());
        self.insert(id, resource)
    }

    /// Store an already constructed resource under `id`
    pub fn insert(&mut self, id: Id, resource: R) -> Result<(), ResourceError> {
        if self.resources.contains_key(&id) {
            return Err(ResourceError::Duplicate(format!("{id:?}")));
        }
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Look up a resource
    pub fn get(&self, id: Id) -> Result<&R, ResourceError> {
        self.resources
            .get(&id)
            .ok_or_else(|| ResourceError::Missing(format!("{id:?}")))
    }

    /// Check whether a resource is loaded
    pub fn contains(&self, id: Id) -> bool {
        self.resources.contains_key(&id)
    }

    /// Number of loaded resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when nothing is loaded
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl<Id, R> Default for ResourceHolder<Id, R>
where
    Id: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
