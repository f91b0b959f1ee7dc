//! # Layer Trait
//!
//! Tower-style middleware composition for storage backends.
//!
//! ```text
//! Backend ──▶ Layer::layer() ──▶ Wrapped Backend
//! ```
//!
//! Each middleware provides a wrapper type implementing the storage traits
//! and a `Layer` that builds it. [`GarbageLayer`](crate::GarbageLayer) is the
//! layer for the garbage-preserving middleware:
//!
//! ```rust
//! use garbage_fs::{GarbageLayer, LayerExt, MemoryFs};
//!
//! let fs = MemoryFs::new().layer(GarbageLayer::new());
//! assert_eq!(fs.garbage_root(), "garbage");
//! ```

use crate::Fs;

/// A layer that wraps a backend to add functionality.
///
/// `layer(self, backend)` consumes both the layer and the backend. Anything
/// that can fail (such as validating settings) happens when the layer is
/// built, so applying it cannot fail.
pub trait Layer<B> {
    /// The resulting backend type after applying this layer.
    type Backend;

    /// Wrap the given backend with this layer's functionality.
    fn layer(self, backend: B) -> Self::Backend;
}

/// Extension trait for fluent layer composition.
///
/// ```rust
/// use garbage_fs::{Fs, Layer, LayerExt};
///
/// fn compose_backend<B: Fs, L: Layer<B>>(backend: B, layer: L) -> L::Backend {
///     backend.layer(layer)
/// }
/// ```
pub trait LayerExt: Fs + Sized {
    /// Apply a layer to this backend.
    fn layer<L: Layer<Self>>(self, layer: L) -> L::Backend {
        layer.layer(self)
    }
}

impl<B: Fs> LayerExt for B {}
