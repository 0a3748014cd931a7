use std::sync::{Arc, Mutex};

use crate::image_pipeline::normalize::GrayscalePixelBuffer;

#[derive(Debug, Default)]
struct Published {
    generation: u64,
    buffer: Option<Arc<GrayscalePixelBuffer>>,
}

/// Latest completed frame, published by replacement.
///
/// Readers get their own `Arc` to a finished buffer; the writer never
/// mutates a buffer while any reader holds it.
#[derive(Debug, Clone, Default)]
pub struct FrameSlot {
    inner: Arc<Mutex<Published>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently published buffer, if any.
    pub fn latest(&self) -> Option<Arc<GrayscalePixelBuffer>> {
        self.lock().buffer.clone()
    }

    /// Latest buffer together with its generation, which increases by one
    /// with every publish.
    pub fn latest_with_generation(&self) -> (u64, Option<Arc<GrayscalePixelBuffer>>) {
        let published = self.lock();
        (published.generation, published.buffer.clone())
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Swaps in `buffer` and hands back the one it replaced.
    pub(crate) fn publish(
        &self,
        buffer: Arc<GrayscalePixelBuffer>,
    ) -> Option<Arc<GrayscalePixelBuffer>> {
        let mut published = self.lock();
        published.generation += 1;
        published.buffer.replace(buffer)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Published> {
        // Only ever swapped whole, so a poisoned lock still holds consistent data.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
