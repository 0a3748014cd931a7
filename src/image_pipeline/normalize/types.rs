//! Types for normalization

/// RGBA8888 layout: R, G, B, A.
pub const BYTES_PER_PIXEL: usize = 4;

/// Grayscale frame ready for display, stored as RGBA8888.
///
/// R, G and B always hold the same value and A is always 255.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrayscalePixelBuffer {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Interleaved pixel data [R, G, B, A, R, G, B, A, ...]
    pub pixels: Vec<u8>,
}

impl GrayscalePixelBuffer {
    /// RGBA quad at row-major index `index`.
    pub fn pixel(&self, index: usize) -> Option<[u8; 4]> {
        let start = index.checked_mul(BYTES_PER_PIXEL)?;
        let quad = self.pixels.get(start..start + BYTES_PER_PIXEL)?;
        Some([quad[0], quad[1], quad[2], quad[3]])
    }

    /// Iterates the gray level of each pixel in raster order.
    pub fn gray_levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.chunks_exact(BYTES_PER_PIXEL).map(|quad| quad[0])
    }
}

/// Coldest and hottest sample of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    pub min: u16,
    pub max: u16,
}

impl SampleRange {
    /// Scans `samples` once. `None` when there is nothing to scan.
    pub fn of(samples: &[u16]) -> Option<Self> {
        let (&first, rest) = samples.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(min, max), &s| (min.min(s), max.max(s)));
        Some(Self { min, max })
    }

    /// Width of the range, never less than 1 so flat frames can be divided by it.
    pub fn span(&self) -> u32 {
        (u32::from(self.max) - u32::from(self.min)).max(1)
    }

    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }
}
