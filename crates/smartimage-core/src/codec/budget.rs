//! Memory pre-flight for large images.
//!
//! The core never raises process limits itself. A host that wants to refuse
//! oversized images hands a [`MemoryBudget`] to
//! [`ImageHandle::from_bytes_with_budget`](crate::ImageHandle::from_bytes_with_budget),
//! which only parses the header before asking.

/// Fixed overhead added to every estimate.
const HEADER_OVERHEAD: f64 = 65536.0;

/// Fudge factor for decoder working memory.
const WORKING_SET_FACTOR: f64 = 1.65;

/// Decides whether an allocation of a given size may proceed.
pub trait MemoryBudget {
    fn can_allocate(&self, bytes: u64) -> bool;
}

/// Accepts every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl MemoryBudget for Unbounded {
    fn can_allocate(&self, _bytes: u64) -> bool {
        true
    }
}

/// Accepts requests up to `limit` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBudget {
    pub limit: u64,
}

impl FixedBudget {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl MemoryBudget for FixedBudget {
    fn can_allocate(&self, bytes: u64) -> bool {
        bytes <= self.limit
    }
}

/// Estimate the bytes needed to decode an image.
///
/// `round((width * height * bits * channels / 8 + 65536) * 1.65)`
pub fn estimate_decode_bytes(width: u32, height: u32, bits: u32, channels: u32) -> u64 {
    let raster = width as f64 * height as f64 * bits as f64 * channels as f64 / 8.0;
    ((raster + HEADER_OVERHEAD) * WORKING_SET_FACTOR).round() as u64
}
