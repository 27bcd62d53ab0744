//! # Payload Compression
//!
//! Frame compression for the optional TRC transport envelope.
//!
//! - [`ZstdCodec`]: one zstd frame per document, decompression bounded by
//!   `max_decompressed_bytes` (requires the `compression` feature)
//! - [`PassthroughCodec`]: returns data unchanged

use crate::domain::errors::{TrcError, TrcResult};
use crate::ports::outbound::PayloadCodec;

// =============================================================================
// COMPRESSION CONFIGURATION
// =============================================================================

/// Configuration for the compression envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Zstd level (1-22, default 3)
    pub level: i32,
    /// Upper bound on the size of an opened envelope
    pub max_decompressed_bytes: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: 3,
            max_decompressed_bytes: 4 * 1024 * 1024,
        }
    }
}

impl CompressionConfig {
    /// Create config for testing (fast, small bound)
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            level: 1,
            max_decompressed_bytes: 64 * 1024,
        }
    }
}

// =============================================================================
// ZSTD CODEC
// =============================================================================

/// Zstd frame codec.
#[cfg(feature = "compression")]
#[derive(Debug, Clone, Default)]
pub struct ZstdCodec {
    config: CompressionConfig,
}

#[cfg(feature = "compression")]
impl ZstdCodec {
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }
}

#[cfg(feature = "compression")]
impl PayloadCodec for ZstdCodec {
    fn compress(&self, data: &[u8]) -> TrcResult<Vec<u8>> {
        zstd::encode_all(data, self.config.level).map_err(|e| TrcError::Compression(e.to_string()))
    }

    fn decompress(&self, data: &[u8]) -> TrcResult<Vec<u8>> {
        use std::io::Read;

        let limit = self.config.max_decompressed_bytes;
        let decoder = zstd::stream::read::Decoder::new(data)
            .map_err(|e| TrcError::Compression(e.to_string()))?;

        // One byte past the limit is enough to detect an oversized frame.
        let mut output = Vec::new();
        decoder
            .take(limit as u64 + 1)
            .read_to_end(&mut output)
            .map_err(|e| TrcError::Compression(e.to_string()))?;

        if output.len() > limit {
            return Err(TrcError::Compression(format!(
                "decompressed payload exceeds {limit} bytes"
            )));
        }
        Ok(output)
    }
}

// =============================================================================
// PASSTHROUGH CODEC
// =============================================================================

/// Codec that returns data unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCodec;

impl PayloadCodec for PassthroughCodec {
    fn compress(&self, data: &[u8]) -> TrcResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> TrcResult<Vec<u8>> {
        Ok(data.to_vec())
    }
}
