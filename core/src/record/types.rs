//! record/types.rs
//! Unit record header, views, limits and errors.
//!
//! All integers are little-endian. The header is fixed at 48 bytes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chaos::ChaosState;
use crate::constants::{
    AUDIO_SAMPLE_BYTES, DEFAULT_MAX_AUDIO_SAMPLES, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
    PIXEL_CHANNELS, RECORD_HEADER_LEN,
};
use crate::utils::le_bytes_to_samples;

/// Canonical record header (fixed size).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordHeader {
    /// M: frame width in pixels.
    pub width: u32,
    /// N: frame height in pixels.
    pub height: u32,
    /// A: number of 16-bit audio samples carried after the pixels.
    pub audio_samples: u32,
    /// Generator state at the step that keyed this unit.
    pub state: ChaosState,
}

impl RecordHeader {
    pub const LEN: usize = RECORD_HEADER_LEN;

    /// M·N·3, checked.
    pub fn pixel_len(&self) -> Result<usize, RecordError> {
        (self.width as u64)
            .checked_mul(self.height as u64)
            .and_then(|v| v.checked_mul(PIXEL_CHANNELS as u64))
            .and_then(|v| usize::try_from(v).ok())
            .ok_or(self.overflow())
    }

    /// A·2, checked.
    pub fn audio_len(&self) -> Result<usize, RecordError> {
        (self.audio_samples as u64)
            .checked_mul(AUDIO_SAMPLE_BYTES as u64)
            .and_then(|v| usize::try_from(v).ok())
            .ok_or(self.overflow())
    }

    /// Total serialized length: header + pixels + audio.
    pub fn record_len(&self) -> Result<usize, RecordError> {
        let pixels = self.pixel_len()?;
        let audio = self.audio_len()?;
        Self::LEN
            .checked_add(pixels)
            .and_then(|v| v.checked_add(audio))
            .ok_or(self.overflow())
    }

    fn overflow(&self) -> RecordError {
        RecordError::SizeOverflow {
            width: self.width,
            height: self.height,
            audio_samples: self.audio_samples,
        }
    }
}

/// Owned pixel buffer of exactly `width * height * 3` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Wrap `pixels`, rejecting a length that does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RecordError> {
        let expected = expected_pixel_len(width, height)?;
        if pixels.len() != expected {
            return Err(RecordError::PayloadSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// All-zero frame.
    pub fn zeroed(width: u32, height: u32) -> Result<Self, RecordError> {
        let len = expected_pixel_len(width, height)?;
        Ok(Self { width, height, pixels: vec![0u8; len] })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable pixel bytes. The length cannot change, so the shape invariant holds.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

fn expected_pixel_len(width: u32, height: u32) -> Result<usize, RecordError> {
    RecordHeader {
        width,
        height,
        audio_samples: 0,
        state: ChaosState::default(),
    }
    .pixel_len()
}

/// Borrowed view into a decoded record. No allocation, no copy.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    pub header: RecordHeader,
    pub pixels: &'a [u8],
    /// Raw little-endian i16 samples; `None` when A == 0.
    pub audio: Option<&'a [u8]>,
}

impl<'a> RecordView<'a> {
    /// Decode the audio bytes into samples.
    pub fn audio_samples(&self) -> Option<Vec<i16>> {
        self.audio.map(le_bytes_to_samples)
    }

    /// Copy into an owned [`Record`].
    pub fn to_record(&self) -> Record {
        Record {
            header: self.header,
            frame: FrameBuffer {
                width: self.header.width,
                height: self.header.height,
                pixels: self.pixels.to_vec(),
            },
            audio: self.audio_samples(),
        }
    }
}

/// Owned record, reconstructed after decryption.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub header: RecordHeader,
    pub frame: FrameBuffer,
    pub audio: Option<Vec<i16>>,
}

/// Structural report of a serialized record, produced without failing on
/// size mismatches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordLayout {
    pub width: u32,
    pub height: u32,
    pub audio_samples: u32,
    pub state: ChaosState,
    pub header_len: u64,
    pub pixel_len: u64,
    pub audio_len: u64,
    pub expected_len: u64,
    pub actual_len: u64,
}

impl RecordLayout {
    pub fn is_consistent(&self) -> bool {
        self.expected_len == self.actual_len
    }

    /// `actual - expected`; negative when bytes are missing.
    pub fn size_difference(&self) -> i128 {
        self.actual_len as i128 - self.expected_len as i128
    }
}

/// Upper bounds on header-declared dimensions, checked before any slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLimits {
    pub max_width: u32,
    pub max_height: u32,
    pub max_audio_samples: u32,
}

impl RecordLimits {
    /// Accept anything the header can express.
    pub const fn unbounded() -> Self {
        Self {
            max_width: u32::MAX,
            max_height: u32::MAX,
            max_audio_samples: u32::MAX,
        }
    }

    pub fn check(&self, header: &RecordHeader) -> Result<(), RecordError> {
        let checks = [
            ("width", header.width, self.max_width),
            ("height", header.height, self.max_height),
            ("audio_samples", header.audio_samples, self.max_audio_samples),
        ];
        for (field, value, max) in checks {
            if value > max {
                return Err(RecordError::LimitExceeded { field, value, max });
            }
        }
        Ok(())
    }
}

impl Default for RecordLimits {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            max_audio_samples: DEFAULT_MAX_AUDIO_SAMPLES,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("truncated record: have {have} bytes, need {need}")]
    Truncated { have: usize, need: usize },

    #[error("invalid record magic: 0x{}", hex::encode(.0))]
    InvalidMagic([u8; 4]),

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("record size overflows: {width}x{height}x3 + {audio_samples}x2")]
    SizeOverflow {
        width: u32,
        height: u32,
        audio_samples: u32,
    },

    #[error("header {field}={value} exceeds limit {max}")]
    LimitExceeded {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("payload size mismatch: expected {expected} bytes, got {actual}")]
    PayloadSize { expected: usize, actual: usize },

    #[error("too many audio samples for one record: {0}")]
    TooManySamples(usize),
}
