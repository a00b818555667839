use byteorder::{ByteOrder, LittleEndian};

use crate::chaos::ChaosState;
use crate::constants::RECORD_MAGIC;
use crate::record::types::{FrameBuffer, RecordError, RecordHeader};
use crate::utils::samples_to_le_bytes;

/// Serialize a header into its fixed 48-byte form.
///
/// Layout:
///
/// ```text
/// [ magic "MNAK" (4) ]
/// [ width  M u32 (4) ]
/// [ height N u32 (4) ]
/// [ audio  A u32 (4) ]
/// [ state 4×f64 (32) ]
/// ```
#[inline]
pub fn encode_record_header(header: &RecordHeader) -> [u8; RecordHeader::LEN] {
    let mut out = [0u8; RecordHeader::LEN];

    out[0..4].copy_from_slice(&RECORD_MAGIC);
    LittleEndian::write_u32(&mut out[4..8], header.width);
    LittleEndian::write_u32(&mut out[8..12], header.height);
    LittleEndian::write_u32(&mut out[12..16], header.audio_samples);
    out[16..48].copy_from_slice(&header.state.to_le_bytes());

    out
}

/// Encode one unit into canonical wire format:
/// header, then `M·N·3` pixel bytes, then `A·2` audio bytes.
///
/// An empty audio slice is encoded the same as `None` (A = 0).
pub fn encode_record(
    frame: &FrameBuffer,
    audio: Option<&[i16]>,
    state: &ChaosState,
) -> Result<Vec<u8>, RecordError> {
    let samples = audio.unwrap_or(&[]);
    let audio_samples =
        u32::try_from(samples.len()).map_err(|_| RecordError::TooManySamples(samples.len()))?;

    let header = RecordHeader {
        width: frame.width(),
        height: frame.height(),
        audio_samples,
        state: *state,
    };

    let pixel_len = header.pixel_len()?;
    if frame.pixels().len() != pixel_len {
        return Err(RecordError::PayloadSize {
            expected: pixel_len,
            actual: frame.pixels().len(),
        });
    }

    let expected = header.record_len()?;
    let mut out = Vec::with_capacity(expected);

    // --- Header ---
    out.extend_from_slice(&encode_record_header(&header));

    // --- Body ---
    out.extend_from_slice(frame.pixels());
    out.extend_from_slice(&samples_to_le_bytes(samples));

    // --- Validation ---
    if out.len() != expected {
        return Err(RecordError::LengthMismatch {
            expected,
            actual: out.len(),
        });
    }

    Ok(out)
}
