use byteorder::{ByteOrder, LittleEndian};

use crate::chaos::{ChaosState, STATE_LEN};
use crate::constants::RECORD_MAGIC;
use crate::record::types::{RecordError, RecordHeader, RecordLayout, RecordLimits, RecordView};

/// Decode the fixed header. Magic is checked before anything else is read.
#[inline]
pub fn parse_record_header(wire: &[u8]) -> Result<RecordHeader, RecordError> {
    if wire.len() < RECORD_MAGIC.len() {
        return Err(RecordError::Truncated {
            have: wire.len(),
            need: RecordHeader::LEN,
        });
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&wire[0..4]);
    if magic != RECORD_MAGIC {
        return Err(RecordError::InvalidMagic(magic));
    }

    if wire.len() < RecordHeader::LEN {
        return Err(RecordError::Truncated {
            have: wire.len(),
            need: RecordHeader::LEN,
        });
    }

    let width = LittleEndian::read_u32(&wire[4..8]);
    let height = LittleEndian::read_u32(&wire[8..12]);
    let audio_samples = LittleEndian::read_u32(&wire[12..16]);

    let mut state_bytes = [0u8; STATE_LEN];
    state_bytes.copy_from_slice(&wire[16..16 + STATE_LEN]);

    Ok(RecordHeader {
        width,
        height,
        audio_samples,
        state: ChaosState::from_le_bytes(&state_bytes),
    })
}

/// Decode a full record without dimension limits.
///
/// Caller guarantees:
/// - Full record bytes are provided (one unit, nothing trailing)
pub fn decode_record(wire: &[u8]) -> Result<RecordView<'_>, RecordError> {
    decode_record_with_limits(wire, &RecordLimits::unbounded())
}

/// Decode a full record, rejecting headers over `limits` before slicing.
pub fn decode_record_with_limits<'a>(
    wire: &'a [u8],
    limits: &RecordLimits,
) -> Result<RecordView<'a>, RecordError> {
    let header = parse_record_header(wire)?;
    limits.check(&header)?;

    let expected = header.record_len()?;
    if wire.len() != expected {
        return Err(RecordError::LengthMismatch {
            expected,
            actual: wire.len(),
        });
    }

    let pixel_end = RecordHeader::LEN + header.pixel_len()?;
    let pixels = &wire[RecordHeader::LEN..pixel_end];
    let audio = if header.audio_samples > 0 {
        Some(&wire[pixel_end..expected])
    } else {
        None
    };

    Ok(RecordView {
        header,
        pixels,
        audio,
    })
}

/// Report the structure of a serialized record.
///
/// Only a bad magic or a buffer shorter than the header is an error; size
/// mismatches are reported in the layout instead.
pub fn inspect_record(wire: &[u8]) -> Result<RecordLayout, RecordError> {
    let header = parse_record_header(wire)?;

    let pixel_len = (header.width as u64)
        .saturating_mul(header.height as u64)
        .saturating_mul(3);
    let audio_len = (header.audio_samples as u64).saturating_mul(2);
    let header_len = RecordHeader::LEN as u64;

    Ok(RecordLayout {
        width: header.width,
        height: header.height,
        audio_samples: header.audio_samples,
        state: header.state,
        header_len,
        pixel_len,
        audio_len,
        expected_len: header_len.saturating_add(pixel_len).saturating_add(audio_len),
        actual_len: wire.len() as u64,
    })
}
