use byteorder::{ByteOrder, LittleEndian};

use crate::constants::AUDIO_SAMPLE_BYTES;

/// Pack i16 PCM samples as little-endian bytes.
pub fn samples_to_le_bytes(samples: &[i16]) -> Vec<u8> {
    let mut out = vec![0u8; samples.len() * AUDIO_SAMPLE_BYTES];
    LittleEndian::write_i16_into(samples, &mut out);
    out
}

/// Unpack little-endian bytes into i16 samples. A trailing odd byte is ignored.
pub fn le_bytes_to_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(AUDIO_SAMPLE_BYTES)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

/// Fraction of positions where two equal-length buffers differ.
/// Returns 0.0 for empty input; compares only the common prefix otherwise.
pub fn byte_change_ratio(a: &[u8], b: &[u8]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let changed = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
    changed as f64 / n as f64
}
