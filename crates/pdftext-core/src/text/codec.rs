//! UTF-16 <-> UTF-8 conversion for engine text runs.

use tracing::warn;

/// Convert a run of UTF-16 code units to a UTF-8 string.
///
/// Trailing NUL terminators are not part of the text and are dropped. A run
/// that is not well-formed UTF-16 (an unpaired surrogate) yields an empty
/// string: a bad field or page degrades to no text instead of failing the
/// whole extraction.
pub fn utf16_to_utf8(run: &[u16]) -> String {
    let run = trim_terminator(run);
    if run.is_empty() {
        return String::new();
    }

    // Worst case is 2x the input bytes; a BMP unit never needs more than
    // 3 UTF-8 bytes and a surrogate pair (4 input bytes) exactly 4.
    let mut out = String::with_capacity(run.len() * 2 * 2 + 4);
    for decoded in char::decode_utf16(run.iter().copied()) {
        match decoded {
            Ok(c) => out.push(c),
            Err(e) => {
                warn!(
                    "unpaired surrogate 0x{:04x} in text run of {} units",
                    e.unpaired_surrogate(),
                    run.len()
                );
                return String::new();
            }
        }
    }
    out.shrink_to_fit();
    out
}

/// Convert little-endian UTF-16 bytes to a UTF-8 string.
///
/// An odd trailing byte is malformed input and yields an empty string.
pub fn utf16le_bytes_to_utf8(bytes: &[u8]) -> String {
    if bytes.len() % 2 != 0 {
        warn!("odd-length UTF-16LE buffer ({} bytes)", bytes.len());
        return String::new();
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    utf16_to_utf8(&units)
}

/// Encode a string as UTF-16 code units (no terminator).
pub fn utf8_to_utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn trim_terminator(run: &[u16]) -> &[u16] {
    let end = run.iter().rposition(|&u| u != 0).map_or(0, |i| i + 1);
    &run[..end]
}
