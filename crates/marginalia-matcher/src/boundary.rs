//! Script-aware word boundary classification on raw UTF-8 bytes
//!
//! Latin, Cyrillic and Greek text separates words with spaces and
//! punctuation, so a hit for "Ali" inside "quality" must be rejected.
//! CJK and Thai have no spaces between words, and Arabic/Hebrew punctuation
//! is unreliable at the byte level, so needles in those scripts skip the
//! boundary check entirely.

/// Whether the byte at `pos` belongs to a word character
///
/// ASCII bytes are word characters when alphanumeric. For multi-byte
/// sequences the full code point is decoded (scanning back up to three
/// bytes to the lead byte when `scan_back` is set and `pos` lands on a
/// continuation byte) and classified:
///
/// - punctuation and symbol blocks (Latin-1 U+00A0-U+00BF, General
///   Punctuation, Supplemental Punctuation, CJK Symbols and Punctuation)
///   are not word characters
/// - 4-byte sequences (emoji, supplementary planes) are not word characters
/// - any other letter (accented Latin, Cyrillic, Greek, Hebrew, Arabic, ...)
///   is a word character
///
/// Sequences that cannot be decoded count as word characters, so a broken
/// byte never manufactures a boundary. Positions past the end of `text` are
/// not word characters.
pub fn is_word_char(text: &[u8], pos: usize, scan_back: bool) -> bool {
    let Some(&byte) = text.get(pos) else {
        return false;
    };

    if byte < 0x80 {
        return byte.is_ascii_alphanumeric();
    }

    let mut lead_pos = pos;
    if is_continuation(byte) {
        if !scan_back {
            return true;
        }
        let floor = pos.saturating_sub(3);
        match (floor..pos).rev().find(|&i| !is_continuation(text[i])) {
            Some(i) => lead_pos = i,
            None => return true,
        }
    }

    let lead = text[lead_pos];
    if lead >= 0xF0 {
        return false;
    }

    match decode_at(text, lead_pos) {
        Some(cp) => !is_punctuation_block(cp),
        None => true,
    }
}

/// Whether matches of `needle` should skip boundary checks
///
/// True when any byte is the lead of a 3+ byte sequence (>= 0xE0: CJK,
/// Thai, ...) or an Arabic/Hebrew/Syriac lead byte (0xD6..=0xDB).
pub fn skip_boundary_check(needle: &str) -> bool {
    needle
        .bytes()
        .any(|b| b >= 0xE0 || (0xD6..=0xDB).contains(&b))
}

fn is_continuation(byte: u8) -> bool {
    (byte & 0xC0) == 0x80
}

fn is_punctuation_block(cp: u32) -> bool {
    matches!(
        cp,
        0x00A0..=0x00BF | 0x2000..=0x206F | 0x2E00..=0x2E7F | 0x3000..=0x303F
    )
}

/// Decode the 2- or 3-byte sequence starting at `pos`
fn decode_at(text: &[u8], pos: usize) -> Option<u32> {
    let lead = text[pos];
    let (len, initial) = match lead {
        0xC0..=0xDF => (2, u32::from(lead & 0x1F)),
        0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
        _ => return None,
    };
    let tail = text.get(pos + 1..pos + len)?;
    tail.iter().try_fold(initial, |cp, &b| {
        is_continuation(b).then(|| (cp << 6) | u32::from(b & 0x3F))
    })
}
