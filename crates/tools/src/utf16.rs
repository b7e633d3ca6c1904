/// UTF-16 code-unit helpers over UTF-8 strings.
///
/// Field offsets are counted in UTF-16 code units so they line up with host
/// selection APIs. Rust strings are UTF-8, so every splice converts a unit
/// offset into a byte offset first. Conversions never split a scalar value:
/// an offset that lands between the two halves of a surrogate pair snaps to
/// one side of the character.

/// Length of `s` in UTF-16 code units.
#[inline]
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Byte offset for `units` UTF-16 code units into `s`.
///
/// Offsets past the end clamp to `s.len()`. An offset inside a surrogate
/// pair snaps down to the start of that character.
pub fn byte_offset_floor(s: &str, units: usize) -> usize {
    let mut seen = 0usize;
    for (byte, ch) in s.char_indices() {
        let next = seen + ch.len_utf16();
        if next > units {
            return byte;
        }
        seen = next;
    }
    s.len()
}

/// Like [`byte_offset_floor`], but an offset inside a surrogate pair snaps
/// up to the end of that character.
pub fn byte_offset_ceil(s: &str, units: usize) -> usize {
    let mut seen = 0usize;
    for (byte, ch) in s.char_indices() {
        if seen >= units {
            return byte;
        }
        seen += ch.len_utf16();
    }
    s.len()
}

/// UTF-16 offset of the byte index `byte` (clamped to a char boundary).
pub fn utf16_offset_of_byte(s: &str, byte: usize) -> usize {
    let mut byte = byte.min(s.len());
    while byte > 0 && !s.is_char_boundary(byte) {
        byte -= 1;
    }
    utf16_len(&s[..byte])
}
