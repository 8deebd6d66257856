use crate::HashError;

const HEX_ENCODE: &[u8; 16] = b"0123456789abcdef";

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Hex-encode `bytes` to a new lowercase `String`.
pub fn hex_to_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_ENCODE[(b >> 4) as usize] as char);
        out.push(HEX_ENCODE[(b & 0x0f) as usize] as char);
    }
    out
}

/// Decode `hex` into `buf`. The string must be exactly `buf.len() * 2` long;
/// the caller checks the length.
pub(crate) fn hex_decode(hex: &str, buf: &mut [u8]) -> Result<(), HashError> {
    let hex = hex.as_bytes();
    debug_assert_eq!(hex.len(), buf.len() * 2);
    for (i, out) in buf.iter_mut().enumerate() {
        let decode = |pos: usize| {
            nibble(hex[pos]).ok_or(HashError::InvalidHex {
                position: pos,
                character: hex[pos] as char,
            })
        };
        *out = (decode(i * 2)? << 4) | decode(i * 2 + 1)?;
    }
    Ok(())
}
