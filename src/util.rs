use std::borrow::Cow;
use std::char;

use tracing::warn;

/// Byte Order Mark (BOM) is used to signal the endianness of an encoding. The order `0xFF 0xFE`
/// strongly suggests that the encoding is using little-endian byte order.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Turn raw file contents into text the parser can consume.
///
/// UTF-16 LE is recognized by its BOM; everything else is read as UTF-8. Windows line endings are
/// folded into `\n`.
pub(crate) fn decode_data(data: &[u8]) -> String {
    let text = if let Some(rest) = data.strip_prefix(BOM_UTF16_LE) {
        let utf16 = rest
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>()
    } else {
        let rest = data.strip_prefix(BOM_UTF8).unwrap_or(data);

        match String::from_utf8_lossy(rest) {
            Cow::Borrowed(s) => s.to_owned(),
            Cow::Owned(s) => {
                warn!("input is not valid UTF-8; invalid sequences were replaced");
                s
            }
        }
    };

    if text.contains('\r') {
        text.replace("\r\n", "\n")
    } else {
        text
    }
}
