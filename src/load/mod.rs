//! Turn files on disk into entries in memory
//!
//! Handles the encoding quirks of supplier exports (UTF-8 with a Latin-1
//! fallback) and delegates line parsing to the grammar

pub mod error;
pub mod extract;
pub mod parse;

use crate::lib::entry::Entry;

/// Read and parse a data file
///
/// The return value may be non-empty even if some warnings occured; callers
/// should determine success by querying `errs`, not the returned list.
pub fn read_entries(filename: &str, errs: &mut error::Record) -> Option<Vec<Entry>> {
    let contents = read_document(filename, errs)?;
    let entries = parse::extract(filename, errs, &contents);
    if errs.is_fatal() {
        None
    } else {
        Some(entries)
    }
}

/// Read a text file, decoding UTF-8 with a Latin-1 fallback
pub fn read_document(filename: &str, errs: &mut error::Record) -> Option<String> {
    match std::fs::read(filename) {
        Ok(bytes) => Some(decode(bytes)),
        Err(_) => {
            errs.make("File not found")
                .text(format!("Cannot read '{}'", filename))
                .hint("check the path or import the file");
            None
        }
    }
}

/// Decode UTF-8, falling back to Latin-1 when the bytes do not validate
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback never loses data; it is how legacy supplier exports decode.
pub fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod test {
    use super::decode;

    #[test]
    fn utf8_passes_through() {
        assert_eq!(decode("Panadol → 10%".as_bytes().to_vec()), "Panadol → 10%");
    }

    #[test]
    fn latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 and invalid alone in UTF-8
        assert_eq!(decode(vec![0x45, 0xE9, 0x21]), "Eé!");
    }
}
