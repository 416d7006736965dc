//! Record decoding pattern shared across the format family.
//!
//! Every file in the family (models, light lists) is an ordered sequence of
//! records; each format supplies its own record schemas over the same cursor
//! primitives. The [`Record`] trait specifies the pattern once.

use crate::error::{DecodeError, DecodeResult};
use crate::reader::{Reader, text_from_raw};

/// One fixed-purpose decoded unit.
///
/// A decoder consumes bytes only through the cursor and never retains a
/// reference to it after returning.
pub trait Record: Sized {
    /// Record kind name, used in error contexts and diagnostics.
    const KIND: &'static str;

    /// Minimum encoded size of one record in bytes, used to bound declared
    /// list counts before allocation.
    const MIN_SIZE: usize;

    /// Decode one record from the cursor.
    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self>;
}

/// Decode `count` records, failing fast on the first malformed element.
///
/// Records are variable-size, so the count cannot be validated exactly up
/// front; the reserve is capped by what could possibly fit (so a corrupt
/// count cannot trigger a runaway allocation) and the first truncated or
/// malformed element fails the decode. Partial lists are never returned.
pub fn decode_list<T: Record>(r: &mut Reader<'_>, count: usize) -> DecodeResult<Vec<T>> {
    let mut records = Vec::with_capacity(count.min(r.remaining() / T::MIN_SIZE.max(1)));
    for _ in 0..count {
        records.push(T::decode(r)?);
    }
    Ok(records)
}

/// Enforce a header-declared count against the decoded list length.
///
/// [`decode_list`] already returns exactly `count` records or fails, so for
/// a list decoded through it this cannot fire; the orchestrators call it
/// anyway so the counts-match-headers invariant is enforced in one visible
/// place.
pub(crate) fn check_count(
    context: &'static str,
    declared: usize,
    actual: usize,
) -> DecodeResult<()> {
    if declared == actual {
        Ok(())
    } else {
        Err(DecodeError::CountMismatch {
            context,
            declared,
            actual,
        })
    }
}

/// The version marker bytes as they appear on disk, trailing NUL included.
const VERSION_MARKER: &[u8] = b"Version\0";

/// Result of reading a name field that may instead be a version marker.
pub(crate) enum NameTag {
    /// The run was the literal marker; a version number follows it.
    Versioned,
    /// The run is the name itself (including the fallback for an 8-byte run
    /// that is not the marker).
    Name(String),
}

/// Read a length-prefixed byte run and decide whether it is the record's
/// name or the `"Version"` marker.
///
/// This is a content-dependent branch, not a length-dependent one: only the
/// exact 8 bytes `"Version\0"` select the versioned layout. Any other run,
/// 8 bytes long or not, is the name. The legacy producer wrote real names
/// of length 8, so comparing length alone would corrupt every field after
/// them.
pub(crate) fn read_name_tag(r: &mut Reader<'_>, context: &'static str) -> DecodeResult<NameTag> {
    let offset = r.position();
    let raw = r.read_sized_bytes(context)?;
    if raw == VERSION_MARKER {
        Ok(NameTag::Versioned)
    } else {
        Ok(NameTag::Name(text_from_raw(raw, context, offset)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn sized(bytes: &[u8]) -> Vec<u8> {
        let mut data = u32::try_from(bytes.len()).unwrap().to_le_bytes().to_vec();
        data.extend_from_slice(bytes);
        data
    }

    #[test]
    fn test_name_tag_version_marker() {
        let data = sized(b"Version\0");
        let mut r = Reader::new(&data);
        assert!(matches!(
            read_name_tag(&mut r, "test").unwrap(),
            NameTag::Versioned
        ));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_name_tag_eight_byte_name_fallback() {
        // Same length as the marker but different content: the run is the
        // name, and no version number may be consumed after it.
        let data = sized(b"Version!");
        let mut r = Reader::new(&data);
        match read_name_tag(&mut r, "test").unwrap() {
            NameTag::Name(name) => assert_eq!(name, "Version!"),
            NameTag::Versioned => panic!("marker misrecognized"),
        }
    }

    #[test]
    fn test_name_tag_plain_name() {
        let data = sized(b"door01\0");
        let mut r = Reader::new(&data);
        match read_name_tag(&mut r, "test").unwrap() {
            NameTag::Name(name) => assert_eq!(name, "door01"),
            NameTag::Versioned => panic!("marker misrecognized"),
        }
    }

    #[test]
    fn test_check_count() {
        assert!(check_count("records", 3, 3).is_ok());
        assert!(matches!(
            check_count("records", 3, 2),
            Err(DecodeError::CountMismatch {
                declared: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_name_tag_truncated() {
        let data = 8u32.to_le_bytes();
        let mut r = Reader::new(&data);
        assert!(matches!(
            read_name_tag(&mut r, "test"),
            Err(DecodeError::TruncatedInput { .. })
        ));
    }
}
