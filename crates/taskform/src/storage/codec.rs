//! On-disk encoding of the record collection.
//!
//! The data file is a single JSON array of records with no envelope, version
//! field or checksum.

use crate::record::Record;

/// Decode a data file's contents into a collection.
///
/// # Errors
///
/// Returns an error if `bytes` is not a JSON array of records.
pub fn decode(bytes: &[u8]) -> serde_json::Result<Vec<Record>> {
    serde_json::from_slice(bytes)
}

/// Encode a collection into data file contents.
///
/// `pretty` selects indented output; the default writer is compact.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(records: &[Record], pretty: bool) -> serde_json::Result<Vec<u8>> {
    if pretty {
        serde_json::to_vec_pretty(records)
    } else {
        serde_json::to_vec(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordFields, RecordId};

    fn sample() -> Vec<Record> {
        vec![
            Record::new(RecordId::new(1), RecordFields::new("A", "B", "a@b.com", "x")),
            Record::new(
                RecordId::new(2),
                RecordFields::new("Zoë", "Ñúñez", "z@n.es", "p\"q\\r"),
            ),
        ]
    }

    #[test]
    fn test_encode_empty_is_empty_array() {
        assert_eq!(encode(&[], false).unwrap(), b"[]");
    }

    #[test]
    fn test_encode_compact_has_no_whitespace() {
        let bytes = encode(&sample()[..1], false).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"id":1,"name":"A","lastName":"B","email":"a@b.com","password":"x"}]"#
        );
    }

    #[test]
    fn test_pretty_and_compact_decode_identically() {
        let records = sample();
        let compact = decode(&encode(&records, false).unwrap()).unwrap();
        let pretty = decode(&encode(&records, true).unwrap()).unwrap();
        assert_eq!(compact, records);
        assert_eq!(pretty, records);
    }

    #[test]
    fn test_decode_rejects_object() {
        assert!(decode(br#"{"id":1}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(decode(b"").is_err());
    }
}
