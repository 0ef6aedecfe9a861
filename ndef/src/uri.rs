//! The well-known URI RTD ("U"): a single identifier byte selecting a
//! fixed prefix (NFCForum-RTD_URI_1.0 Table 3), followed by the UTF-8 tail.

use crate::consts::{RecordFlags, RTD_URI, TNF, URI_PREFIXES};
use crate::error::NdefError;
use crate::record::{NdefRecord, RecordKind};

/// Decoded/composed contents of a URI record: the fully expanded URI with
/// its abbreviation prefix (if any) substituted back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriFields {
    uri: String,
}

impl UriFields {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Alias kept for readers coming from the NFC Forum spec text, which
    /// calls this the record's "URI field".
    pub fn full_uri(&self) -> &str {
        &self.uri
    }

    pub(crate) fn decode(payload: &[u8]) -> Result<UriFields, NdefError> {
        let id = *payload.first().ok_or(NdefError::InvalidUri)? as usize;
        let prefix = URI_PREFIXES.get(id).ok_or(NdefError::InvalidUri)?;
        let tail = std::str::from_utf8(&payload[1..]).map_err(|_| NdefError::InvalidUri)?;
        Ok(UriFields { uri: format!("{prefix}{tail}") })
    }

    /// Longest-prefix match against the abbreviation table; identifier 0
    /// (no abbreviation) when nothing matches.
    fn payload_bytes(uri: &str) -> Vec<u8> {
        let best = URI_PREFIXES
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, prefix)| uri.starts_with(*prefix))
            .max_by_key(|(_, prefix)| prefix.len());

        let (id, tail) = match best {
            Some((i, prefix)) => (i as u8, &uri[prefix.len()..]),
            None => (0u8, uri),
        };

        let mut out = Vec::with_capacity(1 + tail.len());
        out.push(id);
        out.extend_from_slice(tail.as_bytes());
        out
    }
}

/// Builds a complete URI record (TNF=WellKnown, type "U", MB=ME=1).
pub fn new_record(uri: &str) -> NdefRecord {
    let payload = UriFields::payload_bytes(uri);
    let fields = UriFields { uri: uri.to_string() };
    NdefRecord::from_parts(
        TNF::WellKnown,
        RecordFlags::MB | RecordFlags::ME,
        RTD_URI.as_bytes().to_vec(),
        Vec::new(),
        payload,
        RecordKind::Uri(fields),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_abbreviated_uri() {
        let payload = hex::decode("01737570776973646f6d2e636f6d").unwrap();
        let fields = UriFields::decode(&payload).unwrap();
        assert_eq!(fields.uri(), "http://www.supwisdom.com");
    }

    #[test]
    fn decodes_unabbreviated_uri() {
        let payload = b"\x00weixin://dl/business";
        let fields = UriFields::decode(payload).unwrap();
        assert_eq!(fields.uri(), "weixin://dl/business");
    }

    #[test]
    fn rejects_unknown_identifier() {
        let payload = [36u8, b'x'];
        assert!(UriFields::decode(&payload).is_err());
    }

    #[test]
    fn rejects_invalid_utf8_tail() {
        let payload = [0u8, 0xff, 0xfe];
        assert!(UriFields::decode(&payload).is_err());
    }

    #[test]
    fn encode_picks_longest_prefix() {
        let rec = new_record("https://www.example.com");
        assert_eq!(rec.payload()[0], 2); // "https://www." beats "https://"
        assert_eq!(&rec.payload()[1..], b"example.com");
    }

    #[test]
    fn encode_round_trips() {
        let rec = new_record("weixin://dl/business");
        let bytes = rec.to_buffer(RecordFlags::MB | RecordFlags::ME).unwrap();
        let expect = "d10115550077656978696e3a2f2f646c2f627573696e657373";
        assert_eq!(expect, hex::encode(bytes));
    }
}
