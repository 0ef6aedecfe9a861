//! Splits a byte block into a sequence of records and reassembles a
//! sequence of records back into wire bytes, maintaining the MB/ME
//! invariants of spec §3 and §8 invariant 3. An owned `Vec<NdefRecord>`
//! stands in for the source's next-pointer chain (spec §9: "an equivalent
//! ordered sequence is acceptable provided order and streaming construction
//! are preserved").

use crate::consts::RecordFlags;
use crate::error::NdefError;
use crate::header;
use crate::record::{NdefRecord, RecordKind};
use crate::tlv::{self, TlvIterator};

#[derive(Debug, Clone, Default)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl From<NdefRecord> for NdefMessage {
    fn from(record: NdefRecord) -> Self {
        Self { records: vec![record] }
    }
}

impl From<Vec<NdefRecord>> for NdefMessage {
    fn from(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }
}

impl NdefMessage {
    pub fn add_record(&mut self, record: NdefRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<NdefRecord> {
        self.records
    }

    /// Reassembles the message, recomputing MB/ME for every record from its
    /// position (first gets MB, last gets ME, a single record gets both).
    pub fn to_buffer(&self) -> Result<Vec<u8>, NdefError> {
        let mut buffer = Vec::new();
        let last_index = self.records.len().saturating_sub(1);
        for (index, record) in self.records.iter().enumerate() {
            let mut flags = RecordFlags::empty();
            if index == 0 {
                flags |= RecordFlags::MB;
            }
            if index == last_index {
                flags |= RecordFlags::ME;
            }
            buffer.extend(record.to_buffer(flags)?);
        }
        Ok(buffer)
    }

    /// Splits `block` into a sequence of records.
    ///
    /// An empty block decodes to a single TNF=Empty/RTD=Unknown record
    /// (spec §4.4, scenario S1). Chunked records (CF set) are skipped with
    /// a warning — unsupported per spec §1's Non-goals. Parsing stops at
    /// the first malformed header; whatever was already decoded is
    /// returned rather than discarded, since decoding never aborts (§7).
    pub fn decode<T: AsRef<[u8]>>(block: T) -> NdefMessage {
        NdefMessage { records: decode_records(block.as_ref()) }
    }

    /// Iterates TLV blocks in `buf`, decoding every NDEF_MESSAGE block found
    /// and concatenating the resulting records.
    pub fn decode_tlv(buf: &[u8]) -> NdefMessage {
        let mut records = Vec::new();
        let mut it = TlvIterator::new(buf);
        while let Some((tag, value)) = it.next() {
            if tag == tlv::TAG_NDEF_MESSAGE {
                log::debug!("TLV NDEF_MESSAGE block, {} bytes", value.len());
                records.extend(decode_records(value));
            }
        }
        NdefMessage { records }
    }

    /// Builds a single TNF=MediaType record wrapped in a message.
    pub fn new_media(type_: &[u8], payload: &[u8]) -> Result<NdefMessage, NdefError> {
        Ok(NdefMessage::from(NdefRecord::new_media(type_, payload)?))
    }
}

/// Shared by `NdefMessage::decode` and SmartPoster decomposition (the
/// payload of an "Sp" record is itself an NDEF message).
pub(crate) fn decode_records(block: &[u8]) -> Vec<NdefRecord> {
    if block.is_empty() {
        log::debug!("empty NDEF block");
        return vec![NdefRecord::from_parts(
            crate::consts::TNF::Empty,
            RecordFlags::MB | RecordFlags::ME,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            RecordKind::Generic,
        )];
    }

    let mut records = Vec::new();
    let mut cursor = block;
    while !cursor.is_empty() {
        let data = match header::parse(cursor) {
            Ok(data) => data,
            Err(_) => {
                log::warn!("malformed record header, stopping decode");
                break;
            }
        };
        let record_bytes = &cursor[..data.total_len];
        if data.flags.contains(RecordFlags::CF) {
            log::warn!("chunked records are not supported, skipping");
        } else {
            records.push(NdefRecord::decode_one(&data, record_bytes));
        }
        cursor = &cursor[data.total_len..];
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TNF;

    #[test]
    fn empty_block_decodes_to_empty_record() {
        let message = NdefMessage::decode([]);
        assert_eq!(message.records().len(), 1);
        let rec = &message.records()[0];
        assert_eq!(rec.tnf(), TNF::Empty);
        assert_eq!(rec.rtd(), crate::consts::RTD::Unknown);
        assert!(rec.payload().is_empty());
    }

    #[test]
    fn multiple_records_round_trip() {
        let record1 = crate::uri::new_record("weixin://dl/business");
        let record2 = crate::record::NdefRecord::builder()
            .tnf(TNF::External)
            .record_type(b"android.com:pkg".to_vec())
            .payload(b"com.tencent.mm".to_vec())
            .build()
            .unwrap();
        let message = NdefMessage::from(vec![record1, record2]);
        assert_eq!(message.records().len(), 2);
        let buffer = message.to_buffer().unwrap();
        let expect = "910115550077656978696e3a2f2f646c2f627573696e657373540f0e616e64726f69642e636f6d3a706b67636f6d2e74656e63656e742e6d6d";
        assert_eq!(expect, hex::encode(&buffer));

        let decoded = NdefMessage::decode(&buffer);
        assert_eq!(decoded.records().len(), 2);
        assert_eq!(decoded.records()[0].uri().unwrap().uri(), "weixin://dl/business");
        assert_eq!(decoded.records()[1].payload(), b"com.tencent.mm");
    }

    #[test]
    fn malformed_text_record_falls_back_to_generic() {
        // S5: language length claims 1 byte but none follows.
        let block = hex::decode("d1010154 01".replace(' ', "")).unwrap();
        let message = NdefMessage::decode(&block);
        assert_eq!(message.records().len(), 1);
        let rec = &message.records()[0];
        assert_eq!(rec.tnf(), TNF::WellKnown);
        assert_eq!(rec.record_type(), b"T");
        assert_eq!(rec.rtd(), crate::consts::RTD::Unknown);
    }

    #[test]
    fn decode_tlv_finds_ndef_message() {
        // tag(03) len(04) value(91 01 00 78) terminator(fe): a single
        // WellKnown/SR record with type "x" and an empty payload.
        let block = hex::decode("030491010078fe").unwrap();
        let message = NdefMessage::decode_tlv(&block);
        assert_eq!(message.records().len(), 1);
        let rec = &message.records()[0];
        assert_eq!(rec.record_type(), b"x");
        assert!(rec.payload().is_empty());
    }
}
