//! Record header encode/decode: the MB|ME|CF|SR|IL|TNF byte, TYPE_LENGTH,
//! short-or-long PAYLOAD_LENGTH, and the optional ID_LENGTH. This is the
//! bit-level layer `record.rs` builds typed records on top of.

use crate::consts::{RecordFlags, TNF, TNF_MASK, MAX_PAYLOAD_LENGTH};
use crate::error::NdefError;

/// A parsed header descriptor: offsets into the original slice plus the
/// three declared lengths. `total_len` is the number of bytes the record
/// occupies in the source block, header through payload inclusive.
#[derive(Debug, Clone, Copy)]
pub struct NdefData {
    pub tnf: TNF,
    pub flags: RecordFlags,
    pub type_offset: usize,
    pub type_length: usize,
    pub id_length: usize,
    pub payload_length: usize,
    pub total_len: usize,
}

/// Parses the header of a single record at the front of `block`.
///
/// Returns the descriptor on success. Fails if fewer than 3 bytes are
/// available, if the declared lengths overrun `block`, or if
/// `payload_length` reaches the 2^31 overflow guard. Arithmetic is carried
/// out in `u64` so the guard can be checked without truncation on 32-bit
/// targets.
pub fn parse(block: &[u8]) -> Result<NdefData, NdefError> {
    if block.len() < 3 {
        return Err(NdefError::MalformedHeader);
    }

    let hdr = block[0];
    let flags = RecordFlags::from_bits_truncate(hdr);
    let tnf = TNF::from_header_byte(hdr);
    let type_length = block[1] as usize;

    let mut offset = 2usize;
    let mut total_len: u64 = 1 + 1; // header + TYPE_LENGTH byte
    total_len += type_length as u64;

    let payload_length: u64;
    if flags.contains(RecordFlags::SR) {
        let byte = *block.get(offset).ok_or(NdefError::MalformedHeader)?;
        offset += 1;
        payload_length = byte as u64;
        total_len += 1 + payload_length;
    } else {
        if block.len() < offset + 4 {
            return Err(NdefError::MalformedHeader);
        }
        payload_length = u32::from_be_bytes([
            block[offset],
            block[offset + 1],
            block[offset + 2],
            block[offset + 3],
        ]) as u64;
        offset += 4;
        total_len += 4 + payload_length;
    }

    let mut id_length = 0usize;
    if flags.contains(RecordFlags::IL) {
        let byte = *block.get(offset).ok_or(NdefError::MalformedHeader)?;
        offset += 1;
        id_length = byte as usize;
        total_len += 1 + id_length as u64;
    }

    if payload_length >= MAX_PAYLOAD_LENGTH || total_len > block.len() as u64 {
        return Err(NdefError::MalformedHeader);
    }

    Ok(NdefData {
        tnf,
        flags,
        type_offset: offset,
        type_length,
        id_length,
        payload_length: payload_length as usize,
        total_len: total_len as usize,
    })
}

/// Builds the header + TYPE_LENGTH + PAYLOAD_LENGTH [+ ID_LENGTH] bytes for
/// a record carrying `type_len`-byte type and `payload_len`-byte payload.
/// `flags` supplies MB/ME/CF; SR and TNF are computed here. `id_len` is
/// `None` when the record has no ID field.
///
/// Fails (`EncodeOverflow`) if `type_len > 0xff`, or if `payload_len`
/// exceeds `u32::MAX` (checked explicitly so the guard holds even though
/// `usize` may already be 32 bits wide on some targets).
pub fn encode(
    tnf: TNF,
    mut flags: RecordFlags,
    type_len: usize,
    id_len: Option<usize>,
    payload_len: usize,
) -> Result<Vec<u8>, NdefError> {
    if type_len > 0xff {
        return Err(NdefError::EncodeOverflow);
    }
    if payload_len as u64 > u32::MAX as u64 {
        return Err(NdefError::EncodeOverflow);
    }
    if let Some(id_len) = id_len {
        if id_len > 0xff {
            return Err(NdefError::EncodeOverflow);
        }
    }

    let sr = payload_len <= 0xff;
    if sr {
        flags |= RecordFlags::SR;
    }
    if id_len.is_some() {
        flags |= RecordFlags::IL;
    }

    let mut hdr = flags.bits() & !TNF_MASK;
    hdr |= (tnf as u8) & TNF_MASK;

    let mut out = Vec::with_capacity(if sr { 3 } else { 6 } + if id_len.is_some() { 1 } else { 0 });
    out.push(hdr);
    out.push(type_len as u8);
    if sr {
        out.push(payload_len as u8);
    } else {
        out.extend_from_slice(&(payload_len as u32).to_be_bytes());
    }
    if let Some(id_len) = id_len {
        out.push(id_len as u8);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_record() {
        let block = hex::decode("d1010e5501737570776973646f6d2e636f6d").unwrap();
        let ndef = parse(&block).unwrap();
        assert_eq!(ndef.tnf, TNF::WellKnown);
        assert!(ndef.flags.contains(RecordFlags::MB | RecordFlags::ME | RecordFlags::SR));
        assert_eq!(ndef.type_length, 1);
        assert_eq!(ndef.payload_length, 0x0e);
        assert_eq!(ndef.id_length, 0);
        assert_eq!(ndef.total_len, block.len());
    }

    #[test]
    fn rejects_truncated_block() {
        assert!(parse(&[0xd1, 0x01]).is_err());
        assert!(parse(&[0xd1, 0x01, 0x05]).is_err());
    }

    #[test]
    fn rejects_overflowing_lengths() {
        // SR record claiming a payload longer than what's actually there.
        let block = [0xd1, 0x01, 0xff, b'U'];
        assert!(parse(&block).is_err());
    }

    #[test]
    fn round_trips_long_form() {
        let hdr = encode(TNF::External, RecordFlags::MB | RecordFlags::ME, 3, None, 300).unwrap();
        assert_eq!(hdr.len(), 6);
        assert_eq!(hdr[0] & RecordFlags::SR.bits(), 0);
        let mut block = hdr.clone();
        block.extend_from_slice(b"abc");
        block.extend(std::iter::repeat(0xab).take(300));
        let parsed = parse(&block).unwrap();
        assert_eq!(parsed.payload_length, 300);
        assert_eq!(parsed.type_length, 3);
    }
}
