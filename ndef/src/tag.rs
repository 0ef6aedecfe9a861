//! Type 2 Tag memory layout: capability container + a sequence of TLV
//! blocks. Generalized from the teacher's `tag.rs` to the tag set `tlv.rs`
//! iterates over, and to build values via `message::NdefMessage` directly.

use crate::consts::TlvTag;
use crate::error::NdefError;
use crate::message::NdefMessage;
use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

/// One TLV block destined for tag memory.
#[derive(Debug, Clone)]
pub struct TlvValue {
    tag: TlvTag,
    value: Option<Vec<u8>>,
}

impl TlvValue {
    pub fn terminator() -> Self {
        Self { tag: TlvTag::Terminator, value: None }
    }

    pub fn null() -> Self {
        Self { tag: TlvTag::Null, value: None }
    }

    pub fn lock_control(value: &[u8]) -> Self {
        Self { tag: TlvTag::LockControl, value: Some(value.to_vec()) }
    }

    pub fn memory_control(value: &[u8]) -> Self {
        Self { tag: TlvTag::MemoryControl, value: Some(value.to_vec()) }
    }

    pub fn proprietary(value: &[u8]) -> Self {
        Self { tag: TlvTag::Proprietary, value: Some(value.to_vec()) }
    }

    pub fn message(value: &[u8]) -> Self {
        Self { tag: TlvTag::NdefMessage, value: Some(value.to_vec()) }
    }

    pub fn ndef_message(message: &NdefMessage) -> anyhow::Result<Self> {
        Ok(Self::message(&message.to_buffer()?))
    }

    fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let mut out = Vec::new();
        out.write_u8(self.tag as u8)?;
        match &self.value {
            None => {}
            Some(value) if value.is_empty() => out.write_u8(0x00)?,
            Some(value) if value.len() < 0xff => {
                out.write_u8(value.len() as u8)?;
                out.write_all(value)?;
            }
            Some(value) => {
                out.write_u8(0xff)?;
                out.write_u16::<BigEndian>(value.len() as u16)?;
                out.write_all(value)?;
            }
        }
        Ok(out)
    }
}

/// Type 2 Tag memory: a 4-byte Capability Container followed by TLV blocks.
pub struct NfcType2Tag {
    cc: [u8; 4],
    tlvs: Vec<TlvValue>,
}

impl NfcType2Tag {
    pub fn builder() -> TagBuilder {
        TagBuilder::new()
    }

    pub fn capacity_in_bytes(&self) -> u16 {
        self.cc[2] as u16 * 8
    }

    pub fn capacity(&self) -> u8 {
        self.cc[2]
    }

    pub fn version(&self) -> u8 {
        self.cc[1]
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, NdefError> {
        if self.capacity_in_bytes() > 2048 {
            return Err(anyhow::anyhow!("capability container claims more than 2048 bytes").into());
        }
        let mut buffer = Vec::new();
        for tlv in &self.tlvs {
            buffer.extend(tlv.to_bytes().map_err(NdefError::Other)?);
        }
        if self.capacity_in_bytes() < buffer.len() as u16 {
            return Err(anyhow::anyhow!("tag memory size too small for TLV content").into());
        }
        let mut out = self.cc.to_vec();
        out.extend(buffer);
        Ok(out)
    }
}

pub struct TagBuilder {
    nfc_header: u8,
    nfc_version: u8,
    memory_size: u8,
    access: u8,
    tlvs: Vec<TlvValue>,
}

impl TagBuilder {
    fn new() -> Self {
        Self { nfc_header: 0xe1, nfc_version: 0x10, memory_size: 0x00, access: 0x0f, tlvs: vec![] }
    }

    pub fn size_in_bytes(mut self, num_of_bytes: u16) -> Self {
        let n = (num_of_bytes - 1) / 8;
        self.memory_size = n as u8 + 1;
        self
    }

    pub fn size_in_8bytes(mut self, num_of_8bytes: u8) -> Self {
        self.memory_size = num_of_8bytes;
        self
    }

    pub fn access(mut self, read: u8, write: u8) -> Self {
        self.access = (read << 4) | write;
        self
    }

    pub fn add_tlv(mut self, value: TlvValue) -> Self {
        self.tlvs.push(value);
        self
    }

    pub fn build(self) -> NfcType2Tag {
        NfcType2Tag {
            cc: [self.nfc_header, self.nfc_version, self.memory_size, self.access],
            tlvs: self.tlvs,
        }
    }
}
