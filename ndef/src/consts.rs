use bitflags::bitflags;

/// The `TNF` enum represents the Type Name Format (TNF) field in an NDEF record.
/// Each variant corresponds to a specific TNF value as defined by the NDEF specification.
///
/// Variants:
/// - `Empty`: Indicates an empty record (0x00).
/// - `WellKnown`: Indicates a well-known record type (0x01).
/// - `MimeMedia`: Indicates a MIME media record type (0x02).
/// - `AbsoluteUri`: Indicates an absolute URI record type (0x03).
/// - `External`: Indicates an external record type (0x04).
/// - `Unknown`: Indicates an unknown record type (0x05).
/// - `Unchanged`: Indicates an unchanged record type (0x06).
/// - `Reserved`: Reserved for future use (0x07).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr)]
#[repr(u8)]
pub enum TNF {
    Empty = 0x00,
    WellKnown = 0x01,
    MimeMedia = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
    Reserved = 0x07,
}

impl TNF {
    /// Maps an on-the-wire TNF nibble to a `TNF`. All bit patterns are
    /// representable (the field is 3 bits, 0..=7), so this never fails.
    pub fn from_header_byte(hdr: u8) -> TNF {
        TNF::from_repr(hdr & TNF_MASK).unwrap_or(TNF::Unknown)
    }
}

/// Record Type Definition: the well-known schema a record's payload follows,
/// or `Unknown` for anything the codec doesn't have a typed decoder for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RTD {
    #[default]
    Unknown,
    Uri,
    Text,
    SmartPoster,
}

bitflags! {
    /// Flag bits carried in byte 0 of an NDEF record header. Serializable
    /// because the `serde` feature of `bitflags` is enabled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RecordFlags: u8 {
        /// Message Begin - set on the first record of a message.
        const MB = 0x80;
        /// Message End - set on the last record of a message.
        const ME = 0x40;
        /// Chunk Flag - marks a record as a fragment of a chunked record.
        const CF = 0x20;
        /// Short Record - payload length is encoded in a single byte.
        const SR = 0x10;
        /// ID Length present - an ID_LENGTH byte and ID field follow.
        const IL = 0x08;
    }
}

pub const TNF_MASK: u8 = 0x07;

/// Well-known record type byte strings.
pub const RTD_URI: &str = "U";
pub const RTD_TEXT: &str = "T";
pub const RTD_SMART_POSTER: &str = "Sp";

/// SmartPoster local well-known record types (NFCForum-SmartPoster_RTD_1.0 section 3.3).
pub const SP_TYPE_ACT: &[u8] = b"act";
pub const SP_TYPE_SIZE: &[u8] = b"s";
pub const SP_TYPE_TYPE: &[u8] = b"t";

/// Status byte layout for the Text RTD.
pub const TEXT_STATUS_LANG_LEN_MASK: u8 = 0x3f;
pub const TEXT_STATUS_UTF16: u8 = 0x80;

/// UTF-16 byte order marks.
pub const UTF16_BOM_BE: [u8; 2] = [0xfe, 0xff];
pub const UTF16_BOM_LE: [u8; 2] = [0xff, 0xfe];

/// Overflow guard from the wire format: PAYLOAD_LENGTH must never reach 2^31.
pub const MAX_PAYLOAD_LENGTH: u64 = 0x8000_0000;

/// TLV tags recognized on Type 2/4 tag memory (NFC Forum Type 2/4 Tag
/// Operation spec). Only NULL/NDEF_MESSAGE/TERMINATOR are consumed by
/// `TlvIterator`; LockControl/MemoryControl/Proprietary are carried so the
/// tag-memory builder can round-trip the blocks the original C library
/// could also emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::FromRepr)]
#[repr(u8)]
pub enum TlvTag {
    Null = 0x00,
    LockControl = 0x01,
    MemoryControl = 0x02,
    NdefMessage = 0x03,
    Proprietary = 0xfd,
    Terminator = 0xfe,
}

/// URI Record prefix table (NFCForum-RTD_URI_1.0, Table 3).
/// Index 0 carries no prefix; identifiers above 35 are invalid.
pub const URI_PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];
