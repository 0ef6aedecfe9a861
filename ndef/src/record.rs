//! The base record value: raw header fields (TNF, flags) plus owned type/
//! id/payload slices, refined by a `RecordKind` carrying the typed view for
//! the three well-known RTDs this crate decodes (spec §3's "tagged variant,
//! not an inheritance chain" design note).

use crate::consts::{RecordFlags, RTD_SMART_POSTER, RTD_TEXT, RTD_URI, TNF};
use crate::error::NdefError;
use crate::header;
use crate::mediatype;
use crate::smartposter::SmartPosterFields;
use crate::text::TextFields;
use crate::uri::UriFields;

/// The RTD-specific refinement of an `NdefRecord`. `Unknown`/`Generic`
/// covers every record the codec doesn't have a typed decoder for,
/// including well-known records whose type matched but whose payload
/// failed to parse (§7: per-record failures fall back to generic, they
/// never abort the message decode).
#[derive(Debug, Clone)]
pub enum RecordKind {
    Generic,
    Uri(UriFields),
    Text(TextFields),
    SmartPoster(Box<SmartPosterFields>),
}

/// An NDEF record: header fields plus type/id/payload and, for recognized
/// well-known types, a decoded `RecordKind`.
#[derive(Debug, Clone)]
pub struct NdefRecord {
    tnf: TNF,
    flags: RecordFlags,
    type_: Vec<u8>,
    id: Vec<u8>,
    payload: Vec<u8>,
    kind: RecordKind,
}

impl NdefRecord {
    pub fn tnf(&self) -> TNF {
        self.tnf
    }

    pub fn rtd(&self) -> crate::consts::RTD {
        use crate::consts::RTD;
        match &self.kind {
            RecordKind::Generic => RTD::Unknown,
            RecordKind::Uri(_) => RTD::Uri,
            RecordKind::Text(_) => RTD::Text,
            RecordKind::SmartPoster(_) => RTD::SmartPoster,
        }
    }

    pub fn flags(&self) -> RecordFlags {
        self.flags
    }

    pub fn record_type(&self) -> &[u8] {
        &self.type_
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    pub fn uri(&self) -> Option<&UriFields> {
        match &self.kind {
            RecordKind::Uri(f) => Some(f),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&TextFields> {
        match &self.kind {
            RecordKind::Text(f) => Some(f),
            _ => None,
        }
    }

    pub fn smart_poster(&self) -> Option<&SmartPosterFields> {
        match &self.kind {
            RecordKind::SmartPoster(f) => Some(f),
            _ => None,
        }
    }

    pub(crate) fn from_parts(
        tnf: TNF,
        flags: RecordFlags,
        type_: Vec<u8>,
        id: Vec<u8>,
        payload: Vec<u8>,
        kind: RecordKind,
    ) -> Self {
        Self { tnf, flags, type_, id, payload, kind }
    }

    /// Dispatches on TNF + type to a typed decoder; falls back to
    /// `RecordKind::Generic` carrying the raw type/id/payload when the TNF
    /// isn't `WellKnown`, the type doesn't match one of the three RTDs, or
    /// the typed decoder rejects the payload.
    pub(crate) fn decode_one(data: &header::NdefData, record_bytes: &[u8]) -> NdefRecord {
        let type_ = record_bytes[data.type_offset..data.type_offset + data.type_length].to_vec();
        let id_start = data.type_offset + data.type_length;
        let id = record_bytes[id_start..id_start + data.id_length].to_vec();
        let payload_start = id_start + data.id_length;
        let payload = record_bytes[payload_start..payload_start + data.payload_length].to_vec();

        if data.tnf == TNF::WellKnown {
            if type_ == RTD_URI.as_bytes() {
                if let Ok(fields) = UriFields::decode(&payload) {
                    log::debug!("decoded URI record: {}", fields.full_uri());
                    return Self::from_parts(data.tnf, data.flags, type_, id, payload, RecordKind::Uri(fields));
                }
            } else if type_ == RTD_TEXT.as_bytes() {
                if let Ok(fields) = TextFields::decode(&payload) {
                    log::debug!("decoded Text record: lang={} text={}", fields.lang(), fields.text());
                    return Self::from_parts(data.tnf, data.flags, type_, id, payload, RecordKind::Text(fields));
                }
                log::warn!("Text record payload failed to decode, falling back to generic");
            } else if type_ == RTD_SMART_POSTER.as_bytes() {
                match SmartPosterFields::decode(&payload) {
                    Ok(fields) => {
                        log::debug!("decoded SmartPoster record: uri={}", fields.uri());
                        return Self::from_parts(
                            data.tnf,
                            data.flags,
                            type_,
                            id,
                            payload,
                            RecordKind::SmartPoster(Box::new(fields)),
                        );
                    }
                    Err(e) => log::warn!("SmartPoster record failed to decode: {e}"),
                }
            }
        }

        Self::from_parts(data.tnf, data.flags, type_, id, payload, RecordKind::Generic)
    }

    /// Serializes the record to wire bytes, using `flags` in place of
    /// whatever MB/ME the record carried when decoded (the message
    /// assembler always recomputes MB/ME from record position).
    pub fn to_buffer(&self, flags: RecordFlags) -> Result<Vec<u8>, NdefError> {
        let id_len = if self.id.is_empty() && !self.flags.contains(RecordFlags::IL) {
            None
        } else {
            Some(self.id.len())
        };
        let mut out = header::encode(self.tnf, flags, self.type_.len(), id_len, self.payload.len())?;
        out.extend_from_slice(&self.type_);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.payload);
        Ok(out)
    }

    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    /// `MessageCodec::new_media`: builds a TNF=MediaType record. `type_`
    /// must validate as a media type without wildcards.
    pub fn new_media(type_: &[u8], payload: &[u8]) -> Result<NdefRecord, NdefError> {
        if !mediatype::valid(type_, false) {
            return Err(NdefError::InvalidMediaType);
        }
        RecordBuilder::default()
            .tnf(TNF::MimeMedia)
            .record_type(type_.to_vec())
            .payload(payload.to_vec())
            .build()
    }
}

/// General-purpose builder for records the typed constructors don't cover
/// (External, MediaType, and ad-hoc well-known local types used while
/// composing a SmartPoster).
pub struct RecordBuilder {
    tnf: TNF,
    type_: Vec<u8>,
    id: Vec<u8>,
    payload: Vec<u8>,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self { tnf: TNF::Empty, type_: Vec::new(), id: Vec::new(), payload: Vec::new() }
    }
}

impl RecordBuilder {
    pub fn tnf(mut self, tnf: TNF) -> Self {
        self.tnf = tnf;
        self
    }

    pub fn record_type(mut self, type_: impl Into<Vec<u8>>) -> Self {
        self.type_ = type_.into();
        self
    }

    pub fn id(mut self, id: impl Into<Vec<u8>>) -> Self {
        self.id = id.into();
        self
    }

    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn build(self) -> Result<NdefRecord, NdefError> {
        if self.type_.len() > 0xff {
            return Err(NdefError::EncodeOverflow);
        }
        if self.payload.len() as u64 > u32::MAX as u64 {
            return Err(NdefError::EncodeOverflow);
        }
        Ok(NdefRecord {
            tnf: self.tnf,
            flags: RecordFlags::MB | RecordFlags::ME,
            type_: self.type_,
            id: self.id,
            payload: self.payload,
            kind: RecordKind::Generic,
        })
    }
}
