//! The well-known Text RTD ("T"): a status byte (language length + UTF-8/
//! UTF-16 selector), a language tag, and the text itself.

use crate::consts::{
    RecordFlags, RTD_TEXT, TEXT_STATUS_LANG_LEN_MASK, TEXT_STATUS_UTF16, TNF, UTF16_BOM_BE, UTF16_BOM_LE,
};
use crate::error::NdefError;
use crate::locale::NdefLanguage;
use crate::record::{NdefRecord, RecordKind};

/// Text encoding chosen when composing a Text record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Be,
    Utf16Le,
}

/// Bitmask result of matching a Text record's language tag against a query
/// language. `Full` iff both halves match case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LangMatch(u8);

impl LangMatch {
    pub const NONE: LangMatch = LangMatch(0x00);
    pub const TERRITORY: LangMatch = LangMatch(0x01);
    pub const LANGUAGE: LangMatch = LangMatch(0x02);
    pub const FULL: LangMatch = LangMatch(0x03);

    pub fn score(self) -> u8 {
        self.0
    }

    fn union(self, other: LangMatch) -> LangMatch {
        LangMatch(self.0 | other.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFields {
    lang: String,
    text: String,
}

impl TextFields {
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn decode(payload: &[u8]) -> Result<TextFields, NdefError> {
        let status = *payload.first().ok_or(NdefError::InvalidText)?;
        let lang_len = (status & TEXT_STATUS_LANG_LEN_MASK) as usize;
        if 1 + lang_len > payload.len() {
            return Err(NdefError::InvalidText);
        }
        let lang_bytes = &payload[1..1 + lang_len];
        let lang = std::str::from_utf8(lang_bytes)
            .ok()
            .filter(|s| s.is_ascii())
            .ok_or(NdefError::InvalidText)?
            .to_string();

        let text_bytes = &payload[1 + lang_len..];
        let text = if status & TEXT_STATUS_UTF16 != 0 {
            decode_utf16(text_bytes)?
        } else {
            std::str::from_utf8(text_bytes).map_err(|_| NdefError::InvalidText)?.to_string()
        };

        Ok(TextFields { lang, text })
    }

    fn payload_bytes(text: &str, lang: &str, enc: TextEncoding) -> Vec<u8> {
        let lang_bytes = lang.as_bytes();
        let status = (lang_bytes.len() as u8 & TEXT_STATUS_LANG_LEN_MASK)
            | if enc == TextEncoding::Utf8 { 0 } else { TEXT_STATUS_UTF16 };

        let mut out = Vec::with_capacity(1 + lang_bytes.len() + text.len() * 2);
        out.push(status);
        out.extend_from_slice(lang_bytes);
        match enc {
            TextEncoding::Utf8 => out.extend_from_slice(text.as_bytes()),
            TextEncoding::Utf16Be => {
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
            TextEncoding::Utf16Le => {
                out.extend_from_slice(&UTF16_BOM_LE);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
        }
        out
    }

    /// Language match per spec §4.6: language and territory halves of
    /// `rec.lang` (split on `-`) compared case-insensitively, independently,
    /// against `query`.
    pub fn lang_match(&self, query: &NdefLanguage) -> LangMatch {
        let mut result = LangMatch::NONE;
        match self.lang.split_once('-') {
            Some((lang, territory)) => {
                if lang.eq_ignore_ascii_case(&query.language) {
                    result = result.union(LangMatch::LANGUAGE);
                }
                if let Some(q_territory) = &query.territory {
                    if territory.eq_ignore_ascii_case(q_territory) {
                        result = result.union(LangMatch::TERRITORY);
                    }
                }
            }
            None => {
                if self.lang.eq_ignore_ascii_case(&query.language) {
                    result = result.union(LangMatch::LANGUAGE);
                }
            }
        }
        result
    }
}

fn decode_utf16(bytes: &[u8]) -> Result<String, NdefError> {
    let (units, big_endian) = if bytes.starts_with(&UTF16_BOM_BE) {
        (&bytes[2..], true)
    } else if bytes.starts_with(&UTF16_BOM_LE) {
        (&bytes[2..], false)
    } else {
        (bytes, true) // "If the BOM is omitted, the byte order shall be big-endian"
    };
    if units.len() % 2 != 0 {
        return Err(NdefError::InvalidText);
    }
    let code_units: Vec<u16> = units
        .chunks_exact(2)
        .map(|pair| if big_endian { u16::from_be_bytes([pair[0], pair[1]]) } else { u16::from_le_bytes([pair[0], pair[1]]) })
        .collect();
    char::decode_utf16(code_units)
        .collect::<Result<String, _>>()
        .map_err(|_| NdefError::InvalidText)
}

/// Builds a complete Text record (TNF=WellKnown, type "T"). `lang` defaults
/// to the host locale's language (falling back to `"en"`) when `None`.
pub fn new_record(
    text: Option<&str>,
    lang: Option<&str>,
    enc: TextEncoding,
    locale: &dyn crate::locale::LocaleProvider,
) -> NdefRecord {
    let text = text.unwrap_or("");
    let owned_lang;
    let lang = match lang {
        Some(l) => l,
        None => {
            owned_lang = locale
                .system_language()
                .map(|l| match l.territory {
                    Some(t) => format!("{}-{}", l.language, t),
                    None => l.language,
                })
                .unwrap_or_else(|| "en".to_string());
            &owned_lang
        }
    };

    let payload = TextFields::payload_bytes(text, lang, enc);
    let fields = TextFields { lang: lang.to_string(), text: text.to_string() };
    NdefRecord::from_parts(
        TNF::WellKnown,
        RecordFlags::MB | RecordFlags::ME,
        RTD_TEXT.as_bytes().to_vec(),
        Vec::new(),
        payload,
        RecordKind::Text(fields),
    )
}
