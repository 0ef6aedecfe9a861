//! The well-known SmartPoster RTD ("Sp"): a payload that is itself a
//! nested NDEF message carrying a required URI record plus optional
//! title(s), recommended action, size, MIME type, and icon (spec §4.7).

use crate::consts::{RecordFlags, RTD_SMART_POSTER, SP_TYPE_ACT, SP_TYPE_SIZE, SP_TYPE_TYPE, TNF};
use crate::error::NdefError;
use crate::locale::LocaleProvider;
use crate::mediatype;
use crate::message::decode_records;
use crate::record::{NdefRecord, RecordBuilder, RecordKind};
use crate::text::{self, TextEncoding};
use byteorder::{BigEndian, ByteOrder};

/// The recommended action a SmartPoster's "act" child record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpAction {
    /// No "act" record present.
    #[default]
    Default,
    Open,
    Save,
    Edit,
}

impl SpAction {
    fn to_byte(self) -> Option<u8> {
        match self {
            SpAction::Default => None,
            SpAction::Open => Some(0),
            SpAction::Save => Some(1),
            SpAction::Edit => Some(2),
        }
    }

    fn from_byte(byte: u8) -> Option<SpAction> {
        match byte {
            0 => Some(SpAction::Open),
            1 => Some(SpAction::Save),
            2 => Some(SpAction::Edit),
            _ => None,
        }
    }
}

/// An icon or other binary asset embedded as a MediaType child record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefMedia {
    pub type_: String,
    pub data: Vec<u8>,
}

/// Decoded/composed contents of a SmartPoster record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartPosterFields {
    uri: String,
    title: Option<String>,
    title_lang: Option<String>,
    type_: Option<String>,
    size: u32,
    act: SpAction,
    icon: Option<NdefMedia>,
}

impl NdefMedia {
    /// Parses `type_` as a `mime::Mime`, for callers that prefer a typed
    /// media type over the raw string. Mirrors the teacher crate's
    /// optional `mime` integration on its payload types.
    #[cfg(feature = "mime")]
    pub fn mime_type(&self) -> Option<mime::Mime> {
        self.type_.parse().ok()
    }

    #[cfg(feature = "mime")]
    pub fn from_mime(mime_type: mime::Mime, data: Vec<u8>) -> Self {
        Self { type_: mime_type.essence_str().to_string(), data }
    }
}

impl SmartPosterFields {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn title_lang(&self) -> Option<&str> {
        self.title_lang.as_deref()
    }

    pub fn media_type(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn action(&self) -> SpAction {
        self.act
    }

    pub fn icon(&self) -> Option<&NdefMedia> {
        self.icon.as_ref()
    }

    /// Re-parses `payload` as a nested NDEF message and pulls out the
    /// recognized children. The only hard failure is a missing or
    /// duplicate URI record (spec §4.7); every other child that doesn't
    /// parse or doesn't match an expected shape is skipped with a
    /// warning, exactly like top-level decode never aborting (§7).
    pub(crate) fn decode(payload: &[u8]) -> Result<SmartPosterFields, NdefError> {
        let children = decode_records(payload);

        let mut uri: Option<String> = None;
        let mut titles: Vec<(usize, crate::text::TextFields)> = Vec::new();
        let mut type_: Option<String> = None;
        let mut size: u32 = 0;
        let mut act = SpAction::Default;
        let mut icon: Option<NdefMedia> = None;

        for (index, child) in children.iter().enumerate() {
            match child.tnf() {
                TNF::WellKnown if child.record_type() == crate::consts::RTD_URI.as_bytes() => {
                    let Some(fields) = child.uri() else {
                        log::warn!("SmartPoster URI child failed to decode");
                        continue;
                    };
                    if uri.is_some() {
                        return Err(NdefError::InvalidSmartPoster);
                    }
                    uri = Some(fields.uri().to_string());
                }
                TNF::WellKnown if child.record_type() == crate::consts::RTD_TEXT.as_bytes() => {
                    match child.text() {
                        Some(fields) => titles.push((index, fields.clone())),
                        None => log::warn!("SmartPoster title child failed to decode"),
                    }
                }
                TNF::WellKnown if child.record_type() == SP_TYPE_ACT => {
                    if child.payload().len() == 1 && act == SpAction::Default {
                        match SpAction::from_byte(child.payload()[0]) {
                            Some(value) => act = value,
                            None => log::warn!("SmartPoster act child has unrecognized value"),
                        }
                    }
                }
                TNF::WellKnown if child.record_type() == SP_TYPE_SIZE => {
                    if child.payload().len() == 4 && size == 0 {
                        size = BigEndian::read_u32(child.payload());
                    }
                }
                TNF::WellKnown if child.record_type() == SP_TYPE_TYPE => {
                    if type_.is_none() && mediatype::valid(child.payload(), false) {
                        if let Ok(s) = std::str::from_utf8(child.payload()) {
                            type_ = Some(s.to_string());
                        }
                    }
                }
                TNF::MimeMedia => {
                    if icon.is_none() && !child.payload().is_empty() && mediatype::valid(child.record_type(), false) {
                        if let Ok(mime) = std::str::from_utf8(child.record_type()) {
                            if mime.starts_with("image/") || mime.starts_with("video/") {
                                icon = Some(NdefMedia { type_: mime.to_string(), data: child.payload().to_vec() });
                            }
                        }
                    }
                }
                _ => log::warn!("unsupported SmartPoster child record, tnf={:?}", child.tnf()),
            }
        }

        let uri = uri.ok_or(NdefError::InvalidSmartPoster)?;

        // Stable sort on score alone preserves original chain order for ties.
        let (title, title_lang) = select_title(titles);

        Ok(SmartPosterFields { uri, title, title_lang, type_, size, act, icon })
    }

    /// Builds a complete SmartPoster record (TNF=WellKnown, type "Sp").
    /// `lang` is passed straight to the title's Text child; when `None`
    /// and a title is present, `locale` supplies the default the way
    /// `text::new_record` would for a standalone Text record.
    #[allow(clippy::too_many_arguments)]
    pub fn compose(
        uri: &str,
        title: Option<&str>,
        lang: Option<&str>,
        type_: Option<&str>,
        size: u32,
        act: SpAction,
        icon: Option<&NdefMedia>,
        locale: &dyn LocaleProvider,
    ) -> Result<NdefRecord, NdefError> {
        let mut children = vec![crate::uri::new_record(uri)];

        if let Some(title) = title {
            children.push(text::new_record(Some(title), lang, TextEncoding::Utf8, locale));
        }
        if let Some(byte) = act.to_byte() {
            children.push(
                RecordBuilder::default().tnf(TNF::WellKnown).record_type(SP_TYPE_ACT.to_vec()).payload(vec![byte]).build()?,
            );
        }
        if size != 0 {
            let mut bytes = [0u8; 4];
            BigEndian::write_u32(&mut bytes, size);
            children.push(
                RecordBuilder::default()
                    .tnf(TNF::WellKnown)
                    .record_type(SP_TYPE_SIZE.to_vec())
                    .payload(bytes.to_vec())
                    .build()?,
            );
        }
        if let Some(type_) = type_ {
            if !mediatype::valid_str(type_, false) {
                return Err(NdefError::InvalidMediaType);
            }
            children.push(
                RecordBuilder::default()
                    .tnf(TNF::WellKnown)
                    .record_type(SP_TYPE_TYPE.to_vec())
                    .payload(type_.as_bytes().to_vec())
                    .build()?,
            );
        }
        if let Some(icon) = icon {
            children.push(NdefRecord::new_media(icon.type_.as_bytes(), &icon.data)?);
        }

        let mut payload = Vec::new();
        let last = children.len().saturating_sub(1);
        for (index, child) in children.iter().enumerate() {
            let mut flags = RecordFlags::empty();
            if index == 0 {
                flags |= RecordFlags::MB;
            }
            if index == last {
                flags |= RecordFlags::ME;
            }
            payload.extend(child.to_buffer(flags)?);
        }

        let fields = SmartPosterFields {
            uri: uri.to_string(),
            title: title.map(str::to_string),
            title_lang: title.map(|_| {
                lang.map(str::to_string).unwrap_or_else(|| {
                    locale
                        .system_language()
                        .map(|l| match l.territory {
                            Some(t) => format!("{}-{}", l.language, t),
                            None => l.language,
                        })
                        .unwrap_or_else(|| "en".to_string())
                })
            }),
            type_: type_.map(str::to_string),
            size,
            act,
            icon: icon.cloned(),
        };

        Ok(NdefRecord::from_parts(
            TNF::WellKnown,
            RecordFlags::MB | RecordFlags::ME,
            RTD_SMART_POSTER.as_bytes().to_vec(),
            Vec::new(),
            payload,
            RecordKind::SmartPoster(Box::new(fields)),
        ))
    }
}

/// Picks the best-matching title among candidates for the host's language,
/// falling back to the first title in chain order when there is no host
/// language preference or no candidate matches it at all. Rust's
/// `sort_by_key` is a stable sort, so candidates tied on score keep their
/// original (chain) order without extra bookkeeping.
fn select_title(mut titles: Vec<(usize, crate::text::TextFields)>) -> (Option<String>, Option<String>) {
    if titles.is_empty() {
        return (None, None);
    }
    if titles.len() > 1 {
        if let Some(lang) = crate::locale::HostLocale.system_language() {
            titles.sort_by_key(|(_, fields)| std::cmp::Reverse(fields.lang_match(&lang).score()));
        }
    }
    let (_, fields) = titles.into_iter().next().expect("checked non-empty above");
    (Some(fields.text().to_string()), Some(fields.lang().to_string()))
}
