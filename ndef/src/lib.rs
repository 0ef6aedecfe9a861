
pub mod consts;
pub mod error;
pub mod header;
pub mod locale;
pub mod mediatype;
pub mod message;
pub mod record;
pub mod smartposter;
pub mod tag;
pub mod text;
pub mod tlv;
pub mod uri;

pub use consts::*;
pub use error::NdefError;
pub use locale::{HostLocale, LocaleProvider, NdefLanguage};
pub use message::NdefMessage;
pub use record::{NdefRecord, RecordBuilder, RecordKind};
pub use smartposter::{NdefMedia, SmartPosterFields, SpAction};
pub use tag::{NfcType2Tag, TagBuilder, TlvValue};
pub use text::{LangMatch, TextEncoding, TextFields};
pub use uri::UriFields;

pub type Result<T> = std::result::Result<T, error::NdefError>;
