//! End-to-end decode/encode scenarios, one per documented wire fixture.

use ndef_rs::{HostLocale, NdefMessage, RTD, SpAction, TNF};

/// Surfaces the crate's `log::debug!`/`log::warn!` diagnostics on stderr
/// when tests run with `RUST_LOG` set; safe to call from every test since
/// `try_init` is a no-op after the first successful call.
fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn s1_empty_block_decodes_to_empty_record() {
    init();
    let message = NdefMessage::decode([]);
    let records = message.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tnf(), TNF::Empty);
    assert_eq!(records[0].rtd(), RTD::Unknown);
    assert!(records[0].payload().is_empty());
}

#[test]
fn s2_short_utf8_text() {
    init();
    let block = hex::decode("d101105402656e6a6f6c6c612e77656c636f6d65").unwrap();
    let message = NdefMessage::decode(&block);
    let rec = &message.records()[0];
    assert_eq!(rec.tnf(), TNF::WellKnown);
    assert_eq!(rec.rtd(), RTD::Text);
    assert!(rec.flags().contains(ndef_rs::RecordFlags::MB | ndef_rs::RecordFlags::ME));
    let text = rec.text().unwrap();
    assert_eq!(text.lang(), "en");
    assert_eq!(text.text(), "jolla.welcome");
}

#[test]
fn s3_utf16be_text_without_bom() {
    init();
    let block = hex::decode("d101155482656e006f006d0070007200750073007300690061").unwrap();
    let message = NdefMessage::decode(&block);
    let text = message.records()[0].text().unwrap();
    assert_eq!(text.lang(), "en");
    assert_eq!(text.text(), "omprussia");
}

#[test]
fn s4_utf16le_text_with_bom() {
    init();
    let block = hex::decode("d101175482656efffe6f006d007000720075007300730069006100").unwrap();
    let message = NdefMessage::decode(&block);
    let text = message.records()[0].text().unwrap();
    assert_eq!(text.lang(), "en");
    assert_eq!(text.text(), "omprussia");
}

#[test]
fn s5_invalid_language_length_falls_back_to_generic() {
    init();
    let block = hex::decode("d101015401").unwrap();
    let message = NdefMessage::decode(&block);
    let rec = &message.records()[0];
    assert_eq!(rec.tnf(), TNF::WellKnown);
    assert_eq!(rec.record_type(), b"T");
    assert_eq!(rec.rtd(), RTD::Unknown);
}

#[test]
fn s6_tlv_containing_ndef_message() {
    init();
    let block = hex::decode("030491010078fe").unwrap();
    assert_eq!(ndef_rs::tlv::check(&block), block.len());
    let message = NdefMessage::decode_tlv(&block);
    assert_eq!(message.records().len(), 1);
    let rec = &message.records()[0];
    assert_eq!(rec.tnf(), TNF::WellKnown);
    assert_eq!(rec.record_type(), b"x");
    assert!(rec.payload().is_empty());
}

#[test]
fn s7_smart_poster_round_trip() {
    init();
    let rec = ndef_rs::SmartPosterFields::compose(
        "https://example",
        Some("Hi"),
        Some("en"),
        None,
        0,
        SpAction::Open,
        None,
        &HostLocale,
    )
    .unwrap();
    assert_eq!(rec.tnf(), TNF::WellKnown);
    assert_eq!(rec.record_type(), b"Sp");

    let sp = rec.smart_poster().unwrap();
    assert_eq!(sp.uri(), "https://example");
    assert_eq!(sp.title(), Some("Hi"));
    assert_eq!(sp.title_lang(), Some("en"));
    assert_eq!(sp.action(), SpAction::Open);
    assert_eq!(sp.size(), 0);
    assert!(sp.icon().is_none());

    // Re-decode from raw bytes to exercise the exact wire path.
    let bytes = rec.to_buffer(ndef_rs::RecordFlags::MB | ndef_rs::RecordFlags::ME).unwrap();
    let decoded = NdefMessage::decode(&bytes);
    let sp2 = decoded.records()[0].smart_poster().unwrap();
    assert_eq!(sp2.uri(), "https://example");
    assert_eq!(sp2.title(), Some("Hi"));
    assert_eq!(sp2.action(), SpAction::Open);
}

#[test]
fn s8_language_match() {
    init();
    use ndef_rs::{LangMatch, NdefLanguage};

    let rec = ndef_rs::text::new_record(Some("hi"), Some("en-US"), ndef_rs::TextEncoding::Utf8, &HostLocale);
    let text = rec.text().unwrap();

    let full = NdefLanguage { language: "EN".to_string(), territory: Some("US".to_string()) };
    assert_eq!(text.lang_match(&full), LangMatch::FULL);

    let language_only = NdefLanguage { language: "en".to_string(), territory: Some("BR".to_string()) };
    assert_eq!(text.lang_match(&language_only), LangMatch::LANGUAGE);

    let none = NdefLanguage { language: "ru".to_string(), territory: None };
    assert_eq!(text.lang_match(&none), LangMatch::NONE);
}

#[test]
fn invariant_chain_mb_me_exactly_first_and_last() {
    init();
    let records = vec![
        ndef_rs::uri::new_record("https://a.example"),
        ndef_rs::RecordBuilder::default()
            .tnf(TNF::External)
            .record_type(b"x.com:y".to_vec())
            .payload(b"z".to_vec())
            .build()
            .unwrap(),
        ndef_rs::uri::new_record("https://c.example"),
    ];
    let message = NdefMessage::from(records);
    let bytes = message.to_buffer().unwrap();
    let decoded = NdefMessage::decode(&bytes);
    let recs = decoded.records();
    assert_eq!(recs.len(), 3);
    assert!(recs[0].flags().contains(ndef_rs::RecordFlags::MB));
    assert!(!recs[0].flags().contains(ndef_rs::RecordFlags::ME));
    assert!(!recs[1].flags().contains(ndef_rs::RecordFlags::MB));
    assert!(!recs[1].flags().contains(ndef_rs::RecordFlags::ME));
    assert!(!recs[2].flags().contains(ndef_rs::RecordFlags::MB));
    assert!(recs[2].flags().contains(ndef_rs::RecordFlags::ME));
}

#[test]
fn invariant_valid_mediatype_wildcard_rules() {
    init();
    assert!(ndef_rs::mediatype::valid_str("image/png", false));
    assert!(ndef_rs::mediatype::valid_str("*/*", true));
    assert!(!ndef_rs::mediatype::valid_str("*/*", false));
}
