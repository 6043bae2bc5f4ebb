use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use engine_logging::engine_info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
}

/// Turn a fetched page into text: BOM, then the Content-Type charset, then
/// chardetng's guess. Malformed sequences become U+FFFD; the page is still
/// usable for link extraction, so this never fails.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        engine_info!("Page is not valid {}, replaced malformed bytes", used.name());
    }
    DecodedPage {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
    }
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Some(value.trim().trim_matches(['"', '\'']).to_string())
    })
}
