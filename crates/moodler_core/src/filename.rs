use std::borrow::Cow;

/// Local filename for a resolved resource URL.
///
/// Takes the last `/`-delimited segment of `location`, percent-decodes it and
/// cuts it at the first `?`. Separators and control characters that decoding
/// may introduce become `_` so the name never escapes its directory.
/// Returns `None` when nothing usable is left.
pub fn filename_from_location(location: &str) -> Option<String> {
    let segment = location.rsplit('/').next().unwrap_or(location);
    let decoded = percent_decode(segment);
    let name = decoded.split('?').next().unwrap_or_default();

    let cleaned: String = name
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return None;
    }
    Some(cleaned)
}

fn percent_decode(segment: &str) -> Cow<'_, str> {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded,
        // Not UTF-8 once decoded; keep what we can.
        Err(_) => {
            let bytes = urlencoding::decode_binary(segment.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c, '/' | '\\' | '\0'..='\u{1F}')
}
