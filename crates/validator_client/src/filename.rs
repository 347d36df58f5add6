use regex::Regex;

/// The server's own fallback name; used when no usable header is present.
pub const DEFAULT_RESULT_NAME: &str = "result.xlsx";

/// Derive the destination filename from a `Content-Disposition` header,
/// with or without quotes around the name.
pub fn result_filename(content_disposition: Option<&str>) -> String {
    let pattern = Regex::new(r#"filename="?([^"]+)"?"#).expect("filename pattern");
    content_disposition
        .and_then(|header| pattern.captures(header))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_owned())
        .unwrap_or_else(|| DEFAULT_RESULT_NAME.to_owned())
}
