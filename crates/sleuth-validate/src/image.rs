//! Image references: inline data URIs or remote http(s) URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use url::Url;

/// A validated image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Decoded bytes from a `data:image/...;base64,` URI
    Upload(ImageUpload),
    /// Remote image the provider fetches itself
    Remote(Url),
}

/// Raw image bytes plus their declared MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    mime: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Declared MIME type, e.g. `image/png`.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decoded payload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File extension derived from the MIME subtype, `jpg` when there is none.
    #[must_use]
    pub fn extension(&self) -> &str {
        let subtype = self.mime.split_once('/').map_or("", |(_, sub)| sub);
        // image/svg+xml -> svg
        let subtype = subtype.split('+').next().unwrap_or("");
        match subtype {
            "" | "jpeg" | "pjpeg" => "jpg",
            other => other,
        }
    }

    /// Multipart file name, e.g. `upload.png`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("upload.{}", self.extension())
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Parse a user-supplied image reference.
///
/// Data URIs are split on the first comma; the prefix must declare an
/// `image/*` MIME type and base64 encoding, and the payload must decode to at
/// least one and at most `max_bytes` bytes.
///
/// # Errors
/// Returns a human-readable message describing the first problem found.
pub fn parse_image_reference(value: &str, max_bytes: usize) -> Result<ImageSource, String> {
    let value = value.trim();
    if is_data_uri(value) {
        return parse_data_uri(value, max_bytes).map(ImageSource::Upload);
    }
    parse_http_url(value).map(ImageSource::Remote)
}

/// Whether `value` starts with a `data:` scheme, case-insensitively.
pub(crate) fn is_data_uri(value: &str) -> bool {
    value
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Parse an absolute http(s) URL with a host.
pub(crate) fn parse_http_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim())
        .map_err(|_| "Image must be a valid http(s) URL or an image data URI".to_string())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err("Image URL must use http or https".to_string());
    }
    Ok(url)
}

fn parse_data_uri(value: &str, max_bytes: usize) -> Result<ImageUpload, String> {
    let (prefix, payload) = value
        .split_once(',')
        .ok_or_else(|| "Image data URI is missing the ',' separator".to_string())?;

    // "data:image/png;base64"; the scheme is ASCII, so byte 5 is a char boundary
    let mut params = prefix[5..].split(';');
    let mime = params.next().unwrap_or("").trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err("Image data URI must declare an image/* MIME type".to_string());
    }
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err("Image data URI must be base64-encoded".to_string());
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|_| "Image data URI payload is not valid base64".to_string())?;

    if bytes.is_empty() {
        return Err("Image data is empty".to_string());
    }
    if bytes.len() > max_bytes {
        return Err(format!(
            "Image is too large ({} bytes, limit {max_bytes} bytes)",
            bytes.len()
        ));
    }

    Ok(ImageUpload { mime, bytes })
}
