//! Response header generation.
//!
//! Provides the headers sent with every served file.

use std::ffi::OsStr;
use std::path::Path;

use http::{HeaderMap, HeaderValue, header};
use mime::Mime;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters allowed unescaped in an RFC 5987 `ext-value` (`attr-char`).
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Less common types without a `mime` constant.
const EXTRA_TYPES: &[(&str, &str)] = &[
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("avif", "image/avif"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("xml", "application/xml"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
];

/// Guesses the content type of a file from its extension.
///
/// Unknown or missing extensions give `application/octet-stream`.
pub fn guess_content_type(name: &str) -> Mime {
    let ext = Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("bmp") => mime::IMAGE_BMP,
        Some("svg") => mime::IMAGE_SVG,
        Some("pdf") => mime::APPLICATION_PDF,
        Some("json") => mime::APPLICATION_JSON,
        Some("js") | Some("mjs") => mime::APPLICATION_JAVASCRIPT_UTF_8,
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("html") | Some("htm") => mime::TEXT_HTML_UTF_8,
        Some("txt") | Some("log") | Some("md") => mime::TEXT_PLAIN_UTF_8,
        Some("csv") => mime::TEXT_CSV_UTF_8,
        Some("woff") => mime::FONT_WOFF,
        Some("woff2") => mime::FONT_WOFF2,
        Some(other) => EXTRA_TYPES
            .iter()
            .find(|(e, _)| *e == other)
            .and_then(|(_, t)| t.parse().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        None => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Builds an `inline` Content-Disposition carrying the file name.
///
/// `filename` is an ASCII-only fallback; `filename*` carries the exact
/// UTF-8 name (RFC 5987).
pub fn content_disposition(name: &str) -> HeaderValue {
    let fallback: String = name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(name, ATTR_CHAR);

    let value = format!(
        "inline; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    );
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("inline"))
}

/// Builder for file response headers.
///
/// Generates:
/// - Content-Type (guessed from the file name)
/// - Content-Length
/// - Content-Disposition (`inline`, with the file name)
/// - X-Content-Type-Options (`nosniff`)
#[derive(Debug, Clone)]
pub struct FileHeaders {
    /// Content-Type.
    content_type: Mime,
    /// Size in bytes.
    content_length: u64,
    /// Name sent to the client.
    filename: String,
}

impl FileHeaders {
    /// Creates headers for a file named `name` of `size` bytes.
    pub fn for_file(name: &str, size: u64) -> Self {
        Self {
            content_type: guess_content_type(name),
            content_length: size,
            filename: name.to_string(),
        }
    }

    /// Converts to an Axum HeaderMap.
    pub fn to_header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(self.content_type.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(self.content_length));
        headers.insert(
            header::CONTENT_DISPOSITION,
            content_disposition(&self.filename),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );

        headers
    }
}
