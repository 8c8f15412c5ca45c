//! Common media type (MIME type) values.

use std::fmt;

/// A media type from the fixed table of common values.
///
/// Only used for diagnostics and for naming the two body formats
/// (`text/plain` and `application/json`); there is no content
/// negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    All,
    ApplicationAtomXml,
    ApplicationFormUrlencoded,
    ApplicationJson,
    ApplicationJsonUtf8,
    ApplicationOctetStream,
    ApplicationPdf,
    ApplicationRssXml,
    ApplicationXhtmlXml,
    ApplicationXml,
    ImageGif,
    ImageJpeg,
    ImagePng,
    MultipartFormData,
    TextEventStream,
    TextHtml,
    TextMarkdown,
    TextPlain,
    TextXml,
}

impl MediaType {
    /// Every media type, in declaration order.
    pub const ALL: [MediaType; 19] = [
        Self::All,
        Self::ApplicationAtomXml,
        Self::ApplicationFormUrlencoded,
        Self::ApplicationJson,
        Self::ApplicationJsonUtf8,
        Self::ApplicationOctetStream,
        Self::ApplicationPdf,
        Self::ApplicationRssXml,
        Self::ApplicationXhtmlXml,
        Self::ApplicationXml,
        Self::ImageGif,
        Self::ImageJpeg,
        Self::ImagePng,
        Self::MultipartFormData,
        Self::TextEventStream,
        Self::TextHtml,
        Self::TextMarkdown,
        Self::TextPlain,
        Self::TextXml,
    ];

    /// Returns the textual value, e.g. `"application/json"`.
    pub fn value(self) -> &'static str {
        match self {
            Self::All => "*/*",
            Self::ApplicationAtomXml => "application/atom+xml",
            Self::ApplicationFormUrlencoded => {
                "application/x-www-form-urlencoded"
            }
            Self::ApplicationJson => "application/json",
            Self::ApplicationJsonUtf8 => "application/json;charset=UTF-8",
            Self::ApplicationOctetStream => "application/octet-stream",
            Self::ApplicationPdf => "application/pdf",
            Self::ApplicationRssXml => "application/rss+xml",
            Self::ApplicationXhtmlXml => "application/xhtml+xml",
            Self::ApplicationXml => "application/xml",
            Self::ImageGif => "image/gif",
            Self::ImageJpeg => "image/jpeg",
            Self::ImagePng => "image/png",
            Self::MultipartFormData => "multipart/form-data",
            Self::TextEventStream => "text/event-stream",
            Self::TextHtml => "text/html",
            Self::TextMarkdown => "text/markdown",
            Self::TextPlain => "text/plain",
            Self::TextXml => "text/xml",
        }
    }

    /// Case-insensitive lookup by value.
    pub fn of(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|media| media.value().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
