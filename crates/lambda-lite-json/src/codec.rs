//! Body readers and writers.
//!
//! A handler only ever sees two kinds of body: raw text, passed through
//! untouched, and structured entities, which go through `serde_json`.
//! Which one applies is decided once per type, when its reader or writer
//! is built, by checking whether the type is `String`:
//!
//! ```text
//! Format::of::<String>()  → Text   (body string in, body string out)
//! Format::of::<MyEntity>() → Json  (serde_json::from_str / to_string)
//! ```
//!
//! Readers and writers are built and cached by
//! [`CodecCache`](crate::CodecCache); there is no public constructor.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;

use lambda_lite_core::{MediaType, util};
use serde::{Serialize, de::DeserializeOwned};

use crate::HandlerError;

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// How a body type travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// The textual passthrough type (`String`).
    Text,
    /// Any other type, encoded as JSON.
    Json,
}

impl Format {
    /// Resolves the format for `T`.
    pub fn of<T: 'static>() -> Self {
        if TypeId::of::<T>() == TypeId::of::<String>() {
            Self::Text
        } else {
            Self::Json
        }
    }

    /// The media type this format corresponds to.
    pub fn media_type(self) -> MediaType {
        match self {
            Self::Text => MediaType::TextPlain,
            Self::Json => MediaType::ApplicationJson,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Moves a value of one type into another when they are the same type.
///
/// Only called on the `Text` paths, where `T` has already been resolved
/// to `String`.
fn passthrough<T: 'static, U: 'static>(value: T) -> Option<U> {
    let boxed: Box<dyn Any> = Box::new(value);
    boxed.downcast::<U>().ok().map(|value| *value)
}

// ---------------------------------------------------------------------------
// BodyReader
// ---------------------------------------------------------------------------

/// Decodes request bodies into `T`.
pub struct BodyReader<T> {
    format: Format,
    type_name: &'static str,
    // `fn() -> T` keeps the reader `Send + Sync` whatever `T` is; the
    // reader never stores a `T`.
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> BodyReader<T> {
    pub(crate) fn new() -> Self {
        Self {
            format: Format::of::<T>(),
            type_name: type_name::<T>(),
            _marker: PhantomData,
        }
    }

    /// The format resolved for `T`.
    pub fn format(&self) -> Format {
        self.format
    }

    /// The fully qualified name of `T`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T> BodyReader<T>
where
    T: DeserializeOwned + Default + 'static,
{
    /// Decodes a raw body.
    ///
    /// - `Text`: the body is returned unchanged; no body stays `None`.
    /// - `Json`: no body or an empty one decodes to `T::default()`;
    ///   anything else must be valid JSON for `T`.
    ///
    /// # Errors
    /// Returns [`HandlerError::Extract`] if a `Json` body doesn't parse
    /// as `T`. The error names `T` and keeps the `serde_json` error as
    /// its source.
    pub fn read(&self, body: Option<&str>) -> Result<Option<T>, HandlerError> {
        match self.format {
            Format::Text => {
                Ok(body.and_then(|text| passthrough(text.to_owned())))
            }
            Format::Json => match body {
                Some(text) if util::has_length(Some(text)) => {
                    serde_json::from_str(text).map(Some).map_err(|source| {
                        HandlerError::Extract {
                            type_name: self.type_name,
                            source,
                        }
                    })
                }
                _ => Ok(Some(T::default())),
            },
        }
    }
}

impl<T> fmt::Debug for BodyReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyReader")
            .field("format", &self.format)
            .field("type_name", &self.type_name)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// BodyWriter
// ---------------------------------------------------------------------------

/// Encodes values of `T` into response bodies.
pub struct BodyWriter<T> {
    format: Format,
    type_name: &'static str,
    pretty: bool,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static> BodyWriter<T> {
    pub(crate) fn new(pretty: bool) -> Self {
        Self {
            format: Format::of::<T>(),
            type_name: type_name::<T>(),
            pretty,
            _marker: PhantomData,
        }
    }

    /// The format resolved for `T`.
    pub fn format(&self) -> Format {
        self.format
    }

    /// The fully qualified name of `T`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T> BodyWriter<T>
where
    T: Serialize + 'static,
{
    /// Encodes a value. `Ok(None)` means "nothing to send".
    ///
    /// - `Text`: the empty string encodes to `None`, anything else is
    ///   returned verbatim (no quoting).
    /// - `Json`: compact JSON, or pretty-printed if the cache was built
    ///   that way.
    ///
    /// # Errors
    /// Returns [`HandlerError::Encode`] if serialization fails (e.g. a
    /// map with non-string keys).
    pub fn write(&self, value: &T) -> Result<Option<String>, HandlerError> {
        match self.format {
            Format::Text => {
                let text = (value as &dyn Any).downcast_ref::<String>();
                Ok(text.filter(|text| !text.is_empty()).cloned())
            }
            Format::Json => {
                let encoded = if self.pretty {
                    serde_json::to_string_pretty(value)
                } else {
                    serde_json::to_string(value)
                };
                encoded.map(Some).map_err(|source| HandlerError::Encode {
                    type_name: self.type_name,
                    source,
                })
            }
        }
    }
}

impl<T> fmt::Debug for BodyWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyWriter")
            .field("format", &self.format)
            .field("type_name", &self.type_name)
            .field("pretty", &self.pretty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: Option<String>,
        count: u32,
    }

    // =====================================================================
    // Format
    // =====================================================================

    #[test]
    fn test_format_of_string_is_text() {
        assert_eq!(Format::of::<String>(), Format::Text);
        assert_eq!(Format::of::<Sample>(), Format::Json);
        // Only the owned `String` is the passthrough type.
        assert_eq!(Format::of::<Option<String>>(), Format::Json);
        assert_eq!(Format::of::<serde_json::Value>(), Format::Json);
    }

    #[test]
    fn test_format_media_type() {
        assert_eq!(Format::Text.media_type(), MediaType::TextPlain);
        assert_eq!(Format::Json.media_type(), MediaType::ApplicationJson);
    }

    // =====================================================================
    // BodyReader
    // =====================================================================

    #[test]
    fn test_text_reader_passes_body_through() {
        let reader = BodyReader::<String>::new();
        assert_eq!(
            reader.read(Some("Request, world!")).unwrap().as_deref(),
            Some("Request, world!")
        );
        // Not JSON, still fine: text is never parsed.
        assert_eq!(
            reader.read(Some("{name:dummy}")).unwrap().as_deref(),
            Some("{name:dummy}")
        );
    }

    #[test]
    fn test_text_reader_missing_body_is_none() {
        let reader = BodyReader::<String>::new();
        assert_eq!(reader.read(None).unwrap(), None);
    }

    #[test]
    fn test_json_reader_missing_or_empty_body_is_default() {
        let reader = BodyReader::<Sample>::new();
        assert_eq!(reader.read(None).unwrap(), Some(Sample::default()));
        assert_eq!(reader.read(Some("")).unwrap(), Some(Sample::default()));
        assert_eq!(reader.read(Some("{}")).unwrap(), Some(Sample::default()));
    }

    #[test]
    fn test_json_reader_decodes() {
        let reader = BodyReader::<Sample>::new();
        let sample = reader
            .read(Some(r#"{"name":"Bond007","count":7}"#))
            .unwrap()
            .unwrap();
        assert_eq!(sample.name.as_deref(), Some("Bond007"));
        assert_eq!(sample.count, 7);
    }

    #[test]
    fn test_json_reader_malformed_body_names_type() {
        let reader = BodyReader::<Sample>::new();
        let err = reader.read(Some("{name:dummy}")).unwrap_err();
        assert!(matches!(err, HandlerError::Extract { .. }));
        assert!(err.to_string().starts_with(&format!(
            "Failed to extract {} from request body",
            type_name::<Sample>()
        )));
        assert!(err.to_string().contains("codec::tests::Sample"));
    }

    // =====================================================================
    // BodyWriter
    // =====================================================================

    #[test]
    fn test_text_writer_empty_is_none() {
        let writer = BodyWriter::<String>::new(false);
        assert_eq!(writer.write(&String::new()).unwrap(), None);
    }

    #[test]
    fn test_text_writer_is_verbatim() {
        let writer = BodyWriter::<String>::new(false);
        let out = writer.write(&"Response, \"world\"!".to_string()).unwrap();
        assert_eq!(out.as_deref(), Some("Response, \"world\"!"));
    }

    #[test]
    fn test_json_writer_compact_and_pretty() {
        let sample = Sample {
            name: Some("Joy42".into()),
            count: 1,
        };
        let compact = BodyWriter::<Sample>::new(false).write(&sample).unwrap();
        assert_eq!(compact.as_deref(), Some(r#"{"name":"Joy42","count":1}"#));

        let pretty = BodyWriter::<Sample>::new(true).write(&sample).unwrap();
        assert!(pretty.unwrap().contains("\n  \"name\": \"Joy42\""));
    }

    #[test]
    fn test_json_writer_failure_is_encode_error() {
        // JSON object keys must be strings.
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1u8);
        let writer = BodyWriter::<HashMap<Vec<u8>, u8>>::new(false);
        let err = writer.write(&map).unwrap_err();
        assert!(matches!(err, HandlerError::Encode { .. }));
    }

    #[test]
    fn test_debug_shows_type_name() {
        let reader = BodyReader::<Sample>::new();
        assert!(format!("{reader:?}").contains("Sample"));
    }
}
