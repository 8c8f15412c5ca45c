//! The closed set of HTTP methods a handler can register hooks for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// An HTTP request method.
///
/// The set is closed: anything the platform sends that is not listed here
/// resolves to `None` in [`Method::of`] and is treated like a method with
/// no registered hook.
///
/// `#[serde(rename_all = "UPPERCASE")]` keeps the wire form identical to
/// the canonical string, so `Method::Get` serializes as `"GET"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Method; 8] = [
        Self::Get,
        Self::Head,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Options,
        Self::Trace,
    ];

    /// Returns the uppercase canonical form, e.g. `"GET"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    /// Case-insensitive lookup by canonical value.
    ///
    /// ```rust
    /// use lambda_lite_core::Method;
    ///
    /// assert_eq!(Method::of("post"), Some(Method::Post));
    /// assert_eq!(Method::of("dummy"), None);
    /// ```
    pub fn of(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s).ok_or_else(|| CoreError::UnknownMethod(s.to_string()))
    }
}
