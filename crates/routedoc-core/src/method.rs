//! HTTP methods and the document slot each one owns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::PathItem;
use crate::error::Error;
use crate::operation::Operation;

/// Selects one operation slot of a [`PathItem`].
pub type SlotRef = fn(&mut PathItem) -> &mut Option<Operation>;

/// The methods a route can be documented under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
}

impl HttpMethod {
    /// Every supported method.
    pub const ALL: [HttpMethod; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Options,
        Self::Head,
    ];

    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
        }
    }

    /// The [`PathItem`] slot this method's operation lives in.
    pub fn slot(self) -> SlotRef {
        match self {
            Self::Get => |item| &mut item.get,
            Self::Post => |item| &mut item.post,
            Self::Put => |item| &mut item.put,
            Self::Patch => |item| &mut item.patch,
            Self::Delete => |item| &mut item.delete,
            Self::Options => |item| &mut item.options,
            Self::Head => |item| &mut item.head,
        }
    }

    /// Whether generated documentation should describe a request body.
    pub fn accepts_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedMethod(s.to_string()))
    }
}
