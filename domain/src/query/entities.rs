//! Query value objects

use serde::{Deserialize, Serialize};

/// Default inclusive lower length bound (0 = unconstrained)
pub const DEFAULT_MIN_LENGTH: u32 = 0;

/// Default inclusive upper length bound
pub const DEFAULT_MAX_LENGTH: u32 = 30;

/// Selector used by script mode when the request does not name one
pub const DEFAULT_SELECTOR: &str = ".hitokoto";

const MAX_CALLBACK_LEN: usize = 128;

/// How the chosen quote is encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Full record as a JSON object (default)
    #[default]
    Json,
    /// Full record as a JSON string passed to a callback
    Jsonp,
    /// Bare quote text, optionally passed to a callback
    Text,
    /// Self-invoking script that writes the quote into a DOM element
    Script,
}

impl OutputMode {
    /// Resolve the `encode` parameter; `callback` turns JSON into JSONP.
    ///
    /// Only an absent, empty or `json` encoding is wrapped. Unknown values
    /// fall back to plain JSON whether or not a callback is present.
    pub fn from_encode(encode: Option<&str>, has_callback: bool) -> Self {
        match encode {
            Some("text") => OutputMode::Text,
            Some("js") => OutputMode::Script,
            None | Some("" | "json") if has_callback => OutputMode::Jsonp,
            _ => OutputMode::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Json => "json",
            OutputMode::Jsonp => "jsonp",
            OutputMode::Text => "text",
            OutputMode::Script => "script",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A JavaScript function reference a payload is handed to (Value Object)
///
/// Restricted to dotted identifier paths such as `render` or
/// `window.app.onQuote`, so it can be emitted into script unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Callback(String);

impl Callback {
    /// Try to create a callback, returning None if it is not an identifier path
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if Self::is_valid(&name) {
            Some(Self(name))
        } else {
            None
        }
    }

    fn is_valid(name: &str) -> bool {
        if name.is_empty() || name.len() > MAX_CALLBACK_LEN {
            return false;
        }
        name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Callback {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Callback::try_new(value.clone()).ok_or(value)
    }
}

impl From<Callback> for String {
    fn from(callback: Callback) -> Self {
        callback.0
    }
}

/// Inclusive length window applied to quote text (Value Object)
///
/// A zero bound leaves that side open. `explicit` records whether the request
/// supplied either bound; only explicit windows filter anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: u32,
    pub max: u32,
    pub explicit: bool,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LENGTH,
            max: DEFAULT_MAX_LENGTH,
            explicit: false,
        }
    }
}

impl LengthBounds {
    pub fn explicit(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            explicit: true,
        }
    }

    pub fn contains(&self, length: u32) -> bool {
        (self.min == 0 || length >= self.min) && (self.max == 0 || length <= self.max)
    }
}

/// A validated request for one quote (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Requested category keys in request order; empty means any category
    pub categories: Vec<String>,
    pub length: LengthBounds,
    pub mode: OutputMode,
    pub callback: Option<Callback>,
    /// DOM selector override for script mode
    pub selector: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_length(mut self, length: LengthBounds) -> Self {
        self.length = length;
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Selector script mode should target
    pub fn selector_or_default(&self) -> &str {
        self.selector.as_deref().unwrap_or(DEFAULT_SELECTOR)
    }
}
