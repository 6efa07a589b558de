//! Response rendering: one quote -> wire payload
//!
//! | Mode    | No callback               | With callback                      |
//! |---------|---------------------------|------------------------------------|
//! | `json`  | record object             | (becomes `jsonp`)                  |
//! | `jsonp` | n/a                       | `;cb("<record json>");`            |
//! | `text`  | bare quote text           | `;cb("<text>");`                   |
//! | `js`    | self-invoking DOM script  | `;cb("<script>");`                 |
//!
//! Every value embedded in script is written as a JavaScript string literal
//! that cannot close its string or the surrounding `<script>` element.

use hitokoto_domain::{Callback, OutputMode, Query, QuoteRecord};

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";
pub const CONTENT_TYPE_JAVASCRIPT: &str = "application/javascript; charset=UTF-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=UTF-8";

/// A rendered payload and its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuote {
    pub body: String,
    pub content_type: &'static str,
}

impl RenderedQuote {
    fn new(body: String, content_type: &'static str) -> Self {
        Self { body, content_type }
    }
}

/// Render `record` in the encoding `query` asks for
pub fn render(record: &QuoteRecord, query: &Query) -> Result<RenderedQuote, serde_json::Error> {
    let callback = query.callback.as_ref();

    let rendered = match (query.mode, callback) {
        (OutputMode::Json, None) => {
            RenderedQuote::new(serde_json::to_string(record)?, CONTENT_TYPE_JSON)
        }
        (OutputMode::Json | OutputMode::Jsonp, Some(cb)) => {
            let json = serde_json::to_string(record)?;
            RenderedQuote::new(wrap_callback(cb, &json), CONTENT_TYPE_JAVASCRIPT)
        }
        // JSONP without a callback cannot come out of the parser; treat as JSON
        (OutputMode::Jsonp, None) => {
            RenderedQuote::new(serde_json::to_string(record)?, CONTENT_TYPE_JSON)
        }
        (OutputMode::Text, None) => RenderedQuote::new(record.hitokoto.clone(), CONTENT_TYPE_TEXT),
        (OutputMode::Text, Some(cb)) => {
            RenderedQuote::new(wrap_callback(cb, &record.hitokoto), CONTENT_TYPE_JAVASCRIPT)
        }
        (OutputMode::Script, cb) => {
            let script = dom_script(&record.hitokoto, query.selector_or_default());
            let body = match cb {
                Some(cb) => wrap_callback(cb, &script),
                None => script,
            };
            RenderedQuote::new(body, CONTENT_TYPE_JAVASCRIPT)
        }
    };

    Ok(rendered)
}

/// `;cb("<payload>");`
pub fn wrap_callback(callback: &Callback, payload: &str) -> String {
    format!(";{}({});", callback, js_string_literal(payload))
}

/// Script writing `text` into the first element matching `selector`
pub fn dom_script(text: &str, selector: &str) -> String {
    format!(
        "(function hitokoto(){{var hitokoto={};var dom=document.querySelector({});\
         Array.isArray(dom)?dom[0].innerText=hitokoto:dom.innerText=hitokoto;}})()",
        js_string_literal(text),
        js_string_literal(selector)
    )
}

/// Double-quoted JavaScript string literal for `value`
///
/// JSON string escaping plus `\u` escapes for `<`, `>`, `&`, U+2028 and
/// U+2029, so the literal is also safe inside an HTML `<script>` element.
pub fn js_string_literal(value: &str) -> String {
    // Serializing a str cannot fail
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""));
    let mut out = String::with_capacity(quoted.len());
    for ch in quoted.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}
