//! Per-record digest markup
//!
//! Each record renders as one list item:
//!
//! ```text
//! <li><span title='System.InvalidOperationException'>InvalidOperation</span>: <a href='…'>message</a></li>
//! ```
//!
//! The span is only emitted when the humane type is shorter than the full
//! type. All log text and the link are HTML-encoded.

use url::Url;

use crate::error_log::ErrorRecord;
use crate::markup::encode_html;

/// Opens a digest group body
pub const LIST_START: &str = "<ul>";
/// Closes a digest group body
pub const LIST_END: &str = "</ul>";

const EXCEPTION_SUFFIX: &str = "Exception";

/// Short display form of an exception type.
///
/// Drops the namespace and a trailing `Exception` suffix (any case):
/// `System.InvalidOperationException` becomes `InvalidOperation`. A type that
/// is nothing but the suffix is left alone.
pub fn humane_error_type(error_type: &str) -> &str {
    let mut name = error_type;

    if let Some(dot) = name.rfind('.') {
        if dot > 0 {
            name = &name[dot + 1..];
        }
    }

    if name.len() > EXCEPTION_SUFFIX.len() {
        let split = name.len() - EXCEPTION_SUFFIX.len();
        if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(EXCEPTION_SUFFIX) {
            name = &name[..split];
        }
    }

    name
}

/// Render one record as a digest list item linking to `link`.
///
/// `Url` is always absolute, so the link needs no further checks here.
pub fn render_record(record: &ErrorRecord, link: &Url) -> String {
    let mut out = String::with_capacity(64 + record.error_type.len() + record.message.len());
    out.push_str("<li>");

    let humane = humane_error_type(&record.error_type);
    if !humane.is_empty() {
        let abbreviated = humane.len() < record.error_type.len();

        if abbreviated {
            out.push_str("<span title='");
            out.push_str(&encode_html(&record.error_type));
            out.push_str("'>");
        }

        out.push_str(&encode_html(humane));

        if abbreviated {
            out.push_str("</span>");
        }

        out.push_str(": ");
    }

    out.push_str("<a href='");
    out.push_str(&encode_html(link.as_str()));
    out.push_str("'>");
    out.push_str(&encode_html(&record.message));
    out.push_str("</a>");

    out.push_str("</li>");
    out
}
