//! HTML rendering: the main page and the fragments swapped into it.

use mensura_core::{Conversion, ConversionError};

use crate::extract::ExtractionError;

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// Escapes text for element content and attribute values.
///
/// ```
/// use mensura_server::html::escape;
///
/// assert_eq!(escape(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the main page for a deployment under `prefix`.
#[must_use]
pub fn index_page(title: &str, prefix: &str) -> String {
    INDEX_TEMPLATE
        .replace("{{title}}", &escape(title))
        .replace("{{prefix}}", &escape(prefix))
}

/// One `<option>` per suggestion, for a `<datalist>`.
#[must_use]
pub fn suggestions_fragment(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| {
            let name = escape(name);
            format!("<option value=\"{name}\">{name}</option>\n")
        })
        .collect()
}

/// The converted quantity.
#[must_use]
pub fn result_fragment(conversion: &Conversion) -> String {
    format!(
        "<output class=\"result\" data-from=\"{from}\" data-to=\"{to}\">{result}</output>",
        from = escape(&conversion.request.from_unit),
        to = escape(&conversion.request.to_unit),
        result = conversion.result,
    )
}

/// A classified conversion failure; `data-field` names the offending input
/// when the failure is tied to one.
#[must_use]
pub fn conversion_error_fragment(error: &ConversionError) -> String {
    let field = error
        .side()
        .map(|side| format!(" data-field=\"{}\"", side.field()))
        .unwrap_or_default();
    error_fragment(error.code(), &field, &error.to_string())
}

/// An undecodable form.
#[must_use]
pub fn extraction_error_fragment(error: &ExtractionError) -> String {
    error_fragment(error.code(), "", &error.to_string())
}

fn error_fragment(code: &str, attributes: &str, message: &str) -> String {
    format!(
        "<output class=\"error\" data-code=\"{code}\"{attributes}>Error: {message}</output>",
        message = escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_core::{ConversionRequest, RoundedDecimal, UnitSide};

    #[test]
    fn test_index_page_uses_prefix() {
        let page = index_page("Mensura", "/hx");
        assert!(page.contains("hx-get=\"/hx/suggestions\""));
        assert!(page.contains("hx-post=\"/hx/convert\""));
        assert!(page.contains("<title>Mensura</title>"));
        assert!(!page.contains("{{"));

        let page = index_page("Mensura", "");
        assert!(page.contains("hx-get=\"/suggestions\""));
    }

    #[test]
    fn test_suggestions_are_escaped_options() {
        let html = suggestions_fragment(&["meter", "a<b"]);
        assert_eq!(
            html,
            "<option value=\"meter\">meter</option>\n<option value=\"a&lt;b\">a&lt;b</option>\n"
        );
    }

    #[test]
    fn test_result_fragment() {
        let conversion = Conversion {
            request: ConversionRequest::new(1.0, "meter", "centimeter"),
            result: "100".parse::<RoundedDecimal>().unwrap(),
        };
        let html = result_fragment(&conversion);
        assert!(html.contains(">100.0000</output>"));
        assert!(html.contains("data-to=\"centimeter\""));
    }

    #[test]
    fn test_error_fragment_escapes_input() {
        let err = ConversionError::unknown_unit("<script>", UnitSide::From);
        let html = conversion_error_fragment(&err);
        assert!(html.contains("data-code=\"UNKNOWN_UNIT\" data-field=\"from_unit\""));
        assert!(html.contains("Error: Unknown source unit &#x27;&lt;script&gt;&#x27;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_error_fragment_field_follows_side() {
        let html = conversion_error_fragment(&ConversionError::unknown_unit("parsecs", UnitSide::To));
        assert!(html.contains("data-field=\"to_unit\""));

        let html = conversion_error_fragment(&ConversionError::internal("overflow"));
        assert!(!html.contains("data-field"));
    }
}
