//! Swagger UI page.
//!
//! The page loads Swagger UI from a CDN and fetches the OpenAPI document
//! from a URL, so the document is generated once and served separately.

use crate::html_escape;

/// Swagger UI configuration and HTML generation.
///
/// # Example
///
/// ```
/// use mensura_docs::SwaggerUi;
///
/// let html = SwaggerUi::new("/hx/openapi.json", "Mensura").html();
/// assert!(html.contains("\"/hx/openapi.json\""));
/// ```
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    spec_url: String,
    title: String,
    doc_expansion: DocExpansion,
    swagger_version: String,
}

/// How far Swagger UI expands operations on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocExpansion {
    /// Everything collapsed.
    None,
    /// Operation list only.
    #[default]
    List,
    /// Everything expanded.
    Full,
}

impl DocExpansion {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::List => "list",
            Self::Full => "full",
        }
    }
}

impl SwaggerUi {
    /// Creates a page showing the document at `spec_url`.
    #[must_use]
    pub fn new(spec_url: impl Into<String>, api_title: &str) -> Self {
        Self {
            spec_url: spec_url.into(),
            title: format!("{api_title} - Swagger UI"),
            doc_expansion: DocExpansion::List,
            swagger_version: "5.18.2".to_string(),
        }
    }

    /// Sets the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the expansion level.
    #[must_use]
    pub fn doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.doc_expansion = expansion;
        self
    }

    /// Pins the `swagger-ui-dist` version.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// URL the page fetches the document from.
    #[must_use]
    pub fn spec_url(&self) -> &str {
        &self.spec_url
    }

    /// Renders the page.
    #[must_use]
    pub fn html(&self) -> String {
        // a JSON string literal is a valid JS string literal
        let spec_url = serde_json::Value::String(self.spec_url.clone()).to_string();

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
    <style>
        body {{ margin: 0; background: #fafafa; }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: {spec_url},
                dom_id: '#swagger-ui',
                deepLinking: true,
                docExpansion: '{doc_expansion}',
                displayRequestDuration: true,
                presets: [SwaggerUIBundle.presets.apis],
                layout: "BaseLayout"
            }});
        }};
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = self.swagger_version,
            doc_expansion = self.doc_expansion.as_str(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_references_spec_url() {
        let html = SwaggerUi::new("/openapi.json", "Mensura").html();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("url: \"/openapi.json\""));
        assert!(html.contains("<title>Mensura - Swagger UI</title>"));
        assert!(html.contains("swagger-ui-dist@5.18.2"));
    }

    #[test]
    fn test_customization() {
        let swagger = SwaggerUi::new("/hx/openapi.json", "Mensura")
            .title("Units")
            .doc_expansion(DocExpansion::Full)
            .swagger_version("5.0.0");
        let html = swagger.html();

        assert_eq!(swagger.spec_url(), "/hx/openapi.json");
        assert!(html.contains("<title>Units</title>"));
        assert!(html.contains("docExpansion: 'full'"));
        assert!(html.contains("swagger-ui-dist@5.0.0"));
    }

    #[test]
    fn test_title_and_url_are_escaped() {
        let html = SwaggerUi::new("/a\"b", "<script>").html();
        assert!(html.contains("&lt;script&gt; - Swagger UI"));
        assert!(html.contains(r#"url: "/a\"b""#));
    }
}
