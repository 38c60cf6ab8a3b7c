//! ReDoc page.

use crate::html_escape;

/// ReDoc configuration and HTML generation.
///
/// Like [`SwaggerUi`](crate::SwaggerUi), the page fetches the document by URL.
#[derive(Debug, Clone)]
pub struct ReDoc {
    spec_url: String,
    title: String,
    primary_color: String,
    redoc_version: String,
}

impl ReDoc {
    /// Creates a page showing the document at `spec_url`.
    #[must_use]
    pub fn new(spec_url: impl Into<String>, api_title: &str) -> Self {
        Self {
            spec_url: spec_url.into(),
            title: format!("{api_title} - ReDoc"),
            primary_color: "#32329f".to_string(),
            redoc_version: "2.2.0".to_string(),
        }
    }

    /// Sets the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the theme's primary color.
    #[must_use]
    pub fn primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = color.into();
        self
    }

    /// Pins the ReDoc version.
    #[must_use]
    pub fn redoc_version(mut self, version: impl Into<String>) -> Self {
        self.redoc_version = version.into();
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
        let options = serde_json::json!({
            "expandResponses": "200",
            "hideHostname": true,
            "theme": { "colors": { "primary": { "main": self.primary_color } } },
        });

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ margin: 0; padding: 0; }}
    </style>
</head>
<body>
    <div id="redoc-container"></div>
    <script src="https://cdn.redoc.ly/redoc/v{version}/bundles/redoc.standalone.js"></script>
    <script>
        Redoc.init({spec_url}, {options}, document.getElementById('redoc-container'));
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = self.redoc_version,
            spec_url = serde_json::Value::String(self.spec_url.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_references_spec_url() {
        let html = ReDoc::new("/openapi.json", "Mensura").html();
        assert!(html.contains("<title>Mensura - ReDoc</title>"));
        assert!(html.contains("Redoc.init(\"/openapi.json\""));
        assert!(html.contains("redoc/v2.2.0"));
    }

    #[test]
    fn test_customization() {
        let redoc = ReDoc::new("/hx/openapi.json", "Mensura")
            .title("Units")
            .primary_color("#ff0000")
            .redoc_version("2.1.0");
        let html = redoc.html();

        assert_eq!(redoc.spec_url(), "/hx/openapi.json");
        assert!(html.contains("<title>Units</title>"));
        assert!(html.contains("#ff0000"));
        assert!(html.contains("redoc/v2.1.0"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = ReDoc::new("/openapi.json", "A & B").html();
        assert!(html.contains("A &amp; B - ReDoc"));
    }
}
