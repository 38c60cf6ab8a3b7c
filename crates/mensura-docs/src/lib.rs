//! # Mensura Docs
//!
//! API documentation for the Mensura server:
//!
//! - an **OpenAPI 3.1 document** describing every route
//! - a **Swagger UI** page
//! - a **ReDoc** page
//!
//! Both pages load the document from a URL, normally the allow-listed
//! `/openapi.json` under the mount prefix.
//!
//! ```
//! use mensura_docs::{OpenApiGenerator, ReDoc, SwaggerUi};
//!
//! let json = OpenApiGenerator::new().server("/hx").generate_json().unwrap();
//! let swagger = SwaggerUi::new("/hx/openapi.json", "Mensura").html();
//! let redoc = ReDoc::new("/hx/openapi.json", "Mensura").html();
//! assert!(json.contains("\"/json/convert\""));
//! assert!(swagger.contains("swagger-ui"));
//! assert!(redoc.contains("redoc"));
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod openapi;
mod redoc;
mod swagger;

pub use error::{DocsError, DocsResult};
pub use openapi::{
    Components, Info, MediaType, OpenApi, OpenApiGenerator, Operation, Parameter, ParameterIn,
    PathItem, RequestBody, Response, Schema, SchemaType, Server,
};
pub use redoc::ReDoc;
pub use swagger::{DocExpansion, SwaggerUi};

/// Escapes text for HTML element content and attribute values.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
