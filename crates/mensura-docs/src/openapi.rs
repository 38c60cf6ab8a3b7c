//! OpenAPI 3.1 document types and the Mensura API description.
//!
//! Only the parts of <https://spec.openapis.org/oas/v3.1.0> the API uses are
//! modelled. Maps are [`IndexMap`]s so the rendered document keeps
//! declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DocsResult;

/// Root OpenAPI document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version, `3.1.0`.
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Base URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// Operations by path.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Shared schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

/// API metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// URL, possibly relative.
    pub url: String,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// `GET` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// `POST` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
}

/// One operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation id.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// One-line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Query and header parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses by status code.
    pub responses: IndexMap<String, Response>,
}

/// Where a parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Query string.
    Query,
    /// Request header.
    Header,
}

/// A query or header parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter must be present.
    #[serde(default)]
    pub required: bool,
    /// Value schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// A request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether a body must be sent.
    #[serde(default)]
    pub required: bool,
    /// Body schema by media type.
    pub content: IndexMap<String, MediaType>,
}

/// A body in one media type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    /// Body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// One response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Description.
    pub description: String,
    /// Body by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// Reusable components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Named schemas.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,
}

/// JSON Schema primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String.
    String,
    /// Floating point number.
    Number,
    /// Array.
    Array,
    /// Object.
    Object,
}

/// A JSON Schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Primitive type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to a component schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Object properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array element schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl Schema {
    /// A string schema.
    #[must_use]
    pub fn string() -> Self {
        Self {
            schema_type: Some(SchemaType::String),
            ..Default::default()
        }
    }

    /// A number schema.
    #[must_use]
    pub fn number() -> Self {
        Self {
            schema_type: Some(SchemaType::Number),
            ..Default::default()
        }
    }

    /// An object schema.
    #[must_use]
    pub fn object() -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            ..Default::default()
        }
    }

    /// A `$ref` to `#/components/schemas/{name}`.
    #[must_use]
    pub fn component(name: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{name}")),
            ..Default::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Sets the example.
    #[must_use]
    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Adds a required property.
    #[must_use]
    pub fn required_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.insert(name, schema);
        self
    }
}

const HTML: &str = "text/html";
const TEXT: &str = "text/plain";
const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

fn body(media_type: &str, schema: Schema) -> IndexMap<String, MediaType> {
    IndexMap::from([(
        media_type.to_string(),
        MediaType {
            schema: Some(schema),
        },
    )])
}

fn response(description: &str, media_type: &str, schema: Schema) -> Response {
    Response {
        description: description.to_string(),
        content: body(media_type, schema),
    }
}

fn html_response(description: &str) -> Response {
    response(description, HTML, Schema::string())
}

fn forbidden(marker_header: &str) -> Response {
    response(
        &format!("Request lacks the {marker_header} header"),
        TEXT,
        Schema::string().with_example(serde_json::json!("Cannot process this request")),
    )
}

fn marker_parameter(marker_header: &str) -> Parameter {
    Parameter {
        name: marker_header.to_string(),
        location: ParameterIn::Header,
        description: Some("Present on requests issued by the page; any value".to_string()),
        required: true,
        schema: Some(Schema::string()),
    }
}

fn query_parameter(name: &str, description: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        location: ParameterIn::Query,
        description: Some(description.to_string()),
        required: false,
        schema: Some(Schema::string()),
    }
}

/// Builds the OpenAPI document describing the Mensura API.
///
/// # Example
///
/// ```
/// use mensura_docs::OpenApiGenerator;
///
/// let document = OpenApiGenerator::new().title("Units").server("/hx").generate();
/// assert_eq!(document.info.title, "Units");
/// assert!(document.paths.contains_key("/json/convert"));
/// assert_eq!(document.servers[0].url, "/hx");
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    title: String,
    version: String,
    description: Option<String>,
    server: Option<String>,
    marker_header: String,
}

impl Default for OpenApiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiGenerator {
    /// Creates a generator with default metadata.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Mensura".to_string(),
            version: "0.1.0".to_string(),
            description: Some("Convert quantities between units of measurement.".to_string()),
            server: None,
            marker_header: "HX-Request".to_string(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares the base URL, typically the mount prefix. Empty means none.
    #[must_use]
    pub fn server(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.server = (!url.is_empty()).then_some(url);
        self
    }

    /// Names the header fragment routes require.
    #[must_use]
    pub fn marker_header(mut self, name: impl Into<String>) -> Self {
        self.marker_header = name.into();
        self
    }

    /// Builds the document.
    #[must_use]
    pub fn generate(&self) -> OpenApi {
        let mut paths = IndexMap::new();

        paths.insert(
            "/".to_string(),
            PathItem {
                get: Some(Operation {
                    operation_id: "index".to_string(),
                    summary: Some("Main page".to_string()),
                    description: None,
                    parameters: Vec::new(),
                    request_body: None,
                    responses: IndexMap::from([("200".to_string(), html_response("The converter form"))]),
                }),
                post: None,
            },
        );

        paths.insert(
            "/suggestions".to_string(),
            PathItem {
                get: Some(Operation {
                    operation_id: "suggestUnits".to_string(),
                    summary: Some("Unit name suggestions".to_string()),
                    description: Some(
                        "Up to ten unit names containing the query, case-sensitive. \
                         `from_unit` wins over `to_unit`; an empty query lists the first ten units."
                            .to_string(),
                    ),
                    parameters: vec![
                        query_parameter("from_unit", "Partial source unit name"),
                        query_parameter("to_unit", "Partial target unit name"),
                        marker_parameter(&self.marker_header),
                    ],
                    request_body: None,
                    responses: IndexMap::from([
                        ("200".to_string(), html_response("Suggestion list fragment")),
                        ("403".to_string(), forbidden(&self.marker_header)),
                    ]),
                }),
                post: None,
            },
        );

        paths.insert(
            "/convert".to_string(),
            PathItem {
                get: None,
                post: Some(Operation {
                    operation_id: "convertFragment".to_string(),
                    summary: Some("Convert a quantity, rendering an HTML fragment".to_string()),
                    description: None,
                    parameters: vec![marker_parameter(&self.marker_header)],
                    request_body: Some(RequestBody {
                        required: true,
                        content: body(FORM, Schema::component("ConversionRequest")),
                    }),
                    responses: IndexMap::from([
                        ("200".to_string(), html_response("Result fragment")),
                        ("403".to_string(), forbidden(&self.marker_header)),
                        (
                            "422".to_string(),
                            html_response("Unknown unit, incompatible dimensions or malformed form"),
                        ),
                        ("500".to_string(), html_response("Conversion failed")),
                    ]),
                }),
            },
        );

        paths.insert(
            "/json/convert".to_string(),
            PathItem {
                get: None,
                post: Some(Operation {
                    operation_id: "convertJson".to_string(),
                    summary: Some("Convert a quantity".to_string()),
                    description: None,
                    parameters: Vec::new(),
                    request_body: Some(RequestBody {
                        required: true,
                        content: body(JSON, Schema::component("ConversionRequest")),
                    }),
                    responses: IndexMap::from([
                        (
                            "200".to_string(),
                            response("Converted quantity", JSON, Schema::component("ConversionResult")),
                        ),
                        (
                            "422".to_string(),
                            response("Conversion failed", JSON, Schema::component("ErrorEnvelope")),
                        ),
                    ]),
                }),
            },
        );

        OpenApi {
            openapi: "3.1.0".to_string(),
            info: Info {
                title: self.title.clone(),
                version: self.version.clone(),
                description: self.description.clone(),
            },
            servers: self
                .server
                .iter()
                .map(|url| Server { url: url.clone() })
                .collect(),
            paths,
            components: Some(Components {
                schemas: Self::schemas(),
            }),
        }
    }

    /// Builds the document as pretty-printed JSON.
    pub fn generate_json(&self) -> DocsResult<String> {
        Ok(serde_json::to_string_pretty(&self.generate())?)
    }

    fn schemas() -> IndexMap<String, Schema> {
        let request = Schema::object()
            .required_property(
                "quantity",
                Schema::number().with_example(serde_json::json!(1.0)),
            )
            .required_property(
                "from_unit",
                Schema::string()
                    .with_description("Unit name, spaces or underscores")
                    .with_example(serde_json::json!("nautical mile")),
            )
            .required_property(
                "to_unit",
                Schema::string().with_example(serde_json::json!("meter")),
            );

        let result = Schema::object().required_property(
            "result",
            Schema::number()
                .with_description("Rounded to four decimal places, ties away from zero")
                .with_example(serde_json::json!(1852.0)),
        );

        let error = Schema::object().required_property(
            "error",
            Schema::object()
                .required_property(
                    "code",
                    Schema::string().with_example(serde_json::json!("UNKNOWN_UNIT")),
                )
                .required_property("message", Schema::string()),
        );

        IndexMap::from([
            ("ConversionRequest".to_string(), request),
            ("ConversionResult".to_string(), result),
            ("ErrorEnvelope".to_string(), error),
        ])
    }
}
