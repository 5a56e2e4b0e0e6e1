//! UI resource envelopes and the builder that validates them.
//!
//! An envelope is the normalized shape every tool returns to the host:
//! a `ui://` identifier, one content variant, and an advisory encoding.
//! Content is passed through untouched; sanitization belongs to the host.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rmcp::model::ResourceContents;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::lib::errors::EnvelopeError;

/// Scheme every UI resource uri must carry.
pub const UI_URI_SCHEME: &str = "ui://";
/// Mime type advertised for inline HTML resources.
pub const MIME_TYPE_HTML: &str = "text/html";
/// Mime type advertised for iframe URL resources.
pub const MIME_TYPE_URI_LIST: &str = "text/uri-list";

/// How the host should read the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Text,
    Blob,
}

impl Encoding {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Encoding::Text => "text",
            Encoding::Blob => "blob",
        }
    }

    fn parse(value: &str) -> Result<Self, EnvelopeError> {
        match value {
            "text" => Ok(Encoding::Text),
            "blob" => Ok(Encoding::Blob),
            other => Err(EnvelopeError::UnknownEncoding {
                value: other.to_string(),
            }),
        }
    }
}

/// Payload of a UI resource. Exactly one field is ever populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentVariant {
    RawHtml { html_string: String },
    ExternalUrl { iframe_url: String },
}

impl ContentVariant {
    pub fn raw_html(html: impl Into<String>) -> Self {
        ContentVariant::RawHtml {
            html_string: html.into(),
        }
    }

    pub fn external_url(url: impl Into<String>) -> Self {
        ContentVariant::ExternalUrl {
            iframe_url: url.into(),
        }
    }

    /// Wire tag of the variant.
    pub const fn tag(&self) -> &'static str {
        match self {
            ContentVariant::RawHtml { .. } => "rawHtml",
            ContentVariant::ExternalUrl { .. } => "externalUrl",
        }
    }

    pub const fn mime_type(&self) -> &'static str {
        match self {
            ContentVariant::RawHtml { .. } => MIME_TYPE_HTML,
            ContentVariant::ExternalUrl { .. } => MIME_TYPE_URI_LIST,
        }
    }

    /// The populated payload regardless of variant.
    pub fn payload(&self) -> &str {
        match self {
            ContentVariant::RawHtml { html_string } => html_string,
            ContentVariant::ExternalUrl { iframe_url } => iframe_url,
        }
    }

    pub fn html_string(&self) -> Option<&str> {
        match self {
            ContentVariant::RawHtml { html_string } => Some(html_string),
            ContentVariant::ExternalUrl { .. } => None,
        }
    }

    pub fn iframe_url(&self) -> Option<&str> {
        match self {
            ContentVariant::RawHtml { .. } => None,
            ContentVariant::ExternalUrl { iframe_url } => Some(iframe_url),
        }
    }

    fn validate(&self) -> Result<(), EnvelopeError> {
        let field = match self {
            ContentVariant::RawHtml { .. } => "htmlString",
            ContentVariant::ExternalUrl { .. } => "iframeUrl",
        };
        if self.payload().is_empty() {
            return Err(EnvelopeError::EmptyContent { field });
        }
        Ok(())
    }
}

/// Validated, immutable UI resource descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEnvelope {
    uri: String,
    content: ContentVariant,
    encoding: Encoding,
}

/// Validate the inputs and produce an envelope.
pub fn build(
    uri: impl Into<String>,
    content: ContentVariant,
    encoding: Encoding,
) -> Result<ResourceEnvelope, EnvelopeError> {
    let uri = uri.into();
    validate_uri(&uri)?;
    content.validate()?;
    Ok(ResourceEnvelope {
        uri,
        content,
        encoding,
    })
}

fn validate_uri(uri: &str) -> Result<(), EnvelopeError> {
    if uri.is_empty() {
        return Err(EnvelopeError::EmptyUri);
    }
    let Some(path) = uri.strip_prefix(UI_URI_SCHEME) else {
        return Err(EnvelopeError::UnsupportedScheme {
            uri: uri.to_string(),
        });
    };
    if path.trim_matches('/').is_empty() {
        return Err(EnvelopeError::MissingPath {
            uri: uri.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RawResourceEnvelope {
    uri: Option<String>,
    content: Option<RawContent>,
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    #[serde(rename = "type")]
    tag: Option<String>,
    html_string: Option<String>,
    iframe_url: Option<String>,
}

impl RawContent {
    fn into_variant(self) -> Result<ContentVariant, EnvelopeError> {
        let tag = self
            .tag
            .ok_or(EnvelopeError::MissingField {
                field: "content.type",
            })?;
        match tag.as_str() {
            "rawHtml" => {
                if self.iframe_url.is_some() {
                    return Err(EnvelopeError::ConflictingContent {
                        tag: "rawHtml",
                        field: "iframeUrl",
                    });
                }
                let html = self.html_string.ok_or(EnvelopeError::MissingField {
                    field: "content.htmlString",
                })?;
                Ok(ContentVariant::raw_html(html))
            }
            "externalUrl" => {
                if self.html_string.is_some() {
                    return Err(EnvelopeError::ConflictingContent {
                        tag: "externalUrl",
                        field: "htmlString",
                    });
                }
                let url = self.iframe_url.ok_or(EnvelopeError::MissingField {
                    field: "content.iframeUrl",
                })?;
                Ok(ContentVariant::external_url(url))
            }
            other => Err(EnvelopeError::UnknownContentType {
                tag: other.to_string(),
            }),
        }
    }
}

impl ResourceEnvelope {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn content(&self) -> &ContentVariant {
        &self.content
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Parse the loosely-typed wire shape into a validated envelope.
    pub fn from_json(value: Value) -> Result<Self, EnvelopeError> {
        let raw: RawResourceEnvelope =
            serde_json::from_value(value).map_err(|err| EnvelopeError::Malformed {
                message: err.to_string(),
            })?;
        let uri = raw.uri.ok_or(EnvelopeError::MissingField { field: "uri" })?;
        let content = raw
            .content
            .ok_or(EnvelopeError::MissingField { field: "content" })?
            .into_variant()?;
        let encoding = raw
            .encoding
            .ok_or(EnvelopeError::MissingField { field: "encoding" })
            .and_then(|value| Encoding::parse(&value))?;
        build(uri, content, encoding)
    }

    /// Wire shape handed to hosts and the CLI.
    pub fn to_json(&self) -> Value {
        let content = match &self.content {
            ContentVariant::RawHtml { html_string } => json!({
                "type": "rawHtml",
                "htmlString": html_string,
            }),
            ContentVariant::ExternalUrl { iframe_url } => json!({
                "type": "externalUrl",
                "iframeUrl": iframe_url,
            }),
        };
        json!({
            "uri": self.uri,
            "content": content,
            "encoding": self.encoding.as_str(),
        })
    }

    /// Embed the envelope as MCP resource contents.
    ///
    /// `blob` encoding carries the payload base64-encoded; `text` carries it verbatim.
    pub fn to_resource_contents(&self) -> ResourceContents {
        let uri = self.uri.clone();
        let mime_type = Some(self.content.mime_type().to_string());
        let payload = self.content.payload();
        match self.encoding {
            Encoding::Text => ResourceContents::TextResourceContents {
                uri,
                mime_type,
                text: payload.to_string(),
                meta: None,
            },
            Encoding::Blob => ResourceContents::BlobResourceContents {
                uri,
                mime_type,
                blob: STANDARD.encode(payload.as_bytes()),
                meta: None,
            },
        }
    }
}

impl Serialize for ResourceEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}
