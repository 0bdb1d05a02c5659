//! LG template records and the reference forms that point at them.
//!
//! A template record is what the template store hands out: a name, its
//! parameters, the raw body text, and the property bag the LG parser derived
//! from a structured body (`$type` plus one entry per property line).

use serde::{Deserialize, Serialize};

use std::fmt;

/// Property bag of a structured template body.
pub type PropertyBag = serde_json::Map<String, serde_json::Value>;

/// `$type` value that marks a body as a structured bot reply.
pub const ACTIVITY_TEMPLATE_TYPE: &str = "Activity";

/// Property key carrying the structured body's type.
pub const TYPE_PROPERTY: &str = "$type";

/// A named LG template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LgTemplate {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub properties: PropertyBag,
}

impl LgTemplate {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            body: body.into(),
            properties: PropertyBag::new(),
        }
    }

    /// The `$type` property, if the body was structured.
    pub fn template_type(&self) -> Option<&str> {
        self.properties.get(TYPE_PROPERTY).and_then(|v| v.as_str())
    }
}

/// A whole-string template reference: `${name(args)}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub name: String,
    /// Raw argument text between the parentheses.
    #[serde(default)]
    pub args: String,
}

impl TemplateRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: String::new(),
        }
    }

    /// Parse a string that consists of exactly one reference expression.
    ///
    /// Returns `None` for anything else, including text that merely contains
    /// a reference somewhere inside it.
    pub fn parse(text: &str) -> Option<Self> {
        let inner = text.trim().strip_prefix("${")?.strip_suffix('}')?;
        let (name, rest) = inner.split_once('(')?;
        let args = rest.strip_suffix(')')?;
        let name = name.trim();
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            args: args.trim().to_string(),
        })
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${{{}({})}}", self.name, self.args)
    }
}

/// Name of a template generated by the designer for a dialog field:
/// `bfd{lg_type}-{designer_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LgMetaData {
    pub lg_type: String,
    pub designer_id: String,
}

impl LgMetaData {
    const PREFIX: &'static str = "bfd";

    pub fn new(lg_type: impl Into<String>, designer_id: impl Into<String>) -> Self {
        Self {
            lg_type: lg_type.into(),
            designer_id: designer_id.into(),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let (lg_type, designer_id) = name.strip_prefix(Self::PREFIX)?.split_once('-')?;
        if lg_type.is_empty() || designer_id.is_empty() {
            return None;
        }
        Some(Self::new(lg_type, designer_id))
    }
}

impl fmt::Display for LgMetaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", Self::PREFIX, self.lg_type, self.designer_id)
    }
}
