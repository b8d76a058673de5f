//! Structural checks over parsed JSON trees.
//!
//! CLDR locale documents are assumed to consist exclusively of objects and
//! strings. Anything else is a hard validation failure rather than a silent
//! skip. The checks here are pure and return their input so they chain:
//!
//! ```
//! use cldrpack_schema::{NodeKind, ObjectChecks};
//! use serde_json::json;
//!
//! let doc = json!({"identity": {"language": "fr"}});
//! let obj = doc.as_object().unwrap();
//! obj.require_property("identity", NodeKind::Object)
//!     .and_then(|o| o.require_property_count(1))
//!     .unwrap();
//! ```

use cldrpack_types::FormatError;
use serde_json::{Map, Value};

/// The kind of a JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    String,
    Array,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Number => "number",
            NodeKind::Bool => "boolean",
            NodeKind::Null => "null",
        }
    }

    /// Whether the pipeline accepts this kind anywhere in a document.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::String)
    }
}

/// Ensures the tree consists exclusively of objects and strings.
///
/// The error carries a JSON pointer to the first offending node found.
pub fn check_supported_shape(tree: &Value) -> Result<&Value, FormatError> {
    let mut pending = vec![(String::new(), tree)];

    while let Some((path, node)) = pending.pop() {
        match node {
            Value::String(_) => {}
            Value::Object(map) => {
                for (key, child) in map {
                    pending.push((format!("{path}/{}", escape_pointer_token(key)), child));
                }
            }
            other => {
                return Err(FormatError::UnsupportedNodeKind {
                    path: if path.is_empty() { "(root)".into() } else { path },
                    kind: NodeKind::of(other).as_str(),
                });
            }
        }
    }

    Ok(tree)
}

// RFC 6901: `~` must be escaped before `/`.
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Property assertions over a JSON object.
pub trait ObjectChecks {
    /// Ensures a property named `name` exists and holds a node of `kind`.
    fn require_property(&self, name: &str, kind: NodeKind) -> Result<&Self, FormatError>;

    /// Ensures the object has exactly `expected` direct properties.
    fn require_property_count(&self, expected: usize) -> Result<&Self, FormatError>;

    /// Returns the object stored under `name`, failing like [`Self::require_property`].
    fn object_property(&self, name: &str) -> Result<&Map<String, Value>, FormatError>;

    /// Returns the string stored under `name`, failing like [`Self::require_property`].
    fn string_property(&self, name: &str) -> Result<&str, FormatError>;

    /// Returns the string stored under `name` if present; a non-string value is an error.
    fn optional_string(&self, name: &str) -> Result<Option<&str>, FormatError>;
}

impl ObjectChecks for Map<String, Value> {
    fn require_property(&self, name: &str, kind: NodeKind) -> Result<&Self, FormatError> {
        let value = self.get(name).ok_or_else(|| missing(name))?;
        let found = NodeKind::of(value);
        if found != kind {
            return Err(FormatError::WrongPropertyType {
                name: name.to_string(),
                expected: kind.as_str(),
                found: found.as_str(),
            });
        }
        Ok(self)
    }

    fn require_property_count(&self, expected: usize) -> Result<&Self, FormatError> {
        let found = self.len();
        if found != expected {
            return Err(FormatError::PropertyCount { expected, found });
        }
        Ok(self)
    }

    fn object_property(&self, name: &str) -> Result<&Map<String, Value>, FormatError> {
        self.require_property(name, NodeKind::Object)?
            .get(name)
            .and_then(Value::as_object)
            .ok_or_else(|| missing(name))
    }

    fn string_property(&self, name: &str) -> Result<&str, FormatError> {
        self.require_property(name, NodeKind::String)?
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| missing(name))
    }

    fn optional_string(&self, name: &str) -> Result<Option<&str>, FormatError> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.string_property(name).map(Some),
        }
    }
}

pub(crate) fn missing(name: &str) -> FormatError {
    FormatError::MissingProperty {
        name: name.to_string(),
    }
}

/// One required property, addressed relative to a category's document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    /// JSON pointer to the parent object ("" for the document root itself).
    pub parent: &'static str,
    pub name: &'static str,
    pub kind: NodeKind,
}

impl Requirement {
    pub const fn new(parent: &'static str, name: &'static str, kind: NodeKind) -> Self {
        Self { parent, name, kind }
    }
}

const IDENTITY_REQUIREMENTS: &[Requirement] = &[
    Requirement::new("", "identity", NodeKind::Object),
    Requirement::new("/identity", "language", NodeKind::String),
    Requirement::new("/identity", "version", NodeKind::Object),
];

/// A category's required-property schema.
///
/// Requirements are checked in order, so a parent must be required before
/// any of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySchema {
    requirements: &'static [Requirement],
}

impl CategorySchema {
    /// The identity block shared by every per-locale CLDR document.
    pub const IDENTITY: CategorySchema = CategorySchema::new(IDENTITY_REQUIREMENTS);

    pub const fn new(requirements: &'static [Requirement]) -> Self {
        Self { requirements }
    }

    #[must_use]
    pub fn requirements(&self) -> &'static [Requirement] {
        self.requirements
    }

    /// Checks every requirement against `root`.
    pub fn check<'a>(&self, root: &'a Value) -> Result<&'a Value, FormatError> {
        for req in self.requirements {
            let parent = root
                .pointer(req.parent)
                .and_then(Value::as_object)
                .ok_or_else(|| missing(req.parent.trim_start_matches('/')))?;
            parent.require_property(req.name, req.kind)?;
        }
        Ok(root)
    }
}
