//! Per-category metadata extraction and payload isolation.
//!
//! CLDR distributes locale data in two document layouts:
//!
//! - **main**: `{"main": {"<code>": {"identity": {...}, "<payload>": {...}}}}`
//! - **rooted**: `{"<root>": {"identity": {...}, "<data>": {...}}}`
//!
//! Each [`Category`] maps to exactly one layout through [`Handler::for_category`].
//! The three operations are identical for every category; only the paths
//! differ.

use cldrpack_types::{Category, FormatError, LocaleId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::validate::{CategorySchema, NodeKind, ObjectChecks, missing};

/// Identity block property names that carry the source data version.
/// The underscore spelling is the one the upstream JSON conversion emits.
const VERSION_KEYS: [&str; 2] = ["cldrVersion", "_cldrVersion"];

/// Identifying metadata read from a document's identity block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMetadata {
    pub source_version: String,
    pub locale: LocaleId,
}

/// The locale data kept from a document once metadata is stripped.
///
/// Always a JSON object; each top-level key is owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadTree(Map<String, Value>);

impl PayloadTree {
    #[must_use]
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// A payload holding a single top-level key.
    #[must_use]
    pub fn single(key: impl Into<String>, value: Value) -> Self {
        let mut map = Map::new();
        map.insert(key.into(), value);
        Self(map)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for PayloadTree {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Where a category keeps its identity block and its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLayout {
    /// `main.<code>.identity` and `main.<code>.<payload_key>`.
    Main { payload_key: &'static str },
    /// `<root>.identity` and `<root>.<data>`.
    Rooted { root: &'static str, data: &'static str },
}

/// The extraction operations for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handler {
    category: Category,
    layout: DocumentLayout,
}

impl Handler {
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        use DocumentLayout::{Main, Rooted};

        let layout = match category {
            Category::Dates => Main { payload_key: "dates" },
            Category::Numbers => Main { payload_key: "numbers" },
            Category::LocaleNames => Main { payload_key: "localeDisplayNames" },
            Category::Units => Main { payload_key: "units" },
            Category::Characters => Main { payload_key: "characters" },
            Category::Delimiters => Main { payload_key: "delimiters" },
            Category::Layout => Main { payload_key: "layout" },
            Category::ListPatterns => Main { payload_key: "listPatterns" },
            Category::ContextTransforms => Main { payload_key: "contextTransforms" },
            Category::Posix => Main { payload_key: "posix" },
            Category::Rbnf => Rooted { root: "rbnf", data: "rbnf" },
            Category::Segments => Rooted { root: "segments", data: "segmentations" },
        };
        Self { category, layout }
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub const fn layout(&self) -> DocumentLayout {
        self.layout
    }

    /// Required-property schema, relative to the document root.
    #[must_use]
    pub const fn schema(&self) -> CategorySchema {
        CategorySchema::IDENTITY
    }

    /// The top-level key this category contributes to a merged record.
    #[must_use]
    pub const fn payload_key(&self) -> &'static str {
        match self.layout {
            DocumentLayout::Main { payload_key } => payload_key,
            DocumentLayout::Rooted { data, .. } => data,
        }
    }

    /// Reads the locale identity and source version.
    ///
    /// Script, territory and variant are optional; a missing identity block,
    /// language or version is an error.
    pub fn extract_metadata(&self, tree: &Value) -> Result<ExtractedMetadata, FormatError> {
        let (keyed, root) = self.document_root(tree)?;
        self.schema().check(root)?;

        let identity = root
            .as_object()
            .ok_or(FormatError::CategoryMismatch(self.category))?
            .object_property("identity")?;

        let part = |name: &str| -> Result<Option<String>, FormatError> {
            Ok(identity.optional_string(name)?.map(str::to_string))
        };
        let locale = LocaleId::new(
            identity.string_property("language")?,
            part("script")?,
            part("territory")?,
            part("variant")?,
        )?;

        if let Some(keyed) = keyed {
            if keyed != locale.to_code() {
                return Err(FormatError::LocaleMismatch {
                    keyed: keyed.to_string(),
                    declared: locale.to_code(),
                });
            }
        }

        let version = identity.object_property("version")?;
        let source_version = match VERSION_KEYS.into_iter().find(|k| version.contains_key(*k)) {
            Some(key) => version.string_property(key)?.to_string(),
            None => return Err(missing(VERSION_KEYS[0])),
        };

        Ok(ExtractedMetadata {
            source_version,
            locale,
        })
    }

    /// Excises the identity block in place.
    pub fn remove_metadata(&self, tree: &mut Value) -> Result<(), FormatError> {
        self.document_root_mut(tree)?
            .remove("identity")
            .map(|_| ())
            .ok_or_else(|| missing("identity"))
    }

    /// Isolates the category's data subtree from a metadata-free tree.
    ///
    /// Returns `Ok(None)` when the data node is absent or empty, which is
    /// normal for narrowly applied categories after subsetting. Any residual
    /// property besides the data node is an error.
    pub fn prepare_for_merge(
        &self,
        locale: &LocaleId,
        mut tree: Value,
    ) -> Result<Option<PayloadTree>, FormatError> {
        let key = self.payload_key();
        let container = self.document_root_mut(&mut tree)?;
        let data = container.remove(key);
        container.require_property_count(0)?;

        match data {
            Some(Value::Object(map)) if !map.is_empty() => {
                Ok(Some(PayloadTree::single(key, Value::Object(map))))
            }
            Some(Value::Object(_)) | None => {
                debug!(locale = %locale, category = %self.category, "No payload after subsetting");
                Ok(None)
            }
            Some(other) => Err(FormatError::WrongPropertyType {
                name: key.to_string(),
                expected: NodeKind::Object.as_str(),
                found: NodeKind::of(&other).as_str(),
            }),
        }
    }

    /// Returns the locale code key (main layout only) and the object that
    /// holds `identity` and the data node.
    fn document_root<'a>(&self, tree: &'a Value) -> Result<(Option<&'a str>, &'a Value), FormatError> {
        let top = tree
            .as_object()
            .ok_or(FormatError::CategoryMismatch(self.category))?;

        match self.layout {
            DocumentLayout::Main { .. } => {
                let main = top
                    .require_property_count(1)?
                    .object_property("main")?
                    .require_property_count(1)?;
                let (code, node) = main
                    .iter()
                    .next()
                    .ok_or(FormatError::PropertyCount { expected: 1, found: 0 })?;
                if !node.is_object() {
                    return Err(FormatError::WrongPropertyType {
                        name: code.clone(),
                        expected: NodeKind::Object.as_str(),
                        found: NodeKind::of(node).as_str(),
                    });
                }
                Ok((Some(code.as_str()), node))
            }
            DocumentLayout::Rooted { root, .. } => {
                top.require_property_count(1)?
                    .require_property(root, NodeKind::Object)?;
                let node = top.get(root).ok_or_else(|| missing(root))?;
                Ok((None, node))
            }
        }
    }

    fn document_root_mut<'a>(&self, tree: &'a mut Value) -> Result<&'a mut Map<String, Value>, FormatError> {
        self.document_root(tree)?;

        let top = tree
            .as_object_mut()
            .ok_or(FormatError::CategoryMismatch(self.category))?;
        let node = match self.layout {
            DocumentLayout::Main { .. } => top
                .get_mut("main")
                .and_then(Value::as_object_mut)
                .and_then(|main| main.values_mut().next()),
            DocumentLayout::Rooted { root, .. } => top.get_mut(root),
        };
        node.and_then(Value::as_object_mut)
            .ok_or(FormatError::CategoryMismatch(self.category))
    }

    /// Whether `tree` looks like a document of this category.
    fn matches(&self, tree: &Value) -> bool {
        match self.layout {
            DocumentLayout::Main { payload_key } => tree
                .get("main")
                .and_then(Value::as_object)
                .and_then(|main| main.values().next())
                .and_then(Value::as_object)
                .is_some_and(|node| node.contains_key(payload_key)),
            DocumentLayout::Rooted { root, .. } => tree.get(root).is_some_and(Value::is_object),
        }
    }
}

/// Infers a document's category from its shape.
///
/// Main-layout documents are recognised by their payload key, so one whose
/// payload was subset away cannot be classified and yields `None`.
#[must_use]
pub fn detect_category(tree: &Value) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|category| Handler::for_category(*category).matches(tree))
}
