//! Hierarchical Open Graph property tree.
//!
//! Property keys are colon-delimited paths (`image:width` under `og:`).
//! Repeated keys accumulate as ordered siblings, and a nested key always
//! attaches to the *most recently inserted* sibling at its level. That is
//! what lets a tag run like
//!
//! ```html
//! <meta property="og:image" content="a.jpg">
//! <meta property="og:image:width" content="300">
//! <meta property="og:image" content="b.jpg">
//! <meta property="og:image:height" content="1000">
//! ```
//!
//! give `a.jpg` a width and `b.jpg` a height instead of spraying both
//! dimensions across both images.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::ops::Deref;

/// Ordered tree of Open Graph properties.
///
/// Maps a property segment (`image`, `locale`) to its sibling nodes in
/// insertion order. Dereferences to the underlying map for read access.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataTree(BTreeMap<String, Vec<MetadataNode>>);

impl MetadataTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` at the colon-delimited `path`.
    ///
    /// Intermediate segments descend into the most recently inserted sibling,
    /// creating a valueless node when the level is still empty, so
    /// `image:width` lands on the latest `image` entry.
    pub fn insert_path(&mut self, path: &str, value: &str) {
        let segments: Vec<&str> = path.split(':').collect();
        insert_into(&mut self.0, &segments, value);
    }
}

impl Deref for MetadataTree {
    type Target = BTreeMap<String, Vec<MetadataNode>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn insert_into(tree: &mut BTreeMap<String, Vec<MetadataNode>>, segments: &[&str], value: &str) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let siblings = tree.entry((*head).to_string()).or_default();
    if rest.is_empty() {
        siblings.push(MetadataNode::with_value(value));
        return;
    }
    if siblings.is_empty() {
        siblings.push(MetadataNode::default());
    }
    if let Some(last) = siblings.last_mut() {
        insert_into(&mut last.children.0, rest, value);
    }
}

/// One node in a [`MetadataTree`]: an optional scalar plus nested children.
///
/// Serializes as an object carrying its scalar under the reserved `_value`
/// key with child properties alongside it:
/// `{"_value": "a.jpg", "width": [{"_value": "300"}]}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataNode {
    value: Option<String>,
    children: MetadataTree,
}

impl MetadataNode {
    fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            children: MetadataTree::new(),
        }
    }

    /// The node's own scalar value, if any.
    ///
    /// Valueless nodes arise when a nested key precedes its parent
    /// (`og:image:width` with no `og:image` before it).
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Child properties nested under this node.
    #[must_use]
    pub fn children(&self) -> &MetadataTree {
        &self.children
    }
}

impl Serialize for MetadataNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let entries = self.children.len() + usize::from(self.value.is_some());
        let mut map = serializer.serialize_map(Some(entries))?;
        if let Some(value) = &self.value {
            map.serialize_entry("_value", value)?;
        }
        for (key, nodes) in self.children.iter() {
            map.serialize_entry(key, nodes)?;
        }
        map.end()
    }
}

/// The four top-level properties promoted to dedicated result fields.
///
/// Assignment dispatches over this fixed set; every other property lives only
/// in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedField {
    Title,
    Url,
    Type,
    Description,
}

impl ReservedField {
    /// Match a property path (`og:` prefix already stripped) against the
    /// reserved set. Nested paths like `title:foo` are not reserved.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "title" => Some(Self::Title),
            "url" => Some(Self::Url),
            "type" => Some(Self::Type),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}
