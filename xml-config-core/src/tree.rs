use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// A single XML attribute, keyed by its local name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlAttribute {
    pub name: String,
    pub value: String,
}

/// An XML element reduced to what configuration flattening needs.
///
/// Names are local names (namespace prefixes stripped). Attributes keep
/// document order. Element text is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlNode {
    /// Element local name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<XmlAttribute>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create a new element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute append.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(XmlAttribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Return the value of the first attribute with the provided local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Return the first child with the provided local name.
    pub fn get_child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Group direct children by local name, groups ordered by first occurrence.
    pub fn grouped_children(&self) -> Vec<(&str, Vec<&XmlNode>)> {
        let mut groups: Vec<(&str, Vec<&XmlNode>)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for child in &self.children {
            let name = child.name.as_str();
            match index.get(name) {
                Some(&slot) => groups[slot].1.push(child),
                None => {
                    index.insert(name, groups.len());
                    groups.push((name, vec![child]));
                }
            }
        }
        groups
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attr in &self.attributes {
            write!(f, " {}=\"{}\"", attr.name, attr.value)?;
        }

        if self.children.is_empty() {
            return write!(f, " />");
        }

        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.name)
    }
}
