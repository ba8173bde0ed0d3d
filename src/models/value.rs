use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Typed leaf or subtree stored under a field name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(NaiveDateTime),
    Node(Node),
    List(Vec<Node>),
}

impl Value {
    /// Short type name, used in outlines and diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int64",
            Value::Float(_) => "Float64",
            Value::String(_) => "String",
            Value::DateTime(_) => "DateTime",
            Value::Node(_) => "Node",
            Value::List(_) => "List",
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.3f")),
            Value::Node(node) => write!(f, "{{{} fields}}", node.len()),
            Value::List(items) => write!(f, "[{} items]", items.len()),
        }
    }
}

/// One indentation-delimited block: field name to value.
///
/// Field order carries no meaning in the source format; a sorted map keeps
/// iteration and serialization deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Node {
    fields: BTreeMap<String, Value>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Insert a field, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Append a child to the list stored under `key`, creating the list first.
    /// A non-list value already stored under `key` is replaced.
    pub fn push_to_list(&mut self, key: &str, child: Node) {
        match self.fields.get_mut(key) {
            Some(Value::List(items)) => items.push(child),
            _ => {
                self.fields.insert(key.to_string(), Value::List(vec![child]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of leaf values in this node and all nested nodes
    pub fn leaf_count(&self) -> usize {
        self.fields
            .values()
            .map(|value| match value {
                Value::Node(child) => child.leaf_count(),
                Value::List(items) => items.iter().map(Node::leaf_count).sum(),
                _ => 1,
            })
            .sum()
    }
}

/// One `---------version:` ... `-----------------` unit of a PCHR file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Text following the start marker, trimmed
    pub version: String,
    pub data: Node,
}
