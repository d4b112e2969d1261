use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

/// A named value attached to a design object.
///
/// Properties nest: the property definitions bag of a design is a tree of
/// object kinds, property names, and their `MIN`/`MAX`/`VALUE` children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: ArcStr,
    pub value: PropValue,
    #[serde(default)]
    pub props: Vec<Property>,
}

impl Property {
    pub fn new(name: impl Into<ArcStr>, value: PropValue) -> Self {
        Self {
            name: name.into(),
            value,
            props: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Property) -> Self {
        self.props.push(child);
        self
    }

    /// Finds a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropValue {
    String(ArcStr),
    Int(i64),
    Real(f64),
    Bool(bool),
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}
