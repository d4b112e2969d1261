//! Property definitions and per-object property clauses.

use std::io::Write;

use arcstr::ArcStr;
use indexmap::{IndexMap, IndexSet};

use crate::model::{Design, PropValue, Property};

/// The design property holding all DEF property definitions.
pub const DEFINITIONS_BAG: &str = "__ADS_DEF_PROPERTY_DEFINITIONS__";

/// A kind of object that can carry DEF properties.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ObjKind {
    Component,
    ComponentPin,
    Design,
    Group,
    Net,
    NonDefaultRule,
    Region,
    Row,
    SpecialNet,
}

impl ObjKind {
    pub const ALL: [Self; 9] = [
        Self::Component,
        Self::ComponentPin,
        Self::Design,
        Self::Group,
        Self::Net,
        Self::NonDefaultRule,
        Self::Region,
        Self::Row,
        Self::SpecialNet,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Component => "COMPONENT",
            Self::ComponentPin => "COMPONENTPIN",
            Self::Design => "DESIGN",
            Self::Group => "GROUP",
            Self::Net => "NET",
            Self::NonDefaultRule => "NONDEFAULTRULE",
            Self::Region => "REGION",
            Self::Row => "ROW",
            Self::SpecialNet => "SPECIALNET",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// The property names declared for each object kind.
///
/// Only declared properties are written on objects.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    declared: IndexMap<ObjKind, IndexSet<ArcStr>>,
}

impl PropertyRegistry {
    pub fn from_design(design: &Design) -> Self {
        let mut declared: IndexMap<ObjKind, IndexSet<ArcStr>> = IndexMap::new();
        if let Some(bag) = design.property(DEFINITIONS_BAG) {
            for (kind, def) in definitions(bag) {
                declared.entry(kind).or_default().insert(def.name.clone());
            }
        }
        Self { declared }
    }

    pub fn is_declared(&self, kind: ObjKind, name: &str) -> bool {
        self.declared
            .get(&kind)
            .is_some_and(|names| names.contains(name))
    }

    /// Returns `true` if any of `props` is declared for `kind`.
    pub fn has_properties(&self, kind: ObjKind, props: &[Property]) -> bool {
        self.printable(kind, props).next().is_some()
    }

    fn printable<'a>(
        &'a self,
        kind: ObjKind,
        props: &'a [Property],
    ) -> impl Iterator<Item = &'a Property> + 'a {
        props
            .iter()
            .filter(move |p| !matches!(p.value, PropValue::Bool(_)))
            .filter(move |p| self.is_declared(kind, &p.name))
    }

    /// Writes the `PROPERTYDEFINITIONS` section, if the design has one.
    pub fn write_definitions<W: Write>(design: &Design, out: &mut W) -> std::io::Result<()> {
        let Some(bag) = design.property(DEFINITIONS_BAG) else {
            return Ok(());
        };
        writeln!(out, "PROPERTYDEFINITIONS")?;
        for (kind, def) in definitions(bag) {
            write!(out, "{} {} {} ", kind.as_str(), def.name, type_name(&def.value))?;
            if let (Some(min), Some(max)) = (def.child("MIN"), def.child("MAX")) {
                write!(out, "RANGE ")?;
                write_value(&min.value, out)?;
                write_value(&max.value, out)?;
            }
            if let Some(value) = def.child("VALUE") {
                write_value(&value.value, out)?;
            }
            writeln!(out, ";")?;
        }
        writeln!(out, "END PROPERTYDEFINITIONS")?;
        Ok(())
    }

    /// Writes ` + PROPERTY name value ...` for the declared properties in `props`.
    ///
    /// Writes nothing if none are declared.
    pub fn write_clause<W: Write>(
        &self,
        kind: ObjKind,
        props: &[Property],
        out: &mut W,
    ) -> std::io::Result<()> {
        for (i, prop) in self.printable(kind, props).enumerate() {
            if i == 0 {
                write!(out, " + PROPERTY ")?;
            } else if i % 4 == 0 {
                write!(out, "\n    ")?;
            }
            write!(out, "{} ", prop.name)?;
            write_value(&prop.value, out)?;
        }
        Ok(())
    }
}

/// Iterates over the typed definitions in a definitions bag.
///
/// Unknown object kinds and boolean definitions are skipped.
fn definitions(bag: &Property) -> impl Iterator<Item = (ObjKind, &Property)> {
    bag.props
        .iter()
        .filter_map(|kind| Some((ObjKind::from_name(&kind.name)?, kind)))
        .flat_map(|(kind, defs)| defs.props.iter().map(move |def| (kind, def)))
        .filter(|(_, def)| !matches!(def.value, PropValue::Bool(_)))
}

fn type_name(value: &PropValue) -> &'static str {
    match value {
        PropValue::String(_) => "STRING",
        PropValue::Int(_) => "INTEGER",
        PropValue::Real(_) | PropValue::Bool(_) => "REAL",
    }
}

fn write_value<W: Write>(value: &PropValue, out: &mut W) -> std::io::Result<()> {
    match value {
        PropValue::String(s) => write!(out, "\"{s}\" "),
        PropValue::Int(v) => write!(out, "{v} "),
        PropValue::Real(v) => write!(out, "{} ", format_real(*v)),
        PropValue::Bool(_) => Ok(()),
    }
}

/// Formats a real number the way C's `%G` does.
pub(crate) fn format_real(v: f64) -> String {
    const PRECISION: i32 = 6;

    if v.is_nan() {
        return "NAN".to_string();
    }
    if v.is_infinite() {
        return if v < 0.0 { "-INF" } else { "INF" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let sci = format!("{:.*e}", (PRECISION - 1) as usize, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let fixed = format!("{:.*}", (PRECISION - 1 - exp) as usize, v);
        trim_zeros(&fixed).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
