use core::fmt;

use super::{
    constraint::ConstraintApplication, distribution::DistributionApplication,
    function::FunctionApplication,
};

/// Everything that can live on the operand stack or in a binding.
#[derive(Debug, Clone, PartialEq)]
pub enum StackValue {
    Number(f64),
    Text(String),
    Vector(Vec<StackValue>),
    Distribution(DistributionApplication),
    Function(FunctionApplication),
    Constraint(ConstraintApplication),
    Ref(NamedRef),
    Alignment(Alignment),
}

impl StackValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            StackValue::Number(_) => "number",
            StackValue::Text(_) => "text",
            StackValue::Vector(_) => "vector",
            StackValue::Distribution(_) => "distribution",
            StackValue::Function(_) => "function",
            StackValue::Constraint(_) => "constraint",
            StackValue::Ref(_) => "reference",
            StackValue::Alignment(_) => "alignment",
        }
    }

    /// Collects the names of every reference reachable from this value, in
    /// encounter order.
    pub fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            StackValue::Ref(reference) => out.push(reference.name()),
            StackValue::Vector(items) => {
                for item in items {
                    item.collect_references(out);
                }
            }
            StackValue::Distribution(app) => {
                for value in app.arguments.values() {
                    value.collect_references(out);
                }
            }
            StackValue::Function(app) => {
                for value in app.arguments.values() {
                    value.collect_references(out);
                }
            }
            StackValue::Constraint(app) => {
                for value in app.arguments.values() {
                    value.collect_references(out);
                }
            }
            StackValue::Number(_) | StackValue::Text(_) | StackValue::Alignment(_) => {}
        }
    }

    /// `false` if any number reachable from this value is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            StackValue::Number(n) => n.is_finite(),
            StackValue::Vector(items) => items.iter().all(StackValue::is_finite),
            StackValue::Distribution(app) => app.arguments.values().all(StackValue::is_finite),
            StackValue::Function(app) => app.arguments.values().all(StackValue::is_finite),
            StackValue::Constraint(app) => app.arguments.values().all(StackValue::is_finite),
            StackValue::Text(_) | StackValue::Ref(_) | StackValue::Alignment(_) => true,
        }
    }

    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }
}

impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StackValue::Number(n) => write!(f, "{}", n),
            StackValue::Text(s) => write!(f, "{:?}", s),
            StackValue::Vector(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            StackValue::Distribution(app) => write!(f, "<{}>", app.name()),
            StackValue::Function(app) => write!(f, "<{}>", app.name()),
            StackValue::Constraint(app) => write!(f, "<{}>", app.name()),
            StackValue::Ref(reference) => write!(f, "&{}", reference.name()),
            StackValue::Alignment(alignment) => write!(f, "<alignment of {} taxa>", alignment.len()),
        }
    }
}

/// Reference to another binding by name. Never a copy of its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedRef {
    name: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Taxon → sequence mapping, kept in literal order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alignment {
    sequences: Vec<(String, String)>,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a taxon. Returns `false` and leaves the alignment unchanged if the
    /// taxon is already present.
    pub fn insert(&mut self, taxon: impl Into<String>, sequence: impl Into<String>) -> bool {
        let taxon = taxon.into();
        if self.get(&taxon).is_some() {
            return false;
        }
        self.sequences.push((taxon, sequence.into()));
        true
    }

    pub fn get(&self, taxon: &str) -> Option<&str> {
        self.sequences
            .iter()
            .find(|(name, _)| name == taxon)
            .map(|(_, sequence)| sequence.as_str())
    }

    pub fn taxa(&self) -> impl Iterator<Item = &str> {
        self.sequences.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sequences
            .iter()
            .map(|(name, sequence)| (name.as_str(), sequence.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
