use chrono::{DateTime, SecondsFormat, Utc};
use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::{json, Map, Value};

use super::ExportResult;
use crate::model::{Alignment, Arguments, StackValue, TypeTag};

/// Name-keyed entries that serialize as a JSON object in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries<T>(Vec<(String, T)>);

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Entries<T> {
    pub fn push(&mut self, name: impl Into<String>, entry: T) {
        self.0.push((name.into(), entry));
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Serialize> Serialize for Entries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, entry) in &self.0 {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// The interchange document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub codephy_version: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    pub random_variables: Entries<RandomVariableEntry>,
    pub deterministic_functions: Entries<FunctionEntry>,
    pub constraints: Entries<ConstraintEntry>,
    #[serde(skip_serializing_if = "Entries::is_empty")]
    pub observed_data: Entries<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomVariableEntry {
    pub distribution: DistributionEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_value: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub generates: TypeTag,
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionEntry {
    pub function: String,
    pub arguments: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub parameters: Map<String, Value>,
}

impl Document {
    pub fn new(codephy_version: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            codephy_version: codephy_version.into(),
            model: model.into(),
            metadata: None,
            random_variables: Entries::default(),
            deterministic_functions: Entries::default(),
            constraints: Entries::default(),
            observed_data: Entries::default(),
        }
    }

    /// Number of named entries across all groups.
    pub fn len(&self) -> usize {
        self.random_variables.len()
            + self.deterministic_functions.len()
            + self.constraints.len()
            + self.observed_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_value(&self) -> ExportResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self, pretty: bool) -> ExportResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Provenance block the command line attaches to a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub tool: String,
    pub version: String,
    pub created: String,
}

impl Metadata {
    pub fn stamp(title: Option<String>, source: Option<String>) -> Self {
        Self::at(title, source, Utc::now())
    }

    pub fn at(title: Option<String>, source: Option<String>, created: DateTime<Utc>) -> Self {
        Self {
            title,
            source,
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            created: created.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn to_value(&self) -> ExportResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Renders a value in argument position.
pub fn render_value(value: &StackValue) -> Value {
    match value {
        StackValue::Number(n) => json!(n),
        StackValue::Text(s) => Value::String(s.clone()),
        StackValue::Vector(items) => Value::Array(items.iter().map(render_value).collect()),
        StackValue::Ref(reference) => json!({ "variable": reference.name() }),
        StackValue::Function(app) => json!({
            "function": app.name(),
            "arguments": render_arguments(&app.arguments),
        }),
        StackValue::Distribution(app) => json!({
            "type": app.name(),
            "generates": app.generates(),
            "parameters": render_arguments(&app.arguments),
        }),
        StackValue::Constraint(app) => json!({
            "type": app.name(),
            "parameters": render_arguments(&app.arguments),
        }),
        StackValue::Alignment(alignment) => Value::Object(render_alignment(alignment)),
    }
}

pub fn render_arguments(arguments: &Arguments) -> Map<String, Value> {
    arguments
        .iter()
        .map(|(name, value)| (name.to_string(), render_value(value)))
        .collect()
}

pub fn render_alignment(alignment: &Alignment) -> Map<String, Value> {
    alignment
        .iter()
        .map(|(taxon, sequence)| (taxon.to_string(), Value::String(sequence.to_string())))
        .collect()
}
