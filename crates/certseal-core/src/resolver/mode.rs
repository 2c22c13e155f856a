//! Resolution modes and the answers they build

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// How values from several sources are folded into one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Highest-precedence match wins
    #[default]
    #[serde(alias = "priority")]
    First,
    /// Concatenate matching sequences
    Array,
    /// Merge matching mappings, earlier sources win
    Hash,
}

impl ResolutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMode::First => "first",
            ResolutionMode::Array => "array",
            ResolutionMode::Hash => "hash",
        }
    }
}

impl std::fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" | "priority" => Ok(ResolutionMode::First),
            "array" => Ok(ResolutionMode::Array),
            "hash" => Ok(ResolutionMode::Hash),
            other => Err(format!("unknown resolution mode '{other}'")),
        }
    }
}

/// The result of one lookup; its shape always matches the mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    First(Option<Value>),
    Array(Vec<Value>),
    Hash(Mapping),
}

impl Answer {
    /// The accumulator a lookup starts from
    pub fn empty(mode: ResolutionMode) -> Self {
        match mode {
            ResolutionMode::First => Answer::First(None),
            ResolutionMode::Array => Answer::Array(Vec::new()),
            ResolutionMode::Hash => Answer::Hash(Mapping::new()),
        }
    }

    pub fn mode(&self) -> ResolutionMode {
        match self {
            Answer::First(_) => ResolutionMode::First,
            Answer::Array(_) => ResolutionMode::Array,
            Answer::Hash(_) => ResolutionMode::Hash,
        }
    }

    /// True when no source contributed
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::First(value) => value.is_none(),
            Answer::Array(values) => values.is_empty(),
            Answer::Hash(map) => map.is_empty(),
        }
    }

    /// Convert to a plain YAML value; `None` only for an absent `First` answer
    pub fn into_value(self) -> Option<Value> {
        match self {
            Answer::First(value) => value,
            Answer::Array(values) => Some(Value::Sequence(values)),
            Answer::Hash(map) => Some(Value::Mapping(map)),
        }
    }
}

/// Short name of a value's shape, for error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("first".parse::<ResolutionMode>().unwrap(), ResolutionMode::First);
        assert_eq!("priority".parse::<ResolutionMode>().unwrap(), ResolutionMode::First);
        assert_eq!("ARRAY".parse::<ResolutionMode>().unwrap(), ResolutionMode::Array);
        assert_eq!("hash".parse::<ResolutionMode>().unwrap(), ResolutionMode::Hash);
        assert!("merge".parse::<ResolutionMode>().is_err());
    }

    #[test]
    fn test_empty_answers() {
        for mode in [ResolutionMode::First, ResolutionMode::Array, ResolutionMode::Hash] {
            let answer = Answer::empty(mode);
            assert!(answer.is_empty());
            assert_eq!(answer.mode(), mode);
        }
        assert_eq!(Answer::empty(ResolutionMode::First).into_value(), None);
        assert_eq!(
            Answer::empty(ResolutionMode::Array).into_value(),
            Some(Value::Sequence(vec![]))
        );
    }

    #[test]
    fn test_answer_serializes_to_plain_shape() {
        let answer = Answer::Array(vec![Value::from(1), Value::from("two")]);
        assert_eq!(serde_yaml::to_string(&answer).unwrap(), "- 1\n- two\n");

        let absent = Answer::empty(ResolutionMode::First);
        assert_eq!(serde_yaml::to_string(&absent).unwrap().trim(), "null");

        let mut map = Mapping::new();
        map.insert(Value::from("x"), Value::from(1));
        let json = serde_json::to_string(&Answer::Hash(map)).unwrap();
        assert_eq!(json, r#"{"x":1}"#);
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: ResolutionMode = serde_json::from_str("\"priority\"").unwrap();
        assert_eq!(mode, ResolutionMode::First);
        let mode: ResolutionMode = serde_yaml::from_str("hash").unwrap();
        assert_eq!(mode, ResolutionMode::Hash);
    }
}
