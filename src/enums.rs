use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a captured field, taken from the third part of a
/// `%{SYNTAX:alias:type}` reference.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "str")]
    String = 0,
    #[serde(rename = "int")]
    Integer = 1,
    #[serde(rename = "float")]
    Float = 2,
    #[serde(rename = "bool")]
    Boolean = 3,
}

impl FieldType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" | "str" => Some(FieldType::String),
            "int" => Some(FieldType::Integer),
            "float" => Some(FieldType::Float),
            "bool" => Some(FieldType::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "str",
            FieldType::Integer => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "bool",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
