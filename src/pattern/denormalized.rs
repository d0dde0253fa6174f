use crate::enums::FieldType;
use crate::types::FieldTypes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenormalizedPattern {
    original: String,
    expanded: String,
    field_types: FieldTypes,
}

impl DenormalizedPattern {
    pub fn new(
        original: impl Into<String>,
        expanded: impl Into<String>,
        field_types: FieldTypes,
    ) -> Self {
        Self {
            original: original.into(),
            expanded: expanded.into(),
            field_types,
        }
    }

    pub fn literal(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Self {
            original: expression.clone(),
            expanded: expression,
            field_types: FieldTypes::default(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn expanded(&self) -> &str {
        &self.expanded
    }

    pub fn field_types(&self) -> &FieldTypes {
        &self.field_types
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.field_types.get(name).copied()
    }

    pub fn has_field_types(&self) -> bool {
        !self.field_types.is_empty()
    }
}
