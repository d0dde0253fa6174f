use crate::enums::FieldType;
use crate::pattern::DenormalizedPattern;
use hashbrown::HashMap as FastHashMap;
use std::sync::Arc;

pub type PatternName = String;
pub type FieldTypes = FastHashMap<String, FieldType>;
pub type PatternLayer = FastHashMap<PatternName, Arc<DenormalizedPattern>>;
pub type Definitions = FastHashMap<PatternName, String>;
