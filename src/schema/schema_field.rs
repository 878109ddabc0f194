use crate::schema::{LogicalType, SchemaError};

/// A named, typed output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub ty: LogicalType,
    pub doc: Option<String>,
}

/// Output row shape of a relational node. Field order mirrors projection
/// order and is never sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRecord {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

impl SchemaField {
    pub fn new(name: &str, ty: LogicalType) -> Self {
        Self { name: name.to_string(), ty, doc: None }
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    fn to_lowercase(&self) -> SchemaField {
        SchemaField {
            name: self.name.to_lowercase(),
            ty: lowercase_type(&self.ty),
            doc: self.doc.clone(),
        }
    }
}

fn lowercase_type(ty: &LogicalType) -> LogicalType {
    match ty {
        LogicalType::Primitive(_) | LogicalType::Enum(_) => ty.clone(),
        LogicalType::Struct(fields) => LogicalType::Struct(fields.iter().map(SchemaField::to_lowercase).collect()),
        LogicalType::Array(element) => LogicalType::array(lowercase_type(element)),
        LogicalType::Map { key, value } => LogicalType::map(lowercase_type(key), lowercase_type(value)),
        LogicalType::Nullable(inner) => LogicalType::Nullable(Box::new(lowercase_type(inner))),
    }
}

/// Find `name` among `fields`: an exact match wins, otherwise a single
/// case-insensitive match. Returns the field's position.
pub fn resolve_field_position(fields: &[SchemaField], name: &str) -> Result<usize, SchemaError> {
    if let Some(position) = fields.iter().position(|field| field.name == name) {
        return Ok(position);
    }

    let mut matches = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.name.eq_ignore_ascii_case(name))
        .map(|(position, _)| position);

    match (matches.next(), matches.next()) {
        (Some(position), None) => Ok(position),
        _ => Err(SchemaError::UnresolvedColumnReference {
            name: name.to_string(),
            candidates: fields.iter().map(|field| field.name.clone()).collect(),
        }),
    }
}

impl SchemaRecord {
    pub fn new(name: &str, fields: Vec<SchemaField>) -> Self {
        Self { name: name.to_string(), fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    pub fn position_of(&self, name: &str) -> Result<usize, SchemaError> {
        resolve_field_position(&self.fields, name)
    }

    pub fn resolve(&self, name: &str) -> Result<&SchemaField, SchemaError> {
        let position = self.position_of(name)?;
        Ok(&self.fields[position])
    }

    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Lowercase every field name, nested struct members included.
    pub fn to_lowercase(&self) -> SchemaRecord {
        SchemaRecord {
            name: self.name.clone(),
            fields: self.fields.iter().map(SchemaField::to_lowercase).collect(),
        }
    }
}
