use serde_json::{json, Map, Value};

use crate::schema::{LogicalType, PrimitiveKind, SchemaError, SchemaField, SchemaRecord};

/// Canonical text of a schema record: Avro-style JSON, pretty printed.
/// Key order is fixed, so equal records always render to equal bytes.
pub struct SchemaText;

impl SchemaText {
    pub fn render(record: &SchemaRecord, namespace: &str) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(&Self::to_json(record, namespace))
            .map_err(|error| SchemaError::Render(error.to_string()))
    }

    pub fn to_json(record: &SchemaRecord, namespace: &str) -> Value {
        Self::record_json(&record.name, namespace, &record.fields)
    }

    fn record_json(name: &str, namespace: &str, fields: &[SchemaField]) -> Value {
        let child_namespace = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", namespace, name)
        };

        let mut object = Map::new();
        object.insert("type".into(), json!("record"));
        object.insert("name".into(), json!(name));
        if !namespace.is_empty() {
            object.insert("namespace".into(), json!(namespace));
        }
        let fields = fields.iter().map(|field| Self::field_json(field, &child_namespace)).collect::<Vec<_>>();
        object.insert("fields".into(), Value::Array(fields));
        Value::Object(object)
    }

    fn field_json(field: &SchemaField, namespace: &str) -> Value {
        let mut object = Map::new();
        object.insert("name".into(), json!(field.name));
        object.insert("type".into(), Self::type_json(&field.ty, &field.name, namespace));
        if let Some(doc) = &field.doc {
            object.insert("doc".into(), json!(doc));
        }
        if field.ty.is_nullable() {
            object.insert("default".into(), Value::Null);
        }
        Value::Object(object)
    }

    // named types (records, enums) take the name of the field holding them
    fn type_json(ty: &LogicalType, field_name: &str, namespace: &str) -> Value {
        match ty {
            LogicalType::Primitive(kind) => Self::primitive_json(*kind),
            LogicalType::Struct(fields) => Self::record_json(field_name, namespace, fields),
            LogicalType::Array(element) => json!({
                "type": "array",
                "items": Self::type_json(element, field_name, namespace)
            }),
            LogicalType::Map { key, value } => {
                let mut object = Map::new();
                object.insert("type".into(), json!("map"));
                object.insert("values".into(), Self::type_json(value, field_name, namespace));
                if key.non_null() != &LogicalType::Primitive(PrimitiveKind::String) {
                    object.insert("keys".into(), Self::type_json(key, field_name, namespace));
                }
                Value::Object(object)
            }
            LogicalType::Enum(symbols) => {
                let mut object = Map::new();
                object.insert("type".into(), json!("enum"));
                object.insert("name".into(), json!(field_name));
                if !namespace.is_empty() {
                    object.insert("namespace".into(), json!(namespace));
                }
                object.insert("symbols".into(), json!(symbols));
                Value::Object(object)
            }
            LogicalType::Nullable(inner) => json!(["null", Self::type_json(inner, field_name, namespace)]),
        }
    }

    fn primitive_json(kind: PrimitiveKind) -> Value {
        match kind {
            PrimitiveKind::Null => json!("null"),
            PrimitiveKind::Boolean => json!("boolean"),
            PrimitiveKind::TinyInt | PrimitiveKind::SmallInt | PrimitiveKind::Int => json!("int"),
            PrimitiveKind::Long => json!("long"),
            PrimitiveKind::Float => json!("float"),
            PrimitiveKind::Double => json!("double"),
            PrimitiveKind::String => json!("string"),
            PrimitiveKind::Bytes => json!("bytes"),
            PrimitiveKind::Date => json!({ "type": "int", "logicalType": "date" }),
            PrimitiveKind::Timestamp => json!({ "type": "long", "logicalType": "timestamp-millis" }),
            PrimitiveKind::Decimal { precision, scale } => json!({
                "type": "bytes",
                "logicalType": "decimal",
                "precision": precision,
                "scale": scale
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(kind: PrimitiveKind) -> LogicalType {
        LogicalType::primitive(kind)
    }

    #[test]
    fn renders_nullable_union_with_default() {
        let record = SchemaRecord::new("t", vec![
            SchemaField::new("Id", p(PrimitiveKind::Int)).with_doc(Some("row id".into())),
            SchemaField::new("Name", LogicalType::nullable(p(PrimitiveKind::String))),
        ]);

        let value = SchemaText::to_json(&record, "default");
        assert_eq!(value, json!({
            "type": "record",
            "name": "t",
            "namespace": "default",
            "fields": [
                { "name": "Id", "type": "int", "doc": "row id" },
                { "name": "Name", "type": ["null", "string"], "default": null }
            ]
        }));
    }

    #[test]
    fn nested_records_and_enums_use_field_names() {
        let record = SchemaRecord::new("v", vec![
            SchemaField::new("Struct_Col", LogicalType::Struct(vec![
                SchemaField::new("Suit", LogicalType::Enum(vec!["SPADES".into(), "HEARTS".into()])),
            ])),
        ]);

        let value = SchemaText::to_json(&record, "ns");
        assert_eq!(value["fields"][0]["type"], json!({
            "type": "record",
            "name": "Struct_Col",
            "namespace": "ns.v",
            "fields": [
                {
                    "name": "Suit",
                    "type": { "type": "enum", "name": "Suit", "namespace": "ns.v.Struct_Col", "symbols": ["SPADES", "HEARTS"] }
                }
            ]
        }));
    }

    #[test]
    fn maps_emit_keys_only_when_not_string() {
        let string_keys = LogicalType::map(p(PrimitiveKind::String), p(PrimitiveKind::Long));
        let int_keys = LogicalType::map(p(PrimitiveKind::Int), p(PrimitiveKind::Long));
        let record = SchemaRecord::new("m", vec![
            SchemaField::new("a", string_keys),
            SchemaField::new("b", int_keys),
        ]);

        let value = SchemaText::to_json(&record, "");
        assert!(value.get("namespace").is_none());
        assert_eq!(value["fields"][0]["type"], json!({ "type": "map", "values": "long" }));
        assert_eq!(value["fields"][1]["type"], json!({ "type": "map", "values": "long", "keys": "int" }));
    }

    #[test]
    fn logical_types() {
        let record = SchemaRecord::new("l", vec![
            SchemaField::new("d", p(PrimitiveKind::Date)),
            SchemaField::new("amount", p(PrimitiveKind::Decimal { precision: 10, scale: 2 })),
            SchemaField::new("small", p(PrimitiveKind::SmallInt)),
        ]);
        let value = SchemaText::to_json(&record, "x");
        assert_eq!(value["fields"][0]["type"], json!({ "type": "int", "logicalType": "date" }));
        assert_eq!(
            value["fields"][1]["type"],
            json!({ "type": "bytes", "logicalType": "decimal", "precision": 10, "scale": 2 })
        );
        assert_eq!(value["fields"][2]["type"], json!("int"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let record = SchemaRecord::new("t", vec![
            SchemaField::new("b", p(PrimitiveKind::Int)),
            SchemaField::new("a", p(PrimitiveKind::Int)),
        ]);
        let first = SchemaText::render(&record, "default").unwrap();
        let second = SchemaText::render(&record.clone(), "default").unwrap();
        assert_eq!(first, second);
        assert!(first.find("\"b\"").unwrap() < first.find("\"a\"").unwrap());
    }
}
