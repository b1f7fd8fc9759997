use serde_json::Value;

/// Expected root shape of a schema-constrained generation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaShape {
    Object,
    Array,
}

/// Structural description of the response the generation endpoint must
/// produce: the `responseSchema` document sent with the request plus the
/// root shape enforced against the decoded payload.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    shape: SchemaShape,
    schema: Value,
}

impl SchemaDescriptor {
    pub fn object(schema: Value) -> Self {
        Self {
            shape: SchemaShape::Object,
            schema,
        }
    }

    pub fn array(schema: Value) -> Self {
        Self {
            shape: SchemaShape::Array,
            schema,
        }
    }

    pub fn shape(&self) -> SchemaShape {
        self.shape
    }

    pub fn as_json(&self) -> &Value {
        &self.schema
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self.shape {
            SchemaShape::Object => value.is_object(),
            SchemaShape::Array => value.is_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_object_descriptor_rejects_array() {
        let descriptor = SchemaDescriptor::object(json!({ "type": "OBJECT" }));
        assert!(descriptor.matches(&json!({})));
        assert!(!descriptor.matches(&json!([])));
        assert!(!descriptor.matches(&json!("texto")));
    }

    #[test]
    fn test_array_descriptor_rejects_object() {
        let descriptor = SchemaDescriptor::array(json!({ "type": "ARRAY" }));
        assert!(descriptor.matches(&json!([1, 2])));
        assert!(!descriptor.matches(&json!({})));
    }

    #[test]
    fn test_descriptor_carries_schema_document() {
        let descriptor = SchemaDescriptor::array(json!({ "type": "ARRAY" }));
        assert_eq!(descriptor.as_json()["type"], "ARRAY");
        assert_eq!(descriptor.shape(), SchemaShape::Array);
    }
}
