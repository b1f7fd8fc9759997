use serde_json::{json, Value};

use crate::infrastructure::llm_clients::schema::SchemaDescriptor;

fn scenario_item_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "ticketId": { "type": "STRING" },
            "feature": { "type": "STRING" },
            "scenario": { "type": "STRING" },
            "given": { "type": "STRING" },
            "when": { "type": "STRING" },
            "then": { "type": "STRING" },
            "priority": { "type": "STRING" }
        },
        "required": ["feature", "scenario", "given", "when", "then"],
        "propertyOrdering": ["ticketId", "feature", "scenario", "given", "when", "then", "priority"]
    })
}

/// Response schema of the primary analysis stage: one object carrying the
/// scenario array plus the two free-text blocks.
pub(crate) fn primary_schema() -> SchemaDescriptor {
    SchemaDescriptor::object(json!({
        "type": "OBJECT",
        "properties": {
            "scenarios": { "type": "ARRAY", "items": scenario_item_schema() },
            "impacts": { "type": "STRING" },
            "regressionTests": { "type": "STRING" }
        },
        "required": ["scenarios"],
        "propertyOrdering": ["scenarios", "impacts", "regressionTests"]
    }))
}

/// Response schema of the regression-conversion stage: a bare scenario
/// array.
pub(crate) fn conversion_schema() -> SchemaDescriptor {
    SchemaDescriptor::array(json!({
        "type": "ARRAY",
        "items": scenario_item_schema()
    }))
}
