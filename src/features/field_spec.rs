use schemars::Schema;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("panel schema is malformed: {0}")]
    Malformed(&'static str),

    #[error("no panel named '{0}' in schema")]
    UnknownPanel(String),

    #[error("failed to resolve $ref for field '{0}'")]
    UnresolvedRef(String),
}

/// One numeric input of a marker panel, as described by its JSON schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldSpec {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && self.min.is_none_or(|lo| value >= lo)
            && self.max.is_none_or(|hi| value <= hi)
    }

    /// Human readable bounds, e.g. `[0, 100]`.
    pub fn range_label(&self) -> String {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => format!("[{lo}, {hi}]"),
            (Some(lo), None) => format!("≥ {lo}"),
            (None, Some(hi)) => format!("≤ {hi}"),
            (None, None) => "any".to_string(),
        }
    }
}

pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schemars::schema_for!(T)
}

/// Extracts the ordered numeric fields of the `params` object belonging to the
/// tagged-enum branch whose `type` discriminant equals `kind_key`.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>, SchemaError> {
    let root_obj = root
        .as_object()
        .ok_or(SchemaError::Malformed("root schema is not an object"))?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .ok_or(SchemaError::Malformed("missing oneOf/anyOf"))?;

    for branch in alts {
        let bobj = branch
            .as_object()
            .ok_or(SchemaError::Malformed("branch is not an object"))?;
        let Some(props) = bobj.get("properties").and_then(|v| v.as_object()) else {
            continue;
        };

        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let Some(params_obj) = props.get("params").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };
        let Some(params_obj) = resolve_ref_obj(root_obj, params_obj) else {
            return Err(SchemaError::UnresolvedRef("params".to_string()));
        };
        let Some(params_props) = params_obj.get("properties").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };

        let mut out = Vec::with_capacity(params_props.len());
        for (name, field_schema) in params_props {
            let mut fs_obj = field_schema
                .as_object()
                .ok_or(SchemaError::Malformed("field schema is not an object"))?;

            if fs_obj.get("$ref").is_some() {
                fs_obj = resolve_ref_obj(root_obj, fs_obj)
                    .ok_or_else(|| SchemaError::UnresolvedRef(name.clone()))?;
            }

            if !is_numeric(fs_obj.get("type")) {
                continue;
            }

            let title = fs_obj
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or(name)
                .to_string();

            let description = fs_obj
                .get("description")
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let min = fs_obj
                .get("minimum")
                .or_else(|| fs_obj.get("exclusiveMinimum"))
                .and_then(|v| v.as_f64());

            let max = fs_obj
                .get("maximum")
                .or_else(|| fs_obj.get("exclusiveMaximum"))
                .and_then(|v| v.as_f64());

            out.push(FieldSpec {
                name: name.clone(),
                title,
                description,
                min,
                max,
            });
        }

        return Ok(out);
    }

    Err(SchemaError::UnknownPanel(kind_key.to_string()))
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tobj) = props.get("type").and_then(|v| v.as_object()) else {
        return false;
    };

    if tobj.get("const").and_then(|v| v.as_str()) == Some(kind_key) {
        return true;
    }
    if let Some(arr) = tobj.get("enum").and_then(|v| v.as_array()) {
        if arr.len() == 1 && arr[0].as_str() == Some(kind_key) {
            return true;
        }
    }
    false
}

/// Resolve a local $ref like "#/$defs/TwoMarkerInputs" against the root object.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn is_numeric(ty: Option<&Value>) -> bool {
    match ty {
        Some(Value::String(s)) => matches!(s.as_str(), "number" | "integer"),
        // unions like ["null","number"] for Option<f64>
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .any(|s| matches!(s, "number" | "integer")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_from(v: Value) -> Schema {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn resolves_params_ref_and_keeps_order() {
        let root = schema_from(json!({
            "oneOf": [{
                "type": "object",
                "properties": {
                    "type": { "type": "string", "const": "panel" },
                    "params": { "$ref": "#/$defs/Inputs" }
                }
            }],
            "$defs": {
                "Inputs": {
                    "type": "object",
                    "properties": {
                        "zeta": { "type": "number", "title": "Zeta", "minimum": 1.0 },
                        "alpha": { "type": "number", "maximum": 2.0 },
                        "label": { "type": "string" }
                    }
                }
            }
        }));

        let specs = specs_for_kind(&root, "panel").unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "zeta");
        assert_eq!(specs[0].title, "Zeta");
        assert_eq!(specs[0].min, Some(1.0));
        assert_eq!(specs[1].title, "alpha");
        assert_eq!(specs[1].max, Some(2.0));
    }

    #[test]
    fn unknown_discriminant_is_an_error() {
        let root = schema_from(json!({ "oneOf": [] }));
        assert_eq!(
            specs_for_kind(&root, "nope"),
            Err(SchemaError::UnknownPanel("nope".into()))
        );
    }

    #[test]
    fn missing_alternatives_is_malformed() {
        let root = schema_from(json!({ "type": "object" }));
        assert!(matches!(
            specs_for_kind(&root, "x"),
            Err(SchemaError::Malformed(_))
        ));
    }

    #[test]
    fn contains_respects_bounds_and_rejects_non_finite() {
        let spec = FieldSpec {
            name: "erc".into(),
            title: "ERC".into(),
            description: None,
            min: Some(0.0),
            max: Some(100.0),
        };
        assert!(spec.contains(0.0));
        assert!(spec.contains(100.0));
        assert!(!spec.contains(-1.0));
        assert!(!spec.contains(100.01));
        assert!(!spec.contains(f64::NAN));
        assert_eq!(spec.range_label(), "[0, 100]");
    }
}
