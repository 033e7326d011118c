use crate::features::field_spec::{FieldSpec, SchemaError, schema_for, specs_for_kind};
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Marker values entered for a two-marker panel, in model input order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct TwoMarkerInputs {
    #[schemars(
        title = "Eosinophil Relative Count (ERC, raw %)",
        description = "Eosinophil percentage from the blood test",
        range(min = 0.0, max = 100.0)
    )]
    pub erc: f64,

    #[schemars(
        title = "Eosinophil-to-Lymphocyte Ratio (ELR, raw)",
        description = "Absolute eosinophils divided by absolute lymphocytes",
        range(min = 0.0, max = 10.0)
    )]
    pub elr: f64,
}

/// Marker values entered for a five-marker panel, in model input order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct FiveMarkerInputs {
    #[schemars(
        title = "Age (years)",
        description = "Patient age at the time of the blood test",
        range(min = 0.0, max = 120.0)
    )]
    pub age: f64,

    #[schemars(
        title = "Eosinophil Relative Count (ERC, raw %)",
        description = "Eosinophil percentage from the blood test",
        range(min = 0.0, max = 100.0)
    )]
    pub erc: f64,

    #[schemars(
        title = "Neutrophil-to-Lymphocyte Ratio (NLR, raw)",
        description = "Absolute neutrophils divided by absolute lymphocytes",
        range(min = 0.0, max = 10.0)
    )]
    pub nlr: f64,

    #[schemars(
        title = "Basophil-to-Lymphocyte Ratio (BLR, raw)",
        description = "Absolute basophils divided by absolute lymphocytes",
        range(min = 0.0, max = 10.0)
    )]
    pub blr: f64,

    #[schemars(
        title = "Eosinophil-to-Lymphocyte Ratio (ELR, raw)",
        description = "Absolute eosinophils divided by absolute lymphocytes",
        range(min = 0.0, max = 10.0)
    )]
    pub elr: f64,
}

/// A filled-in marker panel. The discriminant, [`FeatureSchema`], is what a
/// deployment commits to; the models it loads must be fitted to that width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(FeatureSchema))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage, Hash))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum MarkerPanel {
    #[strum_discriminants(strum(
        message = "Two markers",
        detailed_message = "ERC and ELR."
    ))]
    TwoMarker(TwoMarkerInputs),
    #[strum_discriminants(strum(
        message = "Five markers",
        detailed_message = "Age, ERC, NLR, BLR and ELR."
    ))]
    FiveMarker(FiveMarkerInputs),
}

impl MarkerPanel {
    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::from(self)
    }

    /// Values in the order the models consume them.
    pub fn values(&self) -> Vec<f64> {
        match self {
            MarkerPanel::TwoMarker(p) => vec![p.erc, p.elr],
            MarkerPanel::FiveMarker(p) => vec![p.age, p.erc, p.nlr, p.blr, p.elr],
        }
    }
}

impl FeatureSchema {
    pub const TWO_MARKER_WIDTH: usize = 2;
    pub const FIVE_MARKER_WIDTH: usize = 5;

    /// Number of features every loaded artifact must accept.
    pub const fn width(self) -> usize {
        match self {
            FeatureSchema::TwoMarker => Self::TWO_MARKER_WIDTH,
            FeatureSchema::FiveMarker => Self::FIVE_MARKER_WIDTH,
        }
    }

    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Field titles, descriptions and documented bounds, in model input order.
    pub fn fields(self) -> Result<Vec<FieldSpec>, SchemaError> {
        let schema = schema_for::<MarkerPanel>();
        specs_for_kind(&schema, self.key())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        FeatureSchema::TwoMarker
    }
}

impl Serialize for FeatureSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for FeatureSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| D::Error::custom(format!("unknown marker panel '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use strum::{EnumMessage, IntoEnumIterator};

    #[test]
    fn width_matches_field_count() {
        for schema in FeatureSchema::iter() {
            let fields = schema.fields().unwrap();
            assert_eq!(fields.len(), schema.width(), "schema {schema}");
        }
    }

    #[test]
    fn two_marker_fields_in_model_order() {
        let fields = FeatureSchema::TwoMarker.fields().unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["erc", "elr"]);
        assert_eq!(fields[0].min, Some(0.0));
        assert_eq!(fields[0].max, Some(100.0));
        assert_eq!(fields[1].max, Some(10.0));
    }

    #[test]
    fn five_marker_fields_in_model_order() {
        let fields = FeatureSchema::FiveMarker.fields().unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["age", "erc", "nlr", "blr", "elr"]);
        assert!(fields.iter().all(|f| f.title.contains('(')));
    }

    #[test]
    fn values_follow_field_order() {
        let panel = MarkerPanel::FiveMarker(FiveMarkerInputs {
            age: 0.40,
            erc: 0.10,
            nlr: 0.20,
            blr: 0.05,
            elr: 0.15,
        });
        assert_eq!(panel.schema(), FeatureSchema::FiveMarker);
        assert_eq!(panel.values(), vec![0.40, 0.10, 0.20, 0.05, 0.15]);
    }

    #[test]
    fn tagged_panel_serialization() {
        let panel = MarkerPanel::TwoMarker(TwoMarkerInputs { erc: 2.5, elr: 0.3 });
        let v = serde_json::to_value(panel).unwrap();
        assert_eq!(v.get("type").and_then(Value::as_str), Some("two-marker"));
        assert_eq!(v["params"]["erc"].as_f64(), Some(2.5));

        let back: MarkerPanel =
            serde_json::from_value(json!({"type": "two-marker", "params": {"erc": 2.5, "elr": 0.3}}))
                .unwrap();
        assert_eq!(back, panel);
    }

    #[test]
    fn schema_key_roundtrips_through_serde() {
        let v = serde_json::to_value(FeatureSchema::FiveMarker).unwrap();
        assert_eq!(v, json!("five-marker"));
        let back: FeatureSchema = serde_json::from_value(v).unwrap();
        assert_eq!(back, FeatureSchema::FiveMarker);

        let err = serde_json::from_value::<FeatureSchema>(json!("three-marker")).unwrap_err();
        assert!(err.to_string().contains("three-marker"));
    }

    #[test]
    fn discriminant_messages_available() {
        assert_eq!(FeatureSchema::TwoMarker.get_message(), Some("Two markers"));
        assert!(FeatureSchema::FiveMarker.get_detailed_message().is_some());
    }
}
