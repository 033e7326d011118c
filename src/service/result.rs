use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumMessage};

/// Binary flare-up prediction. Encoded as `0`/`1` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumMessage)]
pub enum RiskFlag {
    #[strum(to_string = "No", message = "no future flare predicted")]
    NoFlare,
    #[strum(to_string = "Yes", message = "future flare predicted")]
    Flare,
}

impl RiskFlag {
    pub fn as_label(self) -> u8 {
        match self {
            RiskFlag::NoFlare => 0,
            RiskFlag::Flare => 1,
        }
    }

    pub fn is_flare(self) -> bool {
        self == RiskFlag::Flare
    }

    /// Maps a classifier output onto a flag. Loaded classifiers only ever
    /// emit `0.0` or `1.0`.
    pub(crate) fn from_model_output(label: f64) -> Self {
        if label >= 0.5 {
            RiskFlag::Flare
        } else {
            RiskFlag::NoFlare
        }
    }
}

impl From<bool> for RiskFlag {
    fn from(flare: bool) -> Self {
        if flare { RiskFlag::Flare } else { RiskFlag::NoFlare }
    }
}

impl TryFrom<u8> for RiskFlag {
    type Error = u8;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        match label {
            0 => Ok(RiskFlag::NoFlare),
            1 => Ok(RiskFlag::Flare),
            other => Err(other),
        }
    }
}

impl Serialize for RiskFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_label())
    }
}

impl<'de> Deserialize<'de> for RiskFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = u8::deserialize(deserializer)?;
        RiskFlag::try_from(label)
            .map_err(|other| D::Error::custom(format!("risk label must be 0 or 1, got {other}")))
    }
}

/// Output of one prediction. `score` keeps full precision; rounding happens
/// when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub score: f64,
    pub risk: RiskFlag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labels_are_zero_and_one() {
        assert_eq!(RiskFlag::NoFlare.as_label(), 0);
        assert_eq!(RiskFlag::Flare.as_label(), 1);
        assert_eq!(RiskFlag::try_from(2u8), Err(2));
        assert_eq!(RiskFlag::from(true), RiskFlag::Flare);
    }

    #[test]
    fn model_output_mapping() {
        assert_eq!(RiskFlag::from_model_output(0.0), RiskFlag::NoFlare);
        assert_eq!(RiskFlag::from_model_output(1.0), RiskFlag::Flare);
    }

    #[test]
    fn display_reads_yes_no() {
        assert_eq!(RiskFlag::Flare.to_string(), "Yes");
        assert_eq!(RiskFlag::NoFlare.to_string(), "No");
    }

    #[test]
    fn result_serializes_risk_as_integer_and_full_precision_score() {
        let r = PredictionResult {
            score: 3.14159265,
            risk: RiskFlag::Flare,
        };
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v, json!({ "score": 3.14159265, "risk": 1 }));
        let back: PredictionResult = serde_json::from_value(v).unwrap();
        assert_eq!(back, r);

        let bad = serde_json::from_value::<PredictionResult>(json!({ "score": 1.0, "risk": 3 }));
        assert!(bad.is_err());
    }
}
