use crate::features::{FeatureSchema, FeatureVector};
use rand::Rng;

/// Draws a vector whose every field lies within its documented bounds.
pub fn random_valid_vector<R: Rng>(schema: FeatureSchema, rng: &mut R) -> FeatureVector {
    let specs = schema.fields().expect("static panel schema");
    specs
        .iter()
        .map(|s| {
            let lo = s.min.unwrap_or(0.0);
            let hi = s.max.unwrap_or(lo + 100.0);
            rng.random_range(lo..=hi)
        })
        .collect::<Vec<f64>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::validate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn samples_pass_validation() {
        let mut rng = StdRng::seed_from_u64(42);
        for schema in [FeatureSchema::TwoMarker, FeatureSchema::FiveMarker] {
            for _ in 0..500 {
                let v = random_valid_vector(schema, &mut rng);
                assert_eq!(validate(schema, &v), Ok(()));
            }
        }
    }
}
