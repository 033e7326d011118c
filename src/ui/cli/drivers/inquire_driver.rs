use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::{Confirm, CustomType, validator::Validation};

pub struct InquireDriver;

fn range_check(x: f64, min: Option<f64>, max: Option<f64>) -> Validation {
    if !x.is_finite() {
        return Validation::Invalid("Must be a finite number".into());
    }
    match (min, max) {
        (Some(lo), Some(hi)) if x < lo || x > hi => {
            Validation::Invalid(format!("Must be between {lo} and {hi}").into())
        }
        (Some(lo), None) if x < lo => Validation::Invalid(format!("Must be ≥ {lo}").into()),
        (None, Some(hi)) if x > hi => Validation::Invalid(format!("Must be ≤ {hi}").into()),
        _ => Validation::Valid,
    }
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        Ok(CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help)
            .with_error_message("Please type a number, e.g. 2.50")
            .with_validator(move |x: &f64| Ok(range_check(*x, min, max)))
            .prompt()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(v: Validation) -> bool {
        matches!(v, Validation::Valid)
    }

    #[test]
    fn bounded_range() {
        assert!(is_valid(range_check(0.0, Some(0.0), Some(100.0))));
        assert!(is_valid(range_check(100.0, Some(0.0), Some(100.0))));
        assert!(!is_valid(range_check(-1.0, Some(0.0), Some(100.0))));
        assert!(!is_valid(range_check(100.5, Some(0.0), Some(100.0))));
    }

    #[test]
    fn half_open_and_unbounded() {
        assert!(!is_valid(range_check(-0.1, Some(0.0), None)));
        assert!(is_valid(range_check(1e9, Some(0.0), None)));
        assert!(!is_valid(range_check(11.0, None, Some(10.0))));
        assert!(is_valid(range_check(-5.0, None, None)));
        assert!(!is_valid(range_check(f64::NAN, None, None)));
    }
}
