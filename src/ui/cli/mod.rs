pub mod drivers;
pub mod form;

pub use form::{collect_features, predict_once, prompt_features_until_valid, run_session, write_schema};
