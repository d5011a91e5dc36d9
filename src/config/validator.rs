//! Configuration validation
//!
//! Runs before the device is touched, so user mistakes surface as
//! `InvalidArgument` instead of reaching the argument formatter's asserts.

use super::params::{ParamValue, ParameterSet};
use super::HarnessConfig;
use crate::error::BenchError;

/// Names the harness passes itself and will not take from a parameter set
const RESERVED_NAMES: &[&str] = &["forever"];

/// Validate complete configuration
pub fn validate_config(config: &HarnessConfig) -> Result<(), BenchError> {
    if config.erase.password.is_empty() || config.erase.password.chars().any(char::is_whitespace) {
        return Err(BenchError::InvalidArgument(
            "erase password must be non-empty and contain no whitespace".to_string(),
        ));
    }
    validate_run_parameters(&config.parameters, &config.workload)
}

/// Validate the engine and workload sets for one run
pub fn validate_run_parameters(parameters: &ParameterSet, workload: &ParameterSet) -> Result<(), BenchError> {
    validate_names(parameters, "engine")?;
    validate_names(workload, "workload")?;

    // The conditioning fill is unbounded; a duration would cut it short
    if parameters.contains("duration") {
        return Err(BenchError::InvalidArgument(
            "'duration' is a workload parameter and must not be set on the engine parameters".to_string(),
        ));
    }

    let overlap: Vec<&str> = parameters.names().filter(|name| workload.contains(name)).collect();
    if !overlap.is_empty() {
        return Err(BenchError::InvalidArgument(format!(
            "parameters set as both engine and workload parameters: {}",
            overlap.join(", ")
        )));
    }

    Ok(())
}

fn validate_names(set: &ParameterSet, kind: &str) -> Result<(), BenchError> {
    for (name, value) in set.iter() {
        let name = name.as_str();
        let problem = if name.is_empty() {
            Some("empty name")
        } else if name.starts_with('-') {
            Some("name must not start with '-'")
        } else if name.contains('=') {
            Some("name must not contain '='")
        } else if name.chars().any(char::is_whitespace) {
            Some("name must not contain whitespace")
        } else if RESERVED_NAMES.contains(&name) {
            Some("name is reserved by the harness")
        } else if matches!(value, ParamValue::Text(text) if text.starts_with('-')) {
            // Would be read by the engine as another flag
            Some("value must not start with '-'")
        } else {
            None
        };

        if let Some(problem) = problem {
            return Err(BenchError::InvalidArgument(format!(
                "{} parameter {:?}: {}",
                kind, name, problem
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ParameterSet {
        ParameterSet::new().with("block-size", 4096).with("extent-size", 1048576)
    }

    fn workload() -> ParameterSet {
        ParameterSet::new().with("duration", 60).with("concurrent", 4)
    }

    #[test]
    fn test_valid_sets() {
        assert!(validate_run_parameters(&engine(), &workload()).is_ok());
        assert!(validate_run_parameters(&ParameterSet::new(), &ParameterSet::new()).is_ok());
    }

    #[test]
    fn test_duration_on_engine_rejected() {
        let err = validate_run_parameters(&engine().with("duration", 5), &ParameterSet::new()).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn test_overlap_rejected() {
        let err = validate_run_parameters(&engine(), &workload().with("block-size", 512)).unwrap_err();
        assert!(err.to_string().contains("block-size"));
    }

    #[test]
    fn test_bad_names_rejected() {
        for name in ["", "--block-size", "block=size", "block size", "forever"] {
            let set = ParameterSet::new().with(name, 1);
            let err = validate_run_parameters(&set, &ParameterSet::new()).unwrap_err();
            assert!(matches!(err, BenchError::InvalidArgument(_)), "accepted {:?}", name);
        }
    }

    #[test]
    fn test_dashed_text_value_rejected() {
        let set = ParameterSet::new().with("x", "--duration");
        let err = validate_run_parameters(&set, &ParameterSet::new()).unwrap_err();
        assert!(matches!(err, BenchError::InvalidArgument(_)));
        assert!(err.to_string().contains("value must not start with '-'"));

        let set = ParameterSet::new().with("mode", "-1");
        assert!(validate_run_parameters(&ParameterSet::new(), &set).is_err());
    }

    #[test]
    fn test_dashed_value_rejected_from_config_file() {
        let config: HarnessConfig = ::toml::from_str("[parameters]\nx = \"--duration\"\n").unwrap();
        assert!(matches!(validate_config(&config), Err(BenchError::InvalidArgument(_))));
    }

    #[test]
    fn test_workload_names_checked() {
        let set = ParameterSet::new().with("-c", 4);
        let err = validate_run_parameters(&ParameterSet::new(), &set).unwrap_err();
        assert!(err.to_string().contains("workload"));
    }

    #[test]
    fn test_validate_config_password() {
        let mut config = HarnessConfig::default();
        assert!(validate_config(&config).is_ok());

        config.erase.password = "two words".to_string();
        assert!(validate_config(&config).is_err());
    }
}
