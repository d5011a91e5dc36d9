//! Parameter set to command-line token conversion

use crate::config::params::ParameterSet;

/// Format a parameter set as `["--KEY1", "VALUE1", "--KEY2", "VALUE2", ...]`
///
/// Produces exactly two tokens per entry, in the set's (name-sorted) order.
///
/// # Panics
///
/// Panics if a name begins with `-`. Names are validated when the run is
/// configured, so reaching this with a dashed name is a bug.
pub fn to_args(params: &ParameterSet) -> Vec<String> {
    let mut args = Vec::with_capacity(params.len() * 2);
    for (name, value) in params {
        assert!(
            !name.starts_with('-'),
            "parameter name must not start with '-': {:?}",
            name
        );
        args.push(format!("--{}", name));
        args.push(value.to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        assert!(to_args(&ParameterSet::new()).is_empty());
    }

    #[test]
    fn test_flag_value_pairs() {
        let params = ParameterSet::new()
            .with("block-size", 4096)
            .with("extent-size", 1048576)
            .with("mode", "direct");

        let args = to_args(&params);
        assert_eq!(args.len(), 2 * params.len());
        assert_eq!(
            args,
            vec!["--block-size", "4096", "--extent-size", "1048576", "--mode", "direct"]
        );
    }

    #[test]
    fn test_alternating_layout() {
        let params = ParameterSet::new()
            .with("duration", 60)
            .with("concurrent", 4)
            .with("inserts-per-txn", 10)
            .with("updates-per-txn", 2);

        let args = to_args(&params);
        assert_eq!(args.len(), 8);
        for pair in args.chunks(2) {
            assert!(pair[0].starts_with("--"));
            assert!(!pair[1].starts_with("--"));
        }
    }

    #[test]
    fn test_deterministic_within_call_sequence() {
        let params = ParameterSet::new().with("b", 2).with("a", 1);
        assert_eq!(to_args(&params), to_args(&params.clone()));
    }

    #[test]
    #[should_panic(expected = "must not start with '-'")]
    fn test_rejects_dashed_name() {
        let params = ParameterSet::new().with("--block-size", 4096);
        to_args(&params);
    }
}
