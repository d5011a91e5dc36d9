//! JSON output formatting

use crate::config::params::ParameterSet;
use crate::pipeline::RunResult;
use crate::target::BlockDevice;
use serde::Serialize;

/// Single-run result record
#[derive(Debug, Clone, Serialize)]
pub struct JsonResult<'a> {
    pub device: &'a str,
    pub elapsed_seconds: f64,
    pub parameters: &'a ParameterSet,
    pub workload: &'a ParameterSet,
}

impl<'a> JsonResult<'a> {
    pub fn new(
        device: &'a BlockDevice,
        result: &RunResult,
        parameters: &'a ParameterSet,
        workload: &'a ParameterSet,
    ) -> Self {
        Self {
            device: device.as_str(),
            elapsed_seconds: result.elapsed_secs,
            parameters,
            workload,
        }
    }
}

/// Serialize the result record as pretty-printed JSON
pub fn format_result(record: &JsonResult<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::block::tests::FakeBlockProbe;

    #[test]
    fn test_json_record() {
        let device = BlockDevice::open_with("/dev/sdx", &FakeBlockProbe).unwrap();
        let parameters = ParameterSet::new().with("block-size", 4096);
        let workload = ParameterSet::new().with("duration", 60).with("mode", "mixed");
        let result = RunResult { elapsed_secs: 7.812 };

        let text = format_result(&JsonResult::new(&device, &result, &parameters, &workload)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["device"], "/dev/sdx");
        assert_eq!(value["elapsed_seconds"], 7.812);
        assert_eq!(value["parameters"]["block-size"], 4096);
        assert_eq!(value["workload"]["duration"], 60);
        assert_eq!(value["workload"]["mode"], "mixed");
    }
}
