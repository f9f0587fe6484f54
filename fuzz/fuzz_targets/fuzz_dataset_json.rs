#![no_main]

use claraprint_eval::{Dataset, EvaluationConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(dataset) = Dataset::from_json_str(s) {
            let _ = dataset.validate();
        }
        let _ = EvaluationConfig::from_json_str(s);
    }
});
