#![no_main]

use claraprint_core::{fingerprint, shingle, Algorithm, Annotation, FingerprintOptions, WordLengths};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(annotation) = serde_json::from_slice::<Annotation>(data) else {
        return;
    };
    for algorithm in Algorithm::ALL {
        if let Ok(encoded) = fingerprint(&annotation, algorithm, &FingerprintOptions::default()) {
            let _ = shingle(encoded.fingerprint.as_str(), WordLengths::RETRIEVAL);
        }
    }
});
