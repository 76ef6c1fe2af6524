#![no_main]

use dotprune::config::Configuration;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = Configuration::from_slice(data) {
        let _ = config.check_entries();
    }
});
