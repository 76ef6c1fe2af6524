#![no_main]

use dotprune::{
    config::AssemblyConfig,
    metadata::{loader::JsonModelProvider, typesystem::TypeIndex},
    pruning::AssemblyPruner,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut assembly) = JsonModelProvider::from_slice(data) {
        let config = AssemblyConfig {
            make_reference_assembly: true,
            ..AssemblyConfig::default()
        };
        let external = TypeIndex::default();
        let _ = AssemblyPruner::new(&config, &external).prune(&mut assembly);
    }
});
