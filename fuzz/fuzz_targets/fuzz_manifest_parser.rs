#![no_main]

use cmdtree::manifest::Manifest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Parsing and validation must reject bad input without panicking,
        // and anything that validates must build a usable command.
        if let Ok(Some(manifest)) = Manifest::from_yaml(source) {
            if let Ok(command) = manifest.into_command("fuzz") {
                let _ = command.try_get_matches_from(["fuzz"]);
            }
        }
    }
});
