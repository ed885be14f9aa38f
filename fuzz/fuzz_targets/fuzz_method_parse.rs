#![no_main]

use conncalc_core::ConnectivityMethod;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    match data.parse::<ConnectivityMethod>() {
        // Parsing is the exact inverse of token().
        Ok(method) => assert_eq!(method.token(), data),
        Err(_) => assert!(ConnectivityMethod::ALL.iter().all(|m| m.token() != data)),
    }
});
