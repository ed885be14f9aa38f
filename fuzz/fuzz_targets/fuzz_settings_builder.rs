#![no_main]

use conncalc_core::ConnectivitySettings;
use libfuzzer_sys::fuzz_target;

// The builder must never panic: it either yields a consistent bundle or a
// structured error, whatever shape the trial data has.
fuzz_target!(|input: (Vec<Vec<f64>>, Vec<Vec<f64>>, u8)| {
    let (first, second, number_trials) = input;
    let built = ConnectivitySettings::builder()
        .method("COR")
        .number_trials(usize::from(number_trials))
        .trial(first)
        .trial(second)
        .build();
    if let Ok(settings) = built {
        assert!(settings.n_channels() >= 1);
        assert!(settings.n_samples() >= 1);
        assert_eq!(settings.trials().len(), 2);
        assert!(settings.n_trials_used() <= 2);
    }
});
