//! Tapered spectra and cross-spectral density machinery.
//!
//! All spectral metrics share this layer: each used trial gets a windowed,
//! zero-padded FFT per channel, cached on the trial so repeated metrics on
//! the same settings snapshot reuse it. The cross-spectral density of a
//! channel pair is `S_i(k) * conj(S_j(k))`, reduced over trials by each
//! metric in its own way.

use rayon::prelude::*;
use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;
use tracing::debug;

use crate::error::ConnectivityError;
use crate::settings::ConnectivitySettings;

/// Compute and cache the tapered spectra for every used trial that does not
/// have them yet.
pub(crate) fn ensure_spectra(
    settings: &mut ConnectivitySettings,
) -> Result<(), ConnectivityError> {
    let n_samples = settings.n_samples();
    let fft_len = settings.effective_fft_len();
    if fft_len < n_samples {
        return Err(ConnectivityError::Config(format!(
            "fft length {fft_len} shorter than {n_samples} samples"
        )));
    }
    if settings
        .used_trials()
        .iter()
        .all(crate::settings::SignalTrial::has_spectra)
    {
        return Ok(());
    }

    let n_bins = settings.n_bins();
    let window = settings.window_type().coefficients(n_samples);
    let fft = FftPlanner::new().plan_fft_forward(fft_len);
    debug!(fft_len, n_bins, "computing tapered spectra");

    settings.used_trials_mut().par_iter_mut().for_each(|trial| {
        if trial.has_spectra() {
            return;
        }
        let spectra = trial
            .rows
            .iter()
            .map(|row| {
                let mut buf: Vec<Complex64> = row
                    .iter()
                    .zip(&window)
                    .map(|(&x, &w)| Complex64::new(x * w, 0.0))
                    .collect();
                buf.resize(fft_len, Complex64::new(0.0, 0.0));
                fft.process(&mut buf);
                buf.truncate(n_bins);
                buf
            })
            .collect();
        trial.spectra = Some(spectra);
    });
    Ok(())
}

fn missing_spectra() -> ConnectivityError {
    ConnectivityError::Computation("tapered spectra not computed".into())
}

/// Run `f` once per used trial with the cross-spectral density of channels
/// `i` and `j`. Returns the number of trials visited.
pub(crate) fn for_each_trial_csd<F>(
    settings: &ConnectivitySettings,
    i: usize,
    j: usize,
    mut f: F,
) -> Result<usize, ConnectivityError>
where
    F: FnMut(&[Complex64]),
{
    let n_bins = settings.n_bins();
    let mut buf = vec![Complex64::new(0.0, 0.0); n_bins];
    let mut count = 0usize;
    for trial in settings.used_trials() {
        let spectra = trial.spectra.as_ref().ok_or_else(missing_spectra)?;
        for (k, slot) in buf.iter_mut().enumerate() {
            *slot = spectra[i][k] * spectra[j][k].conj();
        }
        f(&buf);
        count += 1;
    }
    Ok(count)
}

/// Trial-averaged power spectral density of one channel.
pub(crate) fn mean_psd(
    settings: &ConnectivitySettings,
    channel: usize,
) -> Result<Vec<f64>, ConnectivityError> {
    let mut acc = vec![0.0; settings.n_bins()];
    let mut count = 0usize;
    for trial in settings.used_trials() {
        let spectra = trial.spectra.as_ref().ok_or_else(missing_spectra)?;
        for (slot, s) in acc.iter_mut().zip(&spectra[channel]) {
            *slot += s.norm_sqr();
        }
        count += 1;
    }
    if count > 1 {
        let scale = 1.0 / count as f64;
        for slot in &mut acc {
            *slot *= scale;
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowType;

    fn sine_trial(freq_hz: f64, fs: f64, samples: usize, channels: usize) -> Vec<Vec<f64>> {
        (0..channels)
            .map(|_| {
                (0..samples)
                    .map(|n| (2.0 * std::f64::consts::PI * freq_hz * n as f64 / fs).sin())
                    .collect()
            })
            .collect()
    }

    fn settings_with_sine() -> ConnectivitySettings {
        ConnectivitySettings::builder()
            .sampling_freq(128.0)
            .trial(sine_trial(16.0, 128.0, 128, 2))
            .window_type(WindowType::Square)
            .build()
            .unwrap()
    }

    #[test]
    fn spectra_cached_once() {
        let mut settings = settings_with_sine();
        assert!(!settings.trials()[0].has_spectra());
        ensure_spectra(&mut settings).unwrap();
        assert!(settings.trials()[0].has_spectra());
        // Second call is a no-op
        ensure_spectra(&mut settings).unwrap();
    }

    #[test]
    fn sine_peaks_at_expected_bin() {
        let mut settings = settings_with_sine();
        ensure_spectra(&mut settings).unwrap();
        let psd = mean_psd(&settings, 0).unwrap();
        // 16 Hz at fs=128, fft_len=128 -> bin 16
        let peak = psd
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k)
            .unwrap();
        assert_eq!(peak, 16);
    }

    #[test]
    fn csd_visits_every_used_trial() {
        let mut settings = ConnectivitySettings::builder()
            .sampling_freq(128.0)
            .trial(sine_trial(8.0, 128.0, 64, 2))
            .trial(sine_trial(8.0, 128.0, 64, 2))
            .trial(sine_trial(8.0, 128.0, 64, 2))
            .number_trials(2)
            .build()
            .unwrap();
        ensure_spectra(&mut settings).unwrap();
        let mut visits = 0;
        let count = for_each_trial_csd(&settings, 0, 1, |csd| {
            visits += 1;
            assert_eq!(csd.len(), settings.n_bins());
        })
        .unwrap();
        assert_eq!(count, 2);
        assert_eq!(visits, 2);
    }

    #[test]
    fn csd_of_identical_channels_is_real() {
        let mut settings = settings_with_sine();
        ensure_spectra(&mut settings).unwrap();
        for_each_trial_csd(&settings, 0, 1, |csd| {
            for c in csd {
                assert!(c.im.abs() < 1e-9 * (1.0 + c.re.abs()));
            }
        })
        .unwrap();
    }

    #[test]
    fn missing_spectra_is_reported() {
        let settings = settings_with_sine();
        let result = for_each_trial_csd(&settings, 0, 1, |_| {});
        assert!(matches!(result, Err(ConnectivityError::Computation(_))));
    }
}
