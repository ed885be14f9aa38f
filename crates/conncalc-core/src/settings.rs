//! The connectivity settings bundle.
//!
//! `ConnectivitySettings` carries the requested method tokens, the metric
//! parameters (window, trial count, trigger type, frequency band) and the
//! input signal trials. Method identifiers are stored as raw tokens so that
//! unknown tokens survive until dispatch, where the documented error
//! behavior applies.
//!
//! Spectral metrics fill a per-trial tapered-spectra cache as a side effect
//! of computing. `Clone` produces a deep snapshot, cache included; the
//! orchestrator clones the bundle per method so concurrent computations
//! never share mutable state.

use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::ConnectivityError;
use crate::window::WindowType;

/// Frequency band of interest, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreqBand {
    /// Lower bound in Hz.
    pub lower: f64,
    /// Upper bound in Hz.
    pub upper: f64,
}

impl FreqBand {
    /// Create a band, validating `0 <= lower <= upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ConnectivityError> {
        if !lower.is_finite() || !upper.is_finite() || lower < 0.0 || lower > upper {
            return Err(ConnectivityError::Config(format!(
                "invalid frequency band: {lower} .. {upper} Hz"
            )));
        }
        Ok(Self { lower, upper })
    }
}

/// One trial (epoch) of multi-channel signal data.
#[derive(Debug, Clone)]
pub struct SignalTrial {
    /// One row of samples per channel.
    pub(crate) rows: Vec<Vec<f64>>,
    /// Tapered spectra per channel, filled lazily by the spectral layer.
    pub(crate) spectra: Option<Vec<Vec<Complex64>>>,
}

impl SignalTrial {
    pub(crate) fn new(rows: Vec<Vec<f64>>) -> Self {
        Self {
            rows,
            spectra: None,
        }
    }

    /// Number of channels.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.rows.len()
    }

    /// Number of samples per channel.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The samples of one channel.
    #[must_use]
    pub fn row(&self, channel: usize) -> &[f64] {
        &self.rows[channel]
    }

    /// Whether the tapered spectra have been computed for this trial.
    #[must_use]
    pub fn has_spectra(&self) -> bool {
        self.spectra.is_some()
    }
}

/// Settings bundle driving one orchestrator invocation.
#[derive(Debug, Clone)]
pub struct ConnectivitySettings {
    methods: Vec<String>,
    window_type: WindowType,
    number_trials: usize,
    trigger_type: String,
    freq_band: Option<FreqBand>,
    sampling_freq: f64,
    fft_len: usize,
    trials: Vec<SignalTrial>,
}

impl ConnectivitySettings {
    /// Start building a settings bundle.
    #[must_use]
    pub fn builder() -> ConnectivitySettingsBuilder {
        ConnectivitySettingsBuilder::default()
    }

    /// Requested method tokens, in request order, deduplicated.
    #[must_use]
    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Whether the given token was requested.
    #[must_use]
    pub fn has_method(&self, token: &str) -> bool {
        self.methods.iter().any(|m| m == token)
    }

    /// Add a method token. Duplicates are ignored (set semantics).
    pub fn add_method(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !self.has_method(&token) {
            self.methods.push(token);
        }
    }

    /// The window function used for tapered spectra.
    #[must_use]
    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Change the window function. Invalidates cached spectra.
    pub fn set_window_type(&mut self, window_type: WindowType) {
        if window_type != self.window_type {
            self.window_type = window_type;
            self.clear_spectra();
        }
    }

    /// Number of trials to use (0 = all available).
    #[must_use]
    pub fn number_trials(&self) -> usize {
        self.number_trials
    }

    /// Trigger type token from the configuration layer.
    #[must_use]
    pub fn trigger_type(&self) -> &str {
        &self.trigger_type
    }

    /// Frequency band of interest, if restricted.
    #[must_use]
    pub fn freq_band(&self) -> Option<&FreqBand> {
        self.freq_band.as_ref()
    }

    /// Sampling frequency in Hz.
    #[must_use]
    pub fn sampling_freq(&self) -> f64 {
        self.sampling_freq
    }

    /// All trials held by the bundle.
    #[must_use]
    pub fn trials(&self) -> &[SignalTrial] {
        &self.trials
    }

    /// Number of trials that computations will use.
    #[must_use]
    pub fn n_trials_used(&self) -> usize {
        if self.number_trials == 0 {
            self.trials.len()
        } else {
            self.number_trials.min(self.trials.len())
        }
    }

    /// The trials that computations will use.
    #[must_use]
    pub fn used_trials(&self) -> &[SignalTrial] {
        &self.trials[..self.n_trials_used()]
    }

    pub(crate) fn used_trials_mut(&mut self) -> &mut [SignalTrial] {
        let n = self.n_trials_used();
        &mut self.trials[..n]
    }

    /// Number of channels (0 if no trials).
    #[must_use]
    pub fn n_channels(&self) -> usize {
        self.trials.first().map_or(0, SignalTrial::channels)
    }

    /// Samples per channel (0 if no trials).
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.trials.first().map_or(0, SignalTrial::samples)
    }

    /// FFT length used for tapered spectra. A configured value wins;
    /// otherwise the next power of two at or above the sample count.
    #[must_use]
    pub fn effective_fft_len(&self) -> usize {
        if self.fft_len != 0 {
            self.fft_len
        } else {
            self.n_samples().next_power_of_two()
        }
    }

    /// Number of positive-frequency bins of the tapered spectra.
    #[must_use]
    pub fn n_bins(&self) -> usize {
        let fft_len = self.effective_fft_len();
        if fft_len == 0 {
            0
        } else {
            fft_len / 2 + 1
        }
    }

    /// Frequency resolution in Hz per spectral bin.
    #[must_use]
    pub fn bin_hz(&self) -> f64 {
        let fft_len = self.effective_fft_len();
        if fft_len == 0 {
            0.0
        } else {
            self.sampling_freq / fft_len as f64
        }
    }

    /// Append a trial, validating dimensions against existing trials.
    pub fn add_trial(&mut self, rows: Vec<Vec<f64>>) -> Result<(), ConnectivityError> {
        validate_trial(&rows, self.trials.first())?;
        self.trials.push(SignalTrial::new(rows));
        Ok(())
    }

    /// Drop cached spectra on every trial.
    pub fn clear_spectra(&mut self) {
        for trial in &mut self.trials {
            trial.spectra = None;
        }
    }
}

fn validate_trial(
    rows: &[Vec<f64>],
    reference: Option<&SignalTrial>,
) -> Result<(), ConnectivityError> {
    if rows.is_empty() {
        return Err(ConnectivityError::InvalidInput(
            "trial has no channels".into(),
        ));
    }
    let samples = rows[0].len();
    if samples == 0 {
        return Err(ConnectivityError::InvalidInput(
            "trial has no samples".into(),
        ));
    }
    if rows.iter().any(|row| row.len() != samples) {
        return Err(ConnectivityError::InvalidInput(
            "trial rows have differing sample counts".into(),
        ));
    }
    if let Some(reference) = reference {
        if rows.len() != reference.channels() || samples != reference.samples() {
            return Err(ConnectivityError::InvalidInput(format!(
                "trial is {}x{}, expected {}x{}",
                rows.len(),
                samples,
                reference.channels(),
                reference.samples()
            )));
        }
    }
    Ok(())
}

/// Builder for [`ConnectivitySettings`].
#[derive(Debug)]
pub struct ConnectivitySettingsBuilder {
    methods: Vec<String>,
    window_type: WindowType,
    number_trials: usize,
    trigger_type: String,
    freq_band: Option<FreqBand>,
    sampling_freq: f64,
    fft_len: usize,
    trials: Vec<Vec<Vec<f64>>>,
}

impl Default for ConnectivitySettingsBuilder {
    fn default() -> Self {
        Self {
            methods: Vec::new(),
            window_type: WindowType::default(),
            number_trials: 0,
            trigger_type: "1".into(),
            freq_band: None,
            sampling_freq: 1.0,
            fft_len: 0,
            trials: Vec::new(),
        }
    }
}

impl ConnectivitySettingsBuilder {
    /// Request a method by token. Duplicates are ignored.
    #[must_use]
    pub fn method(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !self.methods.contains(&token) {
            self.methods.push(token);
        }
        self
    }

    /// Set the window function.
    #[must_use]
    pub fn window_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    /// Limit the number of trials used (0 = all).
    #[must_use]
    pub fn number_trials(mut self, number_trials: usize) -> Self {
        self.number_trials = number_trials;
        self
    }

    /// Set the trigger type token.
    #[must_use]
    pub fn trigger_type(mut self, trigger_type: impl Into<String>) -> Self {
        self.trigger_type = trigger_type.into();
        self
    }

    /// Restrict the frequency band of interest.
    #[must_use]
    pub fn freq_band(mut self, band: FreqBand) -> Self {
        self.freq_band = Some(band);
        self
    }

    /// Set the sampling frequency in Hz.
    #[must_use]
    pub fn sampling_freq(mut self, sampling_freq: f64) -> Self {
        self.sampling_freq = sampling_freq;
        self
    }

    /// Override the FFT length (0 = next power of two above the sample count).
    #[must_use]
    pub fn fft_len(mut self, fft_len: usize) -> Self {
        self.fft_len = fft_len;
        self
    }

    /// Append one trial of channels-by-samples data.
    #[must_use]
    pub fn trial(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.trials.push(rows);
        self
    }

    /// Validate and build the settings bundle.
    pub fn build(self) -> Result<ConnectivitySettings, ConnectivityError> {
        if !self.sampling_freq.is_finite() || self.sampling_freq <= 0.0 {
            return Err(ConnectivityError::Config(format!(
                "sampling frequency must be positive, got {}",
                self.sampling_freq
            )));
        }
        let mut settings = ConnectivitySettings {
            methods: self.methods,
            window_type: self.window_type,
            number_trials: self.number_trials,
            trigger_type: self.trigger_type,
            freq_band: self.freq_band,
            sampling_freq: self.sampling_freq,
            fft_len: self.fft_len,
            trials: Vec::with_capacity(self.trials.len()),
        };
        for rows in self.trials {
            settings.add_trial(rows)?;
        }
        if settings.fft_len != 0 && settings.fft_len < settings.n_samples() {
            return Err(ConnectivityError::Config(format!(
                "fft length {} shorter than {} samples",
                settings.fft_len,
                settings.n_samples()
            )));
        }
        Ok(settings)
    }
}
