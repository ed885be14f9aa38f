//! The network structure produced by one connectivity computation.
//!
//! A `Network` holds one node per channel and one edge per unordered channel
//! pair. Spectral metrics store one weight per frequency bin on each edge;
//! time-domain metrics store a single weight. `Network::empty()` is the
//! sentinel returned when no computation was performed; consumers must treat
//! it as absence of a result, not as a zero-weighted network.

use serde::{Deserialize, Serialize};

use crate::error::ConnectivityError;
use crate::method::ConnectivityMethod;
use crate::settings::FreqBand;

/// A single channel in the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Channel index.
    pub id: usize,
    /// Channel label.
    pub label: String,
}

/// An undirected edge between two channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    /// Source channel index.
    pub source: usize,
    /// Target channel index.
    pub target: usize,
    /// One weight per frequency bin (a single entry for time-domain metrics).
    pub weights: Vec<f64>,
}

impl NetworkEdge {
    /// Mean weight across all bins.
    #[must_use]
    pub fn mean_weight(&self) -> f64 {
        if self.weights.is_empty() {
            return 0.0;
        }
        self.weights.iter().sum::<f64>() / self.weights.len() as f64
    }
}

/// Result of one connectivity metric computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    method: Option<ConnectivityMethod>,
    nodes: Vec<NetworkNode>,
    edges: Vec<NetworkEdge>,
    /// Frequency resolution in Hz per bin (0.0 for time-domain metrics).
    bin_hz: f64,
}

impl Network {
    /// Create a network for `n_channels` nodes with no edges yet.
    #[must_use]
    pub fn new(method: ConnectivityMethod, n_channels: usize, bin_hz: f64) -> Self {
        let nodes = (0..n_channels)
            .map(|id| NetworkNode {
                id,
                label: format!("ch{id}"),
            })
            .collect();
        Self {
            method: Some(method),
            nodes,
            edges: Vec::new(),
            bin_hz,
        }
    }

    /// The sentinel network indicating that no computation was performed.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the "no computation performed" sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.method.is_none()
    }

    /// The method that produced this network, if any.
    #[must_use]
    pub fn method(&self) -> Option<ConnectivityMethod> {
        self.method
    }

    /// Nodes, one per channel.
    #[must_use]
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// Edges, one per unordered channel pair.
    #[must_use]
    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    /// Frequency resolution in Hz per bin (0.0 for time-domain metrics).
    #[must_use]
    pub fn bin_hz(&self) -> f64 {
        self.bin_hz
    }

    /// Append an edge.
    pub fn push_edge(&mut self, edge: NetworkEdge) {
        self.edges.push(edge);
    }

    /// Mean edge weight restricted to the given frequency band.
    ///
    /// With `band = None`, all bins contribute. For time-domain metrics the
    /// band is ignored (there is a single bin).
    #[must_use]
    pub fn band_weight(&self, edge: &NetworkEdge, band: Option<&FreqBand>) -> f64 {
        if edge.weights.len() <= 1 || self.bin_hz == 0.0 {
            return edge.weights.first().copied().unwrap_or(0.0);
        }
        let Some(band) = band else {
            return edge.mean_weight();
        };
        let mut sum = 0.0;
        let mut count = 0usize;
        for (k, &w) in edge.weights.iter().enumerate() {
            let freq = k as f64 * self.bin_hz;
            if freq >= band.lower && freq <= band.upper {
                sum += w;
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Full symmetric weight matrix, band-averaged per edge. Diagonal is 0.
    #[must_use]
    pub fn weight_matrix(&self, band: Option<&FreqBand>) -> Vec<Vec<f64>> {
        let n = self.nodes.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for edge in &self.edges {
            let w = self.band_weight(edge, band);
            matrix[edge.source][edge.target] = w;
            matrix[edge.target][edge.source] = w;
        }
        matrix
    }

    /// Serialize the network to JSON for export collaborators.
    pub fn to_json(&self) -> Result<String, ConnectivityError> {
        serde_json::to_string(self).map_err(|e| ConnectivityError::Computation(e.to_string()))
    }
}
