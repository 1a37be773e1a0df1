//! Window functions used as per-sample weights during the forward DFT.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowFunction {
    /// Rectangular (no windowing)
    #[default]
    Rectangular,
    /// Bartlett (triangular) window
    Bartlett,
    /// Welch (parabolic) window
    Welch,
    /// Sine window
    Sine,
}

impl WindowFunction {
    /// All window functions, in menu order.
    pub const ALL: [WindowFunction; 4] = [
        WindowFunction::Rectangular,
        WindowFunction::Bartlett,
        WindowFunction::Welch,
        WindowFunction::Sine,
    ];

    /// Weight of sample `t` in a window of `n` samples.
    ///
    /// The half width `(n - 1) / 2` uses integer division, so even lengths
    /// peak one sample early. Windows too short to have a half width weigh 1.
    pub fn weight(self, n: usize, t: usize) -> f64 {
        match self {
            WindowFunction::Rectangular => 1.0,
            WindowFunction::Bartlett => {
                let half = n.saturating_sub(1) / 2;
                if half == 0 {
                    return 1.0;
                }
                1.0 - (t as f64 - half as f64).abs() / half as f64
            }
            WindowFunction::Welch => {
                let half = n.saturating_sub(1) / 2;
                if half == 0 {
                    return 1.0;
                }
                let x = (t as f64 - half as f64) / half as f64;
                1.0 - x * x
            }
            WindowFunction::Sine => {
                if n <= 1 {
                    return 1.0;
                }
                (PI * t as f64 / (n - 1) as f64).sin()
            }
        }
    }

    /// Get window coefficients
    pub fn coefficients(self, n: usize) -> Vec<f64> {
        (0..n).map(|t| self.weight(n, t)).collect()
    }

    /// Lowercase name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            WindowFunction::Rectangular => "rectangular",
            WindowFunction::Bartlett => "bartlett",
            WindowFunction::Welch => "welch",
            WindowFunction::Sine => "sine",
        }
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Ok(WindowFunction::Rectangular),
            "bartlett" | "triangular" => Ok(WindowFunction::Bartlett),
            "welch" => Ok(WindowFunction::Welch),
            "sine" | "sin" => Ok(WindowFunction::Sine),
            other => Err(format!(
                "unknown window '{other}' (expected rectangular, bartlett, welch or sine)"
            )),
        }
    }
}
