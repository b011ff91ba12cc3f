//! Low-pass filter design and causal filtering.
//!
//! Cutoff frequencies are normalised so that the Nyquist frequency is 1.
//! Coefficients are returned highest order first (`b[0]`, `a[0]` multiply
//! the current sample), matching the usual `lfilter` convention.

use crate::error::{Result, UtilError};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Transfer-function coefficients of a digital filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl FilterCoefficients {
    /// Gain at zero frequency
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }
}

fn check_cutoff(cutoff: f64) -> Result<()> {
    if !(cutoff > 0.0 && cutoff < 1.0) {
        return Err(UtilError::InvalidArgument(format!(
            "cutoff must lie strictly between 0 and 1 (Nyquist), got {}",
            cutoff
        )));
    }
    Ok(())
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn hamming(numtaps: usize) -> Vec<f64> {
    if numtaps == 1 {
        return vec![1.0];
    }
    let denom = (numtaps - 1) as f64;
    (0..numtaps)
        .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / denom).cos())
        .collect()
}

/// Design a Hamming-windowed low-pass FIR filter with `numtaps` taps.
///
/// The taps are scaled to unit gain at zero frequency.
pub fn firwin(numtaps: usize, cutoff: f64) -> Result<Vec<f64>> {
    if numtaps == 0 {
        return Err(UtilError::InvalidArgument(
            "FIR filter needs at least one tap".to_string(),
        ));
    }
    check_cutoff(cutoff)?;

    let alpha = 0.5 * (numtaps - 1) as f64;
    let mut taps: Vec<f64> = hamming(numtaps)
        .into_iter()
        .enumerate()
        .map(|(n, w)| {
            let m = n as f64 - alpha;
            cutoff * sinc(cutoff * m) * w
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    for tap in taps.iter_mut() {
        *tap /= sum;
    }

    Ok(taps)
}

/// Expand a set of roots into monic polynomial coefficients
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, c) in coeffs.iter().enumerate() {
            next[i] += *c;
            next[i + 1] -= *c * *root;
        }
        coeffs = next;
    }
    coeffs
}

/// Design an `order`-th order Chebyshev type I low-pass filter.
///
/// `ripple_db` is the maximum passband ripple, `cutoff` the normalised edge
/// of the passband. The analog prototype is prewarped, mapped with the
/// bilinear transform and expanded into transfer-function form.
pub fn cheby1(order: usize, ripple_db: f64, cutoff: f64) -> Result<FilterCoefficients> {
    if order == 0 {
        return Err(UtilError::InvalidArgument(
            "Chebyshev filter order must be positive".to_string(),
        ));
    }
    if !(ripple_db > 0.0) {
        return Err(UtilError::InvalidArgument(format!(
            "passband ripple must be positive, got {}",
            ripple_db
        )));
    }
    check_cutoff(cutoff)?;

    let n = order as f64;
    let eps = (10f64.powf(0.1 * ripple_db) - 1.0).sqrt();
    let mu = (1.0 / eps).asinh() / n;

    // Analog prototype poles, unit passband edge
    let poles: Vec<Complex64> = (0..order)
        .map(|i| {
            let m = -(n - 1.0) + 2.0 * i as f64;
            let theta = PI * m / (2.0 * n);
            -(Complex64::new(mu, theta).sinh())
        })
        .collect();

    let mut gain = poles
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, p| acc * -*p)
        .re;
    if order % 2 == 0 {
        gain /= (1.0 + eps * eps).sqrt();
    }

    // Prewarp for a sampling frequency of 2 and move the passband edge
    let fs2 = 4.0;
    let warped = fs2 * (PI * cutoff / 2.0).tan();
    let poles: Vec<Complex64> = poles.iter().map(|p| *p * warped).collect();
    gain *= warped.powi(order as i32);

    // Bilinear transform; all zeros end up at z = -1
    let digital_poles: Vec<Complex64> = poles
        .iter()
        .map(|&p| (fs2 + p) / (fs2 - p))
        .collect();
    let denominator = poles
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * (fs2 - p));
    gain *= (Complex64::new(1.0, 0.0) / denominator).re;

    let zeros = vec![Complex64::new(-1.0, 0.0); order];
    let b = poly(&zeros).into_iter().map(|c| gain * c.re).collect();
    let a = poly(&digital_poles).into_iter().map(|c| c.re).collect();

    Ok(FilterCoefficients { b, a })
}

/// Apply the filter `b / a` causally to `input` with zero initial state.
///
/// Direct form II transposed; coefficients are normalised by `a[0]`.
pub fn lfilter(b: &[f64], a: &[f64], input: impl IntoIterator<Item = f64>) -> Result<Vec<f64>> {
    let a0 = match a.first() {
        Some(&a0) if a0 != 0.0 => a0,
        _ => {
            return Err(UtilError::InvalidArgument(
                "denominator must have a non-zero leading coefficient".to_string(),
            ))
        }
    };
    if b.is_empty() {
        return Err(UtilError::InvalidArgument(
            "numerator must not be empty".to_string(),
        ));
    }

    let len = b.len().max(a.len());
    let coeff = |c: &[f64], i: usize| c.get(i).copied().unwrap_or(0.0) / a0;
    let b: Vec<f64> = (0..len).map(|i| coeff(b, i)).collect();
    let a: Vec<f64> = (0..len).map(|i| coeff(a, i)).collect();

    let mut state = vec![0.0; len];
    let output = input
        .into_iter()
        .map(|x| {
            let y = b[0] * x + state[0];
            for i in 1..len {
                state[i - 1] = b[i] * x + state[i] - a[i] * y;
            }
            y
        })
        .collect();

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_firwin_symmetry_and_gain() {
        let taps = firwin(31, 0.5).unwrap();
        assert_eq!(taps.len(), 31);
        assert!(close(taps.iter().sum::<f64>(), 1.0, 1e-12));
        for i in 0..taps.len() {
            assert!(close(taps[i], taps[taps.len() - 1 - i], 1e-12));
        }
        // Centre tap dominates for a half-band filter
        let centre = taps[15];
        assert!(taps.iter().all(|&t| t <= centre));
    }

    #[test]
    fn test_firwin_rejects_bad_cutoff() {
        assert!(firwin(31, 1.0).is_err());
        assert!(firwin(31, 0.0).is_err());
        assert!(firwin(0, 0.5).is_err());
        assert_eq!(firwin(1, 0.5).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_cheby1_dc_gain() {
        // Odd orders pass DC unattenuated, even orders sit at the ripple floor
        let odd = cheby1(5, 0.05, 0.4).unwrap();
        assert!(close(odd.dc_gain(), 1.0, 1e-6));

        let even = cheby1(8, 0.05, 0.4).unwrap();
        let floor = 10f64.powf(-0.05 / 20.0);
        assert!(close(even.dc_gain(), floor, 1e-6));

        assert_eq!(even.b.len(), 9);
        assert_eq!(even.a.len(), 9);
        assert!(close(even.a[0], 1.0, 1e-12));
    }

    #[test]
    fn test_cheby1_first_order() {
        // First order reduces to a single real pole and a zero at -1
        let coeffs = cheby1(1, 0.05, 0.5).unwrap();
        assert_eq!(coeffs.b.len(), 2);
        assert!(close(coeffs.b[0], coeffs.b[1], 1e-12));
        assert!(coeffs.a[1].abs() < 1.0);
    }

    #[test]
    fn test_cheby1_rejects_bad_arguments() {
        assert!(cheby1(0, 0.05, 0.4).is_err());
        assert!(cheby1(4, 0.0, 0.4).is_err());
        assert!(cheby1(4, 0.05, 1.2).is_err());
    }

    #[test]
    fn test_lfilter_moving_average() {
        let y = lfilter(&[0.5, 0.5], &[1.0], vec![2.0, 4.0, 6.0]).unwrap();
        assert_eq!(y, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_lfilter_recursive() {
        // y[n] = x[n] + 0.5 y[n-1]
        let y = lfilter(&[1.0], &[1.0, -0.5], vec![1.0, 0.0, 0.0]).unwrap();
        assert_eq!(y, vec![1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_lfilter_normalises_leading_coefficient() {
        let y = lfilter(&[2.0], &[2.0], vec![3.0, 4.0]).unwrap();
        assert_eq!(y, vec![3.0, 4.0]);
        assert!(lfilter(&[1.0], &[0.0], vec![1.0]).is_err());
        assert!(lfilter(&[], &[1.0], vec![1.0]).is_err());
    }
}
