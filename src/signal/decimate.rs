use crate::error::{Result, UtilError};
use crate::signal::filter::{cheby1, firwin, lfilter, FilterCoefficients};
use crate::utils::constants::{
    DEFAULT_FIR_ORDER, DEFAULT_IIR_ORDER, IIR_CUTOFF_SCALE, IIR_PASSBAND_RIPPLE_DB,
};
use ndarray::{Array, ArrayBase, ArrayView1, Axis, Data, Dimension};
use tracing::debug;

/// Anti-aliasing filter used before downsampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// Hamming-windowed FIR filter
    Fir,
    /// Chebyshev type I filter
    #[default]
    Iir,
}

impl FilterType {
    pub fn default_order(self) -> usize {
        match self {
            FilterType::Fir => DEFAULT_FIR_ORDER,
            FilterType::Iir => DEFAULT_IIR_ORDER,
        }
    }

    fn design(self, order: usize, q: usize) -> Result<FilterCoefficients> {
        match self {
            FilterType::Fir => Ok(FilterCoefficients {
                b: firwin(order + 1, 1.0 / q as f64)?,
                a: vec![1.0],
            }),
            FilterType::Iir => cheby1(order, IIR_PASSBAND_RIPPLE_DB, IIR_CUTOFF_SCALE / q as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecimateOptions {
    /// Filter order; the filter type's default when unset
    pub order: Option<usize>,
    pub filter: FilterType,
    /// Axis to decimate along; the last axis when unset
    pub axis: Option<Axis>,
}

impl DecimateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
}

/// Number of samples left along an axis of length `len` after trimming
/// `offset` leading samples and keeping every `q`-th one.
pub fn decimated_len(len: usize, offset: usize, q: usize) -> usize {
    if len > offset {
        (len - offset + q - 1) / q
    } else {
        0
    }
}

/// Downsample `x` by the integer factor `q` along one axis.
///
/// Every lane is low-pass filtered causally, the first `order / 2` filtered
/// samples are dropped to compensate for the group delay and every `q`-th
/// sample of the rest is kept.
pub fn decimate<S, D>(x: &ArrayBase<S, D>, q: usize, options: &DecimateOptions) -> Result<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if q == 0 {
        return Err(UtilError::InvalidArgument(
            "decimation factor must be a positive integer".to_string(),
        ));
    }

    let axis = match options.axis {
        Some(axis) => axis,
        None if x.ndim() > 0 => Axis(x.ndim() - 1),
        None => {
            return Err(UtilError::InvalidArgument(
                "cannot decimate a zero-dimensional array".to_string(),
            ))
        }
    };
    if axis.index() >= x.ndim() {
        return Err(UtilError::InvalidArgument(format!(
            "axis {} out of range for array with {} dimensions",
            axis.index(),
            x.ndim()
        )));
    }

    let order = options.order.unwrap_or_else(|| options.filter.default_order());
    let coefficients = options.filter.design(order, q)?;
    let offset = order / 2;

    let mut shape = x.raw_dim();
    shape[axis.index()] = decimated_len(x.len_of(axis), offset, q);
    let mut output = Array::zeros(shape);

    debug!(
        "decimating {} lanes by {} with {:?} filter of order {}",
        x.len() / x.len_of(axis).max(1),
        q,
        options.filter,
        order
    );

    for (lane, mut out_lane) in x.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let filtered = lfilter(&coefficients.b, &coefficients.a, lane.iter().copied())?;
        for (out, value) in out_lane
            .iter_mut()
            .zip(filtered.iter().skip(offset).step_by(q))
        {
            *out = *value;
        }
    }

    Ok(output)
}

/// One-dimensional convenience wrapper around [`decimate`]
pub fn decimate_slice(x: &[f64], q: usize, options: &DecimateOptions) -> Result<Vec<f64>> {
    let view = ArrayView1::from(x);
    Ok(decimate(&view, q, options)?.to_vec())
}
