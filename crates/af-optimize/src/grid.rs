//! Factor grids and their cartesian product.
//!
//! A [`GridSpace`] is an ordered list of [`FactorGrid`] dimensions. Enumeration is
//! odometer-style: the last dimension varies fastest, the first slowest. The order
//! is part of the contract because ties go to the first point enumerated.

use crate::error::{SearchError, SearchResult};
use std::collections::HashSet;
use std::fmt;

/// A searchable Yagi-Uda factor, expressed in wavelengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    Reflector,
    Active,
    Director,
    Spacing,
}

impl Factor {
    pub fn name(self) -> &'static str {
        match self {
            Self::Reflector => "reflector",
            Self::Active => "active",
            Self::Director => "director",
            Self::Spacing => "spacing",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered candidate values for one factor.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorGrid {
    pub factor: Factor,
    pub values: Vec<f64>,
}

impl FactorGrid {
    pub fn new(factor: Factor, values: Vec<f64>) -> Self {
        Self { factor, values }
    }

    /// `2 * half_width_steps + 1` points at `center + i * step`, both ends included.
    ///
    /// Each point is computed from its integer offset, never by accumulating `step`,
    /// so the point count and values are exact functions of the inputs.
    pub fn centered(factor: Factor, center: f64, step: f64, half_width_steps: usize) -> Self {
        let hw = half_width_steps as i64;
        let values = (-hw..=hw).map(|i| center + i as f64 * step).collect();
        Self { factor, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One point of a [`GridSpace`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    pub index: usize,
    pub coordinates: Vec<(Factor, f64)>,
}

impl GridPoint {
    pub fn value(&self, factor: Factor) -> Option<f64> {
        self.coordinates
            .iter()
            .find(|(f, _)| *f == factor)
            .map(|(_, v)| *v)
    }
}

/// Cartesian product of factor grids.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpace {
    dims: Vec<FactorGrid>,
}

impl GridSpace {
    pub fn new(dims: Vec<FactorGrid>) -> SearchResult<Self> {
        if dims.is_empty() {
            return Err(SearchError::InvalidConfig {
                what: "grid space has no dimensions".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for dim in &dims {
            if dim.is_empty() {
                return Err(SearchError::InvalidConfig {
                    what: format!("{} grid has no values", dim.factor),
                });
            }
            if !seen.insert(dim.factor) {
                return Err(SearchError::InvalidConfig {
                    what: format!("{} grid appears twice", dim.factor),
                });
            }
            if let Some(bad) = dim.values.iter().find(|v| !v.is_finite()) {
                return Err(SearchError::InvalidConfig {
                    what: format!("{} grid contains non-finite value {}", dim.factor, bad),
                });
            }
        }

        Ok(Self { dims })
    }

    pub fn dims(&self) -> &[FactorGrid] {
        &self.dims
    }

    pub fn dim(&self, factor: Factor) -> Option<&FactorGrid> {
        self.dims.iter().find(|d| d.factor == factor)
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.dims.iter().map(FactorGrid::len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> GridPoints<'_> {
        GridPoints {
            space: self,
            odometer: vec![0; self.dims.len()],
            next_index: 0,
            total: self.len(),
        }
    }
}

/// Iterator over the points of a [`GridSpace`] in enumeration order.
pub struct GridPoints<'a> {
    space: &'a GridSpace,
    odometer: Vec<usize>,
    next_index: usize,
    total: usize,
}

impl Iterator for GridPoints<'_> {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        if self.next_index >= self.total {
            return None;
        }

        let coordinates = self
            .space
            .dims
            .iter()
            .zip(&self.odometer)
            .map(|(dim, &i)| (dim.factor, dim.values[i]))
            .collect();
        let point = GridPoint {
            index: self.next_index,
            coordinates,
        };

        // Advance: innermost (last) dimension fastest
        for (digit, dim) in self.odometer.iter_mut().zip(&self.space.dims).rev() {
            *digit += 1;
            if *digit < dim.len() {
                break;
            }
            *digit = 0;
        }
        self.next_index += 1;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridPoints<'_> {}
