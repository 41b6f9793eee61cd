use super::Dtype;
use anyhow::{ensure, Result};
use ndarray::{ArrayD, IxDyn, Zip};
use rand::{distributions::Uniform, Rng};
use rand_distr::{Exp1, StandardNormal};
use serde::{Deserialize, Serialize};

/// A space of the gym interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GymSpace {
    /// Continuous box.
    Box(BoxSpace),

    /// Keyed composite of spaces.
    Dict(DictSpace),
}

impl GymSpace {
    /// Shape of a box, `None` for a dict.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Self::Box(b) => Some(b.shape()),
            Self::Dict(_) => None,
        }
    }

    /// Element type of a box, `None` for a dict.
    pub fn dtype(&self) -> Option<Dtype> {
        match self {
            Self::Box(b) => Some(b.dtype()),
            Self::Dict(_) => None,
        }
    }

    /// Returns the box, if this space is a box.
    pub fn as_box(&self) -> Option<&BoxSpace> {
        match self {
            Self::Box(b) => Some(b),
            Self::Dict(_) => None,
        }
    }

    /// Returns the dict, if this space is a dict.
    pub fn as_dict(&self) -> Option<&DictSpace> {
        match self {
            Self::Box(_) => None,
            Self::Dict(d) => Some(d),
        }
    }
}

/// A box in `R^n`, bounded elementwise by `low` and `high`.
///
/// Bounds may be infinite. `low` and `high` always have the shape of the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    low: ArrayD<f64>,
    high: ArrayD<f64>,
    dtype: Dtype,
}

impl BoxSpace {
    /// Constructs a box from elementwise bounds of the same shape.
    pub fn new(low: ArrayD<f64>, high: ArrayD<f64>, dtype: Dtype) -> Result<Self> {
        ensure!(
            low.shape() == high.shape(),
            "Shapes of low {:?} and high {:?} differ",
            low.shape(),
            high.shape()
        );
        Ok(Self { low, high, dtype })
    }

    /// Constructs a box with infinite bounds.
    pub fn unbounded(shape: &[usize], dtype: Dtype) -> Self {
        Self {
            low: ArrayD::from_elem(IxDyn(shape), f64::NEG_INFINITY),
            high: ArrayD::from_elem(IxDyn(shape), f64::INFINITY),
            dtype,
        }
    }

    /// Lower bounds.
    pub fn low(&self) -> &ArrayD<f64> {
        &self.low
    }

    /// Upper bounds.
    pub fn high(&self) -> &ArrayD<f64> {
        &self.high
    }

    /// Shape of the box.
    pub fn shape(&self) -> &[usize] {
        self.low.shape()
    }

    /// Element type.
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    /// `true` if all bounds are finite.
    pub fn is_bounded(&self) -> bool {
        self.low.iter().chain(self.high.iter()).all(|v| v.is_finite())
    }

    /// `true` if `x` has the shape of the box and lies within the bounds.
    pub fn contains(&self, x: &ArrayD<f64>) -> bool {
        if x.shape() != self.shape() {
            return false;
        }
        Zip::from(x)
            .and(&self.low)
            .and(&self.high)
            .all(|&x, &l, &h| l <= x && x <= h)
    }

    /// Draws a sample.
    ///
    /// Each element is drawn according to its bounds:
    ///
    /// * `[low, high]` - uniform,
    /// * `[low, inf)` - shifted exponential,
    /// * `(-inf, high]` - shifted negative exponential,
    /// * `(-inf, inf)` - standard normal.
    ///
    /// For integer types the bounds are first narrowed to `[ceil(low), floor(high)]` and
    /// bounded elements are drawn uniformly from the integers in between. An element whose
    /// bounds enclose no integer is set to `ceil(low)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ArrayD<f64> {
        let integer = self.dtype.is_integer();
        let mut out = ArrayD::zeros(self.low.raw_dim());
        Zip::from(&mut out)
            .and(&self.low)
            .and(&self.high)
            .for_each(|o, &l, &h| {
                *o = if integer {
                    sample_integer(rng, l.ceil(), h.floor())
                } else {
                    sample_float(rng, l, h)
                };
            });
        out
    }
}

fn sample_float<R: Rng + ?Sized>(rng: &mut R, l: f64, h: f64) -> f64 {
    match (l.is_finite(), h.is_finite()) {
        (true, true) if l <= h && h - l < f64::MAX / 2.0 => {
            rng.sample(Uniform::new_inclusive(l, h))
        }
        // Width too large for Uniform
        (true, true) => {
            let u: f64 = rng.gen();
            (l * (1.0 - u) + h * u).max(l).min(h)
        }
        (true, false) => l + rng.sample::<f64, _>(Exp1),
        (false, true) => h - rng.sample::<f64, _>(Exp1),
        (false, false) => rng.sample(StandardNormal),
    }
}

fn sample_integer<R: Rng + ?Sized>(rng: &mut R, l: f64, h: f64) -> f64 {
    match (l.is_finite(), h.is_finite()) {
        (true, true) if l > h => l,
        (true, true) => rng.gen_range(l as i64..=h as i64) as f64,
        (true, false) => (l + rng.sample::<f64, _>(Exp1)).floor(),
        (false, true) => (h - rng.sample::<f64, _>(Exp1)).floor(),
        (false, false) => rng.sample::<f64, _>(StandardNormal).floor(),
    }
}

/// Named spaces in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictSpace(Vec<(String, GymSpace)>);

impl DictSpace {
    /// Constructs a dict from named spaces.
    pub fn new(spaces: Vec<(String, GymSpace)>) -> Self {
        Self(spaces)
    }

    /// Returns the space of a key.
    pub fn get(&self, key: &str) -> Option<&GymSpace> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Key-space pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GymSpace)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sub-spaces.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if there is no sub-space.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
