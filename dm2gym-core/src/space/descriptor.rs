use super::Dtype;
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

/// Space of observations or actions as described by a simulator.
///
/// Variants correspond to the array specs of the simulator: `Array`, `BoundedArray`,
/// a mapping of specs and `StringArray`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpaceDescriptor {
    /// Array without bounds.
    Unbounded {
        /// Shape of the array.
        shape: Vec<usize>,
        /// Element type.
        dtype: Dtype,
    },

    /// Array with elementwise bounds.
    ///
    /// `minimum` and `maximum` are either of `shape` or broadcastable to it.
    Bounded {
        /// Shape of the array.
        shape: Vec<usize>,
        /// Element type.
        dtype: Dtype,
        /// Lower bounds.
        minimum: ArrayD<f64>,
        /// Upper bounds.
        maximum: ArrayD<f64>,
    },

    /// Named sub-spaces, in order.
    Composite(Vec<(String, SpaceDescriptor)>),

    /// Array of strings.
    Text {
        /// Shape of the array.
        shape: Vec<usize>,
    },
}

impl SpaceDescriptor {
    /// Array without bounds.
    pub fn unbounded(shape: &[usize], dtype: Dtype) -> Self {
        Self::Unbounded {
            shape: shape.to_vec(),
            dtype,
        }
    }

    /// Array with the same bounds for all elements.
    pub fn bounded(shape: &[usize], dtype: Dtype, minimum: f64, maximum: f64) -> Self {
        Self::Bounded {
            shape: shape.to_vec(),
            dtype,
            minimum: ArrayD::from_elem(IxDyn(&[]), minimum),
            maximum: ArrayD::from_elem(IxDyn(&[]), maximum),
        }
    }

    /// Array with elementwise bounds.
    pub fn bounded_with(
        shape: &[usize],
        dtype: Dtype,
        minimum: ArrayD<f64>,
        maximum: ArrayD<f64>,
    ) -> Self {
        Self::Bounded {
            shape: shape.to_vec(),
            dtype,
            minimum,
            maximum,
        }
    }

    /// Named sub-spaces, in iteration order.
    pub fn composite<K: Into<String>>(items: impl IntoIterator<Item = (K, SpaceDescriptor)>) -> Self {
        Self::Composite(items.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Shape of array descriptors, `None` for composites.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Self::Unbounded { shape, .. } | Self::Bounded { shape, .. } | Self::Text { shape } => {
                Some(shape.as_slice())
            }
            Self::Composite(_) => None,
        }
    }

    /// Short name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unbounded { .. } => "Array",
            Self::Bounded { .. } => "BoundedArray",
            Self::Composite(_) => "Composite",
            Self::Text { .. } => "StringArray",
        }
    }
}
