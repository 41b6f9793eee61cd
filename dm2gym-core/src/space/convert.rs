use super::{BoxSpace, DictSpace, GymSpace, SpaceDescriptor};
use crate::error::Dm2GymError;
use anyhow::Result;
use log::trace;
use ndarray::{ArrayD, IxDyn};

/// Converts a simulator space descriptor into the equivalent gym space.
///
/// * Bounded arrays become boxes with the bounds of the descriptor.
/// * Unbounded arrays become boxes with infinite bounds.
/// * Composites become dicts with the same keys, in the same order.
///
/// Shapes and element types are preserved. Descriptors without a gym counterpart
/// fail with [`Dm2GymError::UnsupportedSpaceKind`].
///
/// ```rust
/// use dm2gym_core::{convert_space, Dtype, SpaceDescriptor};
///
/// let descriptor = SpaceDescriptor::bounded(&[6], Dtype::Float64, -1.0, 1.0);
/// let space = convert_space(&descriptor).unwrap();
/// assert_eq!(space.shape(), Some(&[6usize][..]));
/// ```
pub fn convert_space(descriptor: &SpaceDescriptor) -> Result<GymSpace> {
    trace!("convert_space({})", descriptor.kind());

    match descriptor {
        SpaceDescriptor::Bounded {
            shape,
            dtype,
            minimum,
            maximum,
        } => {
            let low = broadcast_bound(minimum, shape)?;
            let high = broadcast_bound(maximum, shape)?;
            let space = BoxSpace::new(low, high, *dtype)?;
            if space.shape() != shape.as_slice() {
                return Err(Dm2GymError::BoundsShapeMismatch {
                    expected: shape.clone(),
                    found: space.shape().to_vec(),
                }
                .into());
            }
            Ok(GymSpace::Box(space))
        }
        SpaceDescriptor::Unbounded { shape, dtype } => {
            Ok(GymSpace::Box(BoxSpace::unbounded(shape, *dtype)))
        }
        SpaceDescriptor::Composite(items) => {
            let spaces = items
                .iter()
                .map(|(key, value)| Ok((key.clone(), convert_space(value)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(GymSpace::Dict(DictSpace::new(spaces)))
        }
        SpaceDescriptor::Text { .. } => {
            Err(Dm2GymError::UnsupportedSpaceKind(descriptor.kind().to_string()).into())
        }
    }
}

fn broadcast_bound(bound: &ArrayD<f64>, shape: &[usize]) -> Result<ArrayD<f64>> {
    match bound.broadcast(IxDyn(shape)) {
        Some(view) => Ok(view.to_owned()),
        None => Err(Dm2GymError::BoundsShapeMismatch {
            expected: shape.to_vec(),
            found: bound.shape().to_vec(),
        }
        .into()),
    }
}
