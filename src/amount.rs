use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{AddAssign, SubAssign};

use num_traits::Float;

/// A trait representing a real-valued flow amount (rate, capacity, supply).
pub trait Amount: Float + Sum<Self> + AddAssign + SubAssign + Debug + Display + Default {}

impl Amount for f64 {}

impl Amount for f32 {}

/// `x` if it is positive, zero otherwise.
pub fn positive_part<A: Amount>(x: A) -> A {
    x.max(A::zero())
}

/// `a <= b` allowing for an absolute slack of `tolerance`.
pub fn le_tol<A: Amount>(a: A, b: A, tolerance: A) -> bool {
    a <= b + tolerance
}

/// `a` and `b` are within `tolerance` of each other.
pub fn approx_eq<A: Amount>(a: A, b: A, tolerance: A) -> bool {
    (a - b).abs() <= tolerance
}

/// Residual `capacity - used` clamped at zero, absorbing small negative drift.
pub fn residual<A: Amount>(capacity: A, used: A) -> A {
    positive_part(capacity - used)
}

/// `tolerance`, widened to a few ulps of `magnitude` when that is coarser.
pub fn scaled_tolerance<A: Amount>(tolerance: A, magnitude: A) -> A {
    let ulps = (A::one() + A::one()).powi(6);
    tolerance.max(magnitude.abs() * A::epsilon() * ulps)
}
