//! Grid edge (boundary) behaviour.

/// How a lattice handles coordinates that fall off its edges.
///
/// The life-like rules count neighbours with [`EdgeBehavior::Absorb`]
/// (hard edges, out-of-bounds neighbours simply don't exist). Langton's
/// Ant moves its agents with [`EdgeBehavior::Wrap`] (torus).
///
/// # Examples
///
/// ```
/// use simwall_core::EdgeBehavior;
///
/// assert_eq!(EdgeBehavior::Absorb.resolve(-1, 5), None);
/// assert_eq!(EdgeBehavior::Wrap.resolve(-1, 5), Some(4));
/// assert_eq!(EdgeBehavior::Wrap.resolve(5, 5), Some(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds coordinate wraps to the opposite side (periodic).
    Wrap,
    /// Out-of-bounds coordinate is omitted.
    Absorb,
}

impl EdgeBehavior {
    /// Resolve a single axis value against an axis of length `len`.
    ///
    /// Returns `Some(resolved)` or `None` for an absorbed out-of-bounds
    /// value. `len` must be non-zero.
    pub fn resolve(self, val: i64, len: u32) -> Option<u32> {
        let len = i64::from(len);
        if val >= 0 && val < len {
            return Some(val as u32);
        }
        match self {
            Self::Absorb => None,
            Self::Wrap => Some(val.rem_euclid(len) as u32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_in_bounds() {
        assert_eq!(EdgeBehavior::Absorb.resolve(2, 5), Some(2));
        assert_eq!(EdgeBehavior::Wrap.resolve(0, 5), Some(0));
    }

    #[test]
    fn resolve_absorb_out_of_bounds() {
        assert_eq!(EdgeBehavior::Absorb.resolve(-1, 5), None);
        assert_eq!(EdgeBehavior::Absorb.resolve(5, 5), None);
    }

    #[test]
    fn resolve_wrap() {
        assert_eq!(EdgeBehavior::Wrap.resolve(-1, 5), Some(4));
        assert_eq!(EdgeBehavior::Wrap.resolve(5, 5), Some(0));
        assert_eq!(EdgeBehavior::Wrap.resolve(7, 5), Some(2));
        assert_eq!(EdgeBehavior::Wrap.resolve(-6, 5), Some(4));
    }

    #[test]
    fn resolve_single_cell_axis() {
        assert_eq!(EdgeBehavior::Wrap.resolve(-1, 1), Some(0));
        assert_eq!(EdgeBehavior::Wrap.resolve(1, 1), Some(0));
        assert_eq!(EdgeBehavior::Absorb.resolve(1, 1), None);
    }
}
