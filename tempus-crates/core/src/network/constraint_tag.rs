use std::num::NonZero;

#[cfg(doc)]
use crate::TemporalNetworkManager;

/// Identifies a group of constraints so that they can later be removed together, e.g. every
/// constraint a single planning decision introduced.
///
/// Tags cannot be created directly; they are handed out by
/// [`TemporalNetworkManager::new_constraint_tag`], which keeps them unique within the manager and
/// its copies. The underlying integer is available through the [`Into`] implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintTag(NonZero<u32>);

impl From<ConstraintTag> for NonZero<u32> {
    fn from(value: ConstraintTag) -> Self {
        value.0
    }
}

impl ConstraintTag {
    pub(crate) fn from_non_zero(non_zero: NonZero<u32>) -> ConstraintTag {
        ConstraintTag(non_zero)
    }
}
