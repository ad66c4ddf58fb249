#[cfg(feature = "std")]
pub trait AppearKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> AppearKey for T {}

#[cfg(not(feature = "std"))]
pub trait AppearKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> AppearKey for T {}
