//! Shared traits for purchase-tracking primitives.

/// Exposes a stable identifier for entities stored in the collection.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a common contract for retrieving monetary values.
pub trait Valued {
    fn value(&self) -> f64;
}
