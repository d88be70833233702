//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two prices of
/// `9.99` are the same price, while two products with the same name are still
/// different products if their ids differ.
///
/// To "modify" a value object, construct a new one. Constructors are the only
/// place where a value object's invariants are checked, so every instance in
/// circulation is valid.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
