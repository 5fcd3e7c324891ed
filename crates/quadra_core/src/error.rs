//! # Core Error Types
//!
//! Only the conditions the engine reports instead of trusting the caller.
//! Malformed subsprite/quad indices are programmer errors and panic through
//! slice bounds checks.

use thiserror::Error;

use crate::ecs::Entity;

/// Errors that can occur in the core engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The entity freelist is empty.
    #[error("entity capacity exhausted: all {capacity} entities are live")]
    EntitiesExhausted {
        /// Configured entity capacity.
        capacity: usize,
    },

    /// A checked accessor found no component for the entity.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// The entity that was looked up.
        entity: Entity,
        /// Component type name.
        component: &'static str,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
