use thiserror::Error;

/// Efficiency requested for an entity whose effort is zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot compute efficiency for {entity}: effort (EHB) is zero")]
pub struct DivisionError {
    pub entity: String,
}
