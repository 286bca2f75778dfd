use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The product has no size entries and no fallback size chart was found.
    #[error("No size data available")]
    NoSizeData,

    /// Size entries exist but none carries a dimension the engine can score.
    #[error("No usable measurements in any size entry")]
    MissingMeasurements,

    #[error("Internal error: {0}")]
    Internal(String),
}
