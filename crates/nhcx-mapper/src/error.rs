//! Mapper error types

use nhcx_schema::ShapeError;
use thiserror::Error;

/// Ways a mapping request can fail
///
/// Missing *optional* fields never appear here - they degrade inside the
/// bundle. No partial bundle is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum MappingError {
    /// The raw document failed ingress shape validation
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The `insurer` key held no content; the plan's owning organization
    /// cannot be built without breaking referential closure
    #[error("Extracted document has a null insurer; cannot build the plan's owning organization")]
    MissingInsurer,

    /// The `plan` key held no content
    #[error("Extracted document has a null plan body; nothing to map")]
    MissingPlan,
}
