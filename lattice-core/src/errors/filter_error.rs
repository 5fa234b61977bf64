/// Filter-validation errors, surfaced before any index work begins.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("conflicting {field} range: lower bound is after upper bound")]
    ConflictingRange { field: &'static str },
}
