use crate::database::error::DatabaseError;

pub(crate) mod booking;
pub(crate) mod membership;
pub(crate) mod page;
pub(crate) mod seva;
pub(crate) mod user;

type Result<T, E = DatabaseError> = std::result::Result<T, E>;

/// Convert every stored row into its DTO, failing on the first malformed one.
fn into_dtos<M, D>(rows: Vec<M>) -> Result<Vec<D>>
where
    D: TryFrom<M, Error = DatabaseError>,
{
    rows.into_iter().map(D::try_from).collect()
}
