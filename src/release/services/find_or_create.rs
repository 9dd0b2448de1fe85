//! Lookup-by-deterministic-key with create on a confirmed miss.
//!
//! There is no cross-process locking: two concurrent callers may both miss
//! and both create.

use std::future::Future;

/// Outcome of a find-or-create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOrCreate<T> {
    /// An existing entity matched the key and was returned unchanged.
    Found(T),
    /// No entity matched, so one was created.
    Created(T),
}

impl<T> FindOrCreate<T> {
    /// Reports whether the entity was created by this call.
    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Returns the entity.
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Found(value) | Self::Created(value) => value,
        }
    }
}

/// Runs `find`; on a miss runs `create` exactly once.
///
/// # Errors
///
/// Returns the first error from `find`, or the error from `create`.
pub async fn find_or_create<T, E, Find, Create, CreateFut>(
    find: Find,
    create: Create,
) -> Result<FindOrCreate<T>, E>
where
    Find: Future<Output = Result<Option<T>, E>>,
    Create: FnOnce() -> CreateFut,
    CreateFut: Future<Output = Result<T, E>>,
{
    match find.await? {
        Some(existing) => Ok(FindOrCreate::Found(existing)),
        None => Ok(FindOrCreate::Created(create().await?)),
    }
}
