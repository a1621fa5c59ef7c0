//! Short ID generation and collision handling
//!
//! IDs are 6 symbols drawn uniformly from `[A-Za-z0-9]`, which gives
//! 62^6 (about 56.8 billion) possible values. Collisions are rare, but the
//! allocator still checks every candidate and gives up after a fixed number
//! of attempts instead of looping forever.

use rand::{distr::Alphanumeric, Rng};
use thiserror::Error;

use crate::error::{ApiError, StoreError};

/// Length of every generated short ID
pub const SHORT_ID_LEN: usize = 6;

/// Candidates tried before allocation gives up
pub const MAX_ATTEMPTS: usize = 10;

#[derive(Debug, Error)]
pub enum AllocateError {
    #[error("no unused short ID after {attempts} attempts")]
    Exhausted { attempts: usize },

    /// The uniqueness lookup itself failed
    #[error(transparent)]
    Lookup(#[from] StoreError),
}

impl From<AllocateError> for ApiError {
    fn from(err: AllocateError) -> Self {
        match err {
            AllocateError::Exhausted { .. } => ApiError::ShortIdExhausted,
            AllocateError::Lookup(store) => ApiError::Store(store),
        }
    }
}

/// Draws a single candidate from `rng`
pub fn generate_short_id<R: Rng>(rng: &mut R) -> String {
    (0..SHORT_ID_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Proposes a short ID that `is_taken` reports as unused
///
/// Uses the thread-local RNG. See [`allocate_with`].
pub fn allocate<F>(is_taken: F) -> Result<String, AllocateError>
where
    F: FnMut(&str) -> Result<bool, StoreError>,
{
    allocate_with(&mut rand::rng(), is_taken)
}

/// Proposes a short ID that `is_taken` reports as unused
///
/// Tries at most [`MAX_ATTEMPTS`] candidates. The allocator never writes
/// anything; reserving the returned ID is up to the caller, and the store's
/// unique index still has the final say.
///
/// # Errors
///
/// * `AllocateError::Exhausted` - every candidate collided
/// * `AllocateError::Lookup` - `is_taken` failed; allocation stops immediately
pub fn allocate_with<R, F>(rng: &mut R, mut is_taken: F) -> Result<String, AllocateError>
where
    R: Rng,
    F: FnMut(&str) -> Result<bool, StoreError>,
{
    for attempt in 1..=MAX_ATTEMPTS {
        let candidate = generate_short_id(rng);
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
        tracing::warn!(attempt, candidate = %candidate, "short ID collision");
    }

    Err(AllocateError::Exhausted {
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_generated_ids_are_six_alphanumerics() {
        let mut rng = seeded();
        for _ in 0..500 {
            let id = generate_short_id(&mut rng);
            assert_eq!(id.len(), SHORT_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()), "bad id {id}");
        }
    }

    #[test]
    fn test_first_free_candidate_is_returned() {
        let mut checks = 0;
        let id = allocate_with(&mut seeded(), |_| {
            checks += 1;
            Ok(false)
        })
        .unwrap();

        assert_eq!(checks, 1);
        assert_eq!(id.len(), SHORT_ID_LEN);
    }

    #[test]
    fn test_retries_past_collisions() {
        let mut seen = Vec::new();
        let id = allocate_with(&mut seeded(), |candidate| {
            seen.push(candidate.to_string());
            Ok(seen.len() <= 3)
        })
        .unwrap();

        assert_eq!(seen.len(), 4);
        assert_eq!(seen.last(), Some(&id));
    }

    #[test]
    fn test_gives_up_after_exactly_ten_attempts() {
        let mut checks = 0;
        let result = allocate(|_| {
            checks += 1;
            Ok(true)
        });

        assert_eq!(checks, MAX_ATTEMPTS);
        assert!(matches!(
            result,
            Err(AllocateError::Exhausted { attempts: 10 })
        ));
    }

    #[test]
    fn test_lookup_failure_stops_allocation() {
        let mut checks = 0;
        let result = allocate(|_| {
            checks += 1;
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        });

        assert_eq!(checks, 1);
        assert!(matches!(result, Err(AllocateError::Lookup(_))));
    }

    #[test]
    fn test_exhaustion_maps_to_server_error() {
        let api: ApiError = AllocateError::Exhausted { attempts: 10 }.into();
        assert!(matches!(api, ApiError::ShortIdExhausted));
    }
}
