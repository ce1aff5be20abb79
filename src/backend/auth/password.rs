/**
 * Password Hashing
 *
 * bcrypt is deliberately slow, so hashing and verification never run on the
 * async workers. Each call is moved to `tokio::task::spawn_blocking` after
 * taking a permit from a semaphore sized to `hash_workers`; a burst of logins
 * queues on the semaphore instead of filling the blocking pool.
 *
 * # Decoy hash
 *
 * When login finds no member for the identifier, the supplied password is
 * still verified, against a hash computed once at startup. An unknown
 * identifier and a wrong password therefore take the same time.
 *
 * # Length
 *
 * bcrypt only reads the first 72 bytes of a password. Signup refuses
 * anything longer, and verification treats a longer candidate as a
 * mismatch, so a stored password can never be matched by an extension of it.
 */

use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::backend::error::BackendError;
use crate::shared::api::MAX_PASSWORD_BYTES;

/// Password the decoy hash is computed from; never matches a real login
const DECOY_PASSWORD: &str = "repbook-decoy-password";

/// bcrypt hasher with a bounded worker budget
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    permits: Arc<Semaphore>,
    decoy_hash: Arc<str>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .field("workers", &self.permits.available_permits())
            .finish()
    }
}

impl PasswordHasher {
    /// Create a hasher
    ///
    /// # Arguments
    ///
    /// * `cost` - bcrypt cost factor (4..=31)
    /// * `workers` - how many hashes may run at once
    ///
    /// # Errors
    ///
    /// Returns the bcrypt error if `cost` is out of range.
    pub fn new(cost: u32, workers: usize) -> Result<Self, bcrypt::BcryptError> {
        let decoy_hash = bcrypt::hash(DECOY_PASSWORD, cost)?;
        Ok(Self {
            cost,
            permits: Arc::new(Semaphore::new(workers.max(1))),
            decoy_hash: Arc::from(decoy_hash),
        })
    }

    /// Hash a password for storage
    pub async fn hash(&self, password: String) -> Result<String, BackendError> {
        let cost = self.cost;
        self.run(move || bcrypt::hash(password, cost)).await
    }

    /// Check a password against a stored hash
    ///
    /// A malformed stored hash counts as a mismatch, and so does a password
    /// longer than bcrypt hashes. The hash is still checked in that case.
    pub async fn verify(&self, password: String, hash: String) -> Result<bool, BackendError> {
        let within_limit = password.len() <= MAX_PASSWORD_BYTES;
        self.run(move || match bcrypt::verify(password, &hash) {
            Ok(valid) => Ok(valid && within_limit),
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                Ok(false)
            }
        })
        .await
    }

    /// Spend the time of one verification without a real hash; always `false`
    pub async fn verify_decoy(&self, password: String) -> Result<bool, BackendError> {
        let hash = self.decoy_hash.to_string();
        self.verify(password, hash).await?;
        Ok(false)
    }

    async fn run<T, F>(&self, job: F) -> Result<T, BackendError>
    where
        F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self.permits.clone().acquire_owned().await.map_err(|e| {
            tracing::error!("Password hashing pool closed: {}", e);
            BackendError::internal("password hashing pool closed")
        })?;

        let outcome = tokio::task::spawn_blocking(move || {
            let outcome = job();
            drop(permit);
            outcome
        })
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            BackendError::internal(format!("hash worker failed: {}", e))
        })?;

        outcome.map_err(|e| BackendError::internal(format!("bcrypt: {}", e)))
    }
}
