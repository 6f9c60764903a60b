//! Shortcode registry: batch creation, lookup, and click recording.

use std::collections::{BTreeSet, HashSet};

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{ClickEvent, LinkRecord, LinkSubmission};
use crate::domain::store::LinkStore;
use crate::error::{FieldError, RegistryError};
use crate::utils::code_generator::{GENERATED_CODE_LENGTH, MAX_CODE_LENGTH, generate_code};
use crate::utils::validation::validate_submission;

/// Most submissions accepted in a single batch.
pub const MAX_BATCH_SIZE: usize = 5;

/// Validity window applied when a submission does not name one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Candidate draws per code length before widening to the next length.
const MAX_ATTEMPTS_PER_LENGTH: usize = 20;

/// The link registry, generic over its persistence backend.
///
/// All operations work on the full collection held by the store: load,
/// apply the change in memory, save the whole collection back. A rejected
/// save leaves the stored collection untouched, so every operation is
/// all-or-nothing.
pub struct Registry<S: LinkStore> {
    store: S,
}

impl<S: LinkStore> Registry<S> {
    /// Creates a registry backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates up to [`MAX_BATCH_SIZE`] short links in one shot.
    ///
    /// The batch is atomic: every submission must validate, every preferred
    /// shortcode must be free, and the save must succeed, or no link is
    /// created at all. Returned records are in submission order.
    ///
    /// Submissions without a validity window get [`DEFAULT_VALIDITY_MINUTES`].
    /// Submissions without a preferred shortcode get a generated base62 code,
    /// starting at [`GENERATED_CODE_LENGTH`] characters and widening after
    /// repeated collisions.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] when any entry breaks a field rule,
    ///   with one [`FieldError`] per violation across the whole batch
    /// - [`RegistryError::DuplicateInBatch`] when two entries ask for the
    ///   same preferred shortcode
    /// - [`RegistryError::ShortcodeTaken`] when a preferred shortcode is
    ///   already registered
    /// - [`RegistryError::CodeSpaceExhausted`] when generation cannot find
    ///   a free code within its retry schedule
    /// - [`RegistryError::StorageRejected`] when the store refuses the write
    pub fn create_batch(
        &self,
        submissions: Vec<LinkSubmission>,
    ) -> Result<Vec<LinkRecord>, RegistryError> {
        if submissions.is_empty() {
            return Err(RegistryError::validation(vec![FieldError::new(
                0,
                "batch",
                "batch must contain at least one URL",
            )]));
        }

        if submissions.len() > MAX_BATCH_SIZE {
            return Err(RegistryError::validation(vec![FieldError::new(
                0,
                "batch",
                format!(
                    "batch may contain at most {MAX_BATCH_SIZE} URLs, got {}",
                    submissions.len()
                ),
            )]));
        }

        let mut errors = Vec::new();
        for (index, submission) in submissions.iter().enumerate() {
            errors.extend(validate_submission(index, submission));
        }
        if !errors.is_empty() {
            return Err(RegistryError::validation(errors));
        }

        check_batch_duplicates(&submissions)?;

        let mut records = self.store.load();
        let mut occupied: HashSet<String> =
            records.iter().map(|r| r.shortcode.clone()).collect();

        let now = Utc::now();
        let mut created = Vec::with_capacity(submissions.len());

        for submission in &submissions {
            let code = match submission.preferred_code() {
                Some(preferred) => {
                    if occupied.contains(preferred) {
                        return Err(RegistryError::shortcode_taken(preferred));
                    }
                    preferred.to_string()
                }
                None => allocate_code(&occupied)?,
            };

            let validity = submission
                .validity_minutes
                .unwrap_or(DEFAULT_VALIDITY_MINUTES);

            let record = LinkRecord::new(
                code.clone(),
                submission.trimmed_url().to_string(),
                now,
                Some(now + Duration::minutes(validity)),
            );

            occupied.insert(code);
            created.push(record);
        }

        records.extend(created.iter().cloned());
        self.persist(&records)?;

        info!(count = created.len(), "created short links");
        Ok(created)
    }

    /// Finds a record by exact shortcode, expired or not.
    pub fn lookup(&self, shortcode: &str) -> Option<LinkRecord> {
        let found = self
            .store
            .load()
            .into_iter()
            .find(|r| r.shortcode == shortcode);

        if found.is_none() {
            debug!(shortcode, "lookup miss");
        }
        found
    }

    /// Appends a click event to a record and persists the collection.
    ///
    /// The event comes from the caller, who owns the click metadata.
    /// Expiry is not checked here; callers that must gate on it use
    /// [`Self::resolve`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown shortcode and
    /// [`RegistryError::StorageRejected`] when the save fails, in which
    /// case the click is lost.
    pub fn record_click(
        &self,
        shortcode: &str,
        event: ClickEvent,
    ) -> Result<LinkRecord, RegistryError> {
        let mut records = self.store.load();

        let record = records
            .iter_mut()
            .find(|r| r.shortcode == shortcode)
            .ok_or_else(|| RegistryError::not_found(shortcode))?;

        record.register_click(event);
        let updated = record.clone();

        self.persist(&records)?;
        debug!(shortcode, clicks = updated.clicks, "recorded click");
        Ok(updated)
    }

    /// Resolves a shortcode for redirection: looks it up, enforces expiry,
    /// and records the click.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] for an unknown shortcode
    /// - [`RegistryError::Expired`] when the validity window has passed;
    ///   no click is recorded for expired links
    /// - [`RegistryError::StorageRejected`] when persisting the click fails
    pub fn resolve(
        &self,
        shortcode: &str,
        event: ClickEvent,
    ) -> Result<LinkRecord, RegistryError> {
        let mut records = self.store.load();

        let record = records
            .iter_mut()
            .find(|r| r.shortcode == shortcode)
            .ok_or_else(|| RegistryError::not_found(shortcode))?;

        if let Some(expiry_at) = record.expiry_at {
            if record.is_expired() {
                debug!(shortcode, %expiry_at, "refused expired link");
                return Err(RegistryError::Expired {
                    shortcode: shortcode.to_string(),
                    expiry_at,
                });
            }
        }

        record.register_click(event);
        let updated = record.clone();

        self.persist(&records)?;
        Ok(updated)
    }

    /// Returns the full collection in insertion order.
    pub fn list(&self) -> Vec<LinkRecord> {
        self.store.load()
    }

    fn persist(&self, records: &[LinkRecord]) -> Result<(), RegistryError> {
        if self.store.save(records) {
            Ok(())
        } else {
            warn!("store rejected save; collection unchanged");
            Err(RegistryError::StorageRejected)
        }
    }
}

/// Rejects batches where two entries claim the same preferred shortcode.
fn check_batch_duplicates(submissions: &[LinkSubmission]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();

    for submission in submissions {
        if let Some(code) = submission.preferred_code() {
            if !seen.insert(code) {
                duplicates.insert(code.to_string());
            }
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(RegistryError::DuplicateInBatch {
            codes: duplicates.into_iter().collect(),
        })
    }
}

/// Picks a free shortcode using the production generator.
fn allocate_code(occupied: &HashSet<String>) -> Result<String, RegistryError> {
    allocate_code_with(occupied, generate_code)
}

/// Draws candidates of increasing length until one is free.
///
/// Tries [`MAX_ATTEMPTS_PER_LENGTH`] candidates per length, from
/// [`GENERATED_CODE_LENGTH`] up to [`MAX_CODE_LENGTH`], then gives up
/// instead of looping forever on a saturated code space.
fn allocate_code_with(
    occupied: &HashSet<String>,
    mut generate: impl FnMut(usize) -> String,
) -> Result<String, RegistryError> {
    let mut attempts = 0;

    for length in GENERATED_CODE_LENGTH..=MAX_CODE_LENGTH {
        for _ in 0..MAX_ATTEMPTS_PER_LENGTH {
            attempts += 1;
            let candidate = generate(length);
            if !occupied.contains(&candidate) {
                return Ok(candidate);
            }
        }
        debug!(length, "code space crowded, widening");
    }

    Err(RegistryError::CodeSpaceExhausted { attempts })
}
