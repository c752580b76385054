use chrono::Utc;
use review_models::{ApprovedReview, NormalizedReview};
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The review ID does not exist in the source collection.
    #[error("Review not found")]
    ReviewNotFound,

    /// Duplicate operator action: the review is already in the ledger.
    /// Surfaced rather than silently accepted.
    #[error("Review already approved")]
    AlreadyApproved,

    /// Nothing has ever been approved (no ledger document exists).
    #[error("No approved reviews found")]
    NoLedger,

    /// The review ID is not in the ledger.
    #[error("Review not found in approved list")]
    NotInLedger,

    #[error("failed to access approved reviews: {0}")]
    Io(#[from] std::io::Error),

    #[error("approved reviews file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed store of approved reviews: one JSON array, rewritten in full
/// on every mutation.
///
/// Mutations are serialized behind an in-process lock, so two handlers in
/// the same server cannot lose each other's writes. Cross-process writers
/// still race (last write wins); this is a single-operator administrative
/// tool, not a multi-writer store.
pub struct ApprovalLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ApprovalLedger {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<ApprovedReview>, LedgerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no ledger file yet");
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &[ApprovedReview]) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = entries.len(), "ledger saved");
        Ok(())
    }

    /// Approve a review for public display. Fails when the ID is not in the
    /// given collection or is already approved; otherwise stamps the review,
    /// appends it, rewrites the document and returns the stamped record.
    pub fn approve(
        &self,
        reviews: &[NormalizedReview],
        id: i64,
    ) -> Result<ApprovedReview, LedgerError> {
        let review = reviews
            .iter()
            .find(|r| r.id == id)
            .ok_or(LedgerError::ReviewNotFound)?;

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut approved = self.read_all()?;
        if approved.iter().any(|r| r.id() == id) {
            warn!(id, "duplicate approval rejected");
            return Err(LedgerError::AlreadyApproved);
        }

        let entry = ApprovedReview::new(review.clone(), Utc::now());
        approved.push(entry.clone());
        self.write_all(&approved)?;

        info!(id, "review approved");
        Ok(entry)
    }

    /// Remove a review from the ledger. Fails when no ledger document exists
    /// or the ID is not in it.
    pub fn unapprove(&self, id: i64) -> Result<(), LedgerError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !self.path.exists() {
            return Err(LedgerError::NoLedger);
        }

        let mut approved = self.read_all()?;
        let index = approved
            .iter()
            .position(|r| r.id() == id)
            .ok_or(LedgerError::NotInLedger)?;

        approved.remove(index);
        self.write_all(&approved)?;

        info!(id, "review unapproved");
        Ok(())
    }

    /// The full ledger, or the subset for one listing. An absent ledger
    /// file is an empty ledger, not an error.
    pub fn approved(&self, listing_id: Option<i64>) -> Result<Vec<ApprovedReview>, LedgerError> {
        let approved = self.read_all()?;
        match listing_id {
            Some(listing_id) => Ok(approved
                .into_iter()
                .filter(|r| r.review.listing_id == Some(listing_id))
                .collect()),
            None => Ok(approved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use serde_json::json;

    fn sample() -> Vec<NormalizedReview> {
        Normalizer::default().normalize(&json!([
            { "id": 7, "type": "guest-to-host", "status": "published",
              "guestName": "Shane Finkelstein",
              "listingName": "2B N1 A - 29 Shoreditch Heights",
              "reviewCategory": [
                  { "category": "cleanliness", "rating": 8 },
                  { "category": "communication", "rating": 10 }
              ],
              "submittedAt": "2020-08-21 22:45:14" },
            { "id": 8, "type": "guest-to-host", "status": "published",
              "guestName": "Ana Lopez",
              "listingName": "City Center Penthouse",
              "rating": 9,
              "submittedAt": "2021-01-02 10:00:00" }
        ]))
    }

    fn ledger_in(dir: &tempfile::TempDir) -> ApprovalLedger {
        ApprovalLedger::new(dir.path().join("data").join("approvedReviews.json"))
    }

    #[test]
    fn test_approve_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        let reviews = sample();

        // Empty ledger before any approval
        assert!(ledger.approved(None).unwrap().is_empty());

        let entry = ledger.approve(&reviews, 7).unwrap();
        assert!(entry.is_approved);
        assert_eq!(entry.id(), 7);

        let approved = ledger.approved(None).unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id(), 7);
        assert_eq!(approved[0].review.average_rating, Some(9.0));

        ledger.unapprove(7).unwrap();
        assert!(ledger.approved(None).unwrap().is_empty());
    }

    #[test]
    fn test_approve_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        let err = ledger.approve(&sample(), 999).unwrap_err();
        assert!(matches!(err, LedgerError::ReviewNotFound));
    }

    #[test]
    fn test_double_approve_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        let reviews = sample();

        ledger.approve(&reviews, 7).unwrap();
        let err = ledger.approve(&reviews, 7).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyApproved));

        // The ledger never holds duplicate IDs
        assert_eq!(ledger.approved(None).unwrap().len(), 1);
    }

    #[test]
    fn test_unapprove_without_ledger_file() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        let err = ledger.unapprove(7).unwrap_err();
        assert!(matches!(err, LedgerError::NoLedger));
    }

    #[test]
    fn test_unapprove_id_missing_from_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        ledger.approve(&sample(), 7).unwrap();
        let err = ledger.unapprove(8).unwrap_err();
        assert!(matches!(err, LedgerError::NotInLedger));
    }

    #[test]
    fn test_reapprove_after_unapprove() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        let reviews = sample();

        ledger.approve(&reviews, 7).unwrap();
        ledger.unapprove(7).unwrap();
        // The state machine allows a second approval after removal
        ledger.approve(&reviews, 7).unwrap();
        assert_eq!(ledger.approved(None).unwrap().len(), 1);
    }

    #[test]
    fn test_approved_filters_by_listing_id() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        let reviews = sample();

        ledger.approve(&reviews, 7).unwrap(); // listing 101
        ledger.approve(&reviews, 8).unwrap(); // listing 103

        let all = ledger.approved(None).unwrap();
        assert_eq!(all.len(), 2);

        let for_101 = ledger.approved(Some(101)).unwrap();
        assert_eq!(for_101.len(), 1);
        assert_eq!(for_101[0].id(), 7);

        assert!(ledger.approved(Some(999)).unwrap().is_empty());
    }

    #[test]
    fn test_ledger_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let reviews = sample();
        {
            let ledger = ledger_in(&dir);
            ledger.approve(&reviews, 7).unwrap();
        }
        // A fresh instance reads the same document
        let ledger = ledger_in(&dir);
        let approved = ledger.approved(None).unwrap();
        assert_eq!(approved.len(), 1);
        assert!(approved[0].is_approved);
    }
}
