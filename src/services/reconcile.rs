use crate::domain::location::PlaceEnrichment;
use crate::domain::types::PlaceId;
use crate::forms::places::ExternalPlaceRecord;
use crate::repository::LocationWriter;

use super::errors::store_error;
use super::{ServiceError, ServiceResult};

/// Overwrite the enrichment fields of the location keyed by
/// `external_place_id` with the provider's record.
///
/// Never creates rows. Applying the same record twice leaves the row as the
/// first application did.
pub fn reconcile_from_external<R>(
    external_place_id: &str,
    record: ExternalPlaceRecord,
    repo: &R,
) -> ServiceResult<()>
where
    R: LocationWriter,
{
    let place_id = PlaceId::new(external_place_id)?;
    if let Some(declared) = record.declared_place_id().filter(|d| *d != place_id.as_str()) {
        log::warn!("Place record for {place_id} carries a different place id {declared}");
        return Err(ServiceError::InvalidInput(format!(
            "record place id {declared} does not match {place_id}"
        )));
    }

    let enrichment = PlaceEnrichment::try_from(record)?;
    match repo.update_location_from_place(&place_id, &enrichment) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => Err(store_error("reconcile location", e)),
    }
}

/// Tally of a [`reconcile_batch`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub reconciled: usize,
    /// Records whose place id matched no stored location.
    pub unmatched: usize,
    /// Records without a place id, invalid records and store failures.
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.reconciled + self.unmatched + self.failed
    }

    /// Unmatched records do not fail a batch.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Reconcile every record against the location keyed by its own place id.
pub fn reconcile_batch<R, I>(records: I, repo: &R) -> BatchSummary
where
    R: LocationWriter,
    I: IntoIterator<Item = ExternalPlaceRecord>,
{
    let mut summary = BatchSummary::default();

    for record in records {
        let Some(place_id) = record.declared_place_id().map(str::to_owned) else {
            log::warn!("Skipping place record without a place_id");
            summary.failed += 1;
            continue;
        };
        match reconcile_from_external(&place_id, record, repo) {
            Ok(()) => {
                log::info!("Reconciled {place_id}");
                summary.reconciled += 1;
            }
            Err(ServiceError::NotFound) => {
                log::info!("No location for {place_id}");
                summary.unmatched += 1;
            }
            Err(e) => {
                log::error!("Failed to reconcile {place_id}: {e}");
                summary.failed += 1;
            }
        }
    }

    summary
}
