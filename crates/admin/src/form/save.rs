//! The save orchestrator: validate, upsert the parent, reconcile queued
//! variation operations, resync, reload.

use std::future::Future;
use std::time::Duration;

use futures::future::{join, join_all};
use tracing::{debug, info, warn};

use backroom_core::ProductId;

use crate::catalog::builder::build_product_payload;
use crate::error::FormError;
use crate::form::draft::FormAction;
use crate::woo::{ProductStatus, ProductType, StoreApi, WooError};

use super::editor::{EditorMode, ProductEditor};

const ATTACH_PROBE_ATTEMPTS: u32 = 5;
const ATTACH_PROBE_INITIAL_DELAY: Duration = Duration::from_millis(200);

/// What a successful save produced.
///
/// The caller decides what follows: the edit flow invalidates its cached
/// lists and navigates, the create flow shows a confirmation with a
/// reset-and-create-another option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub product_id: ProductId,
    /// True when this save created the product.
    pub created: bool,
}

impl<A: StoreApi> ProductEditor<A> {
    /// Run the full save sequence with the given target status.
    ///
    /// Validate, create-or-update the parent, then - for variable products -
    /// execute every queued variation delete and staged create concurrently,
    /// clear the queues only once all of them succeeded, fire the
    /// best-effort parent pricing resync, and reload the canonical
    /// variation list.
    ///
    /// On failure the error lands on [`ProductEditor::last_error`] and both
    /// queues keep their contents, so a retry needs no re-entry of data.
    pub async fn save(&mut self, status: ProductStatus) -> Option<SaveOutcome> {
        self.saving = true;
        let result = self.save_inner(status).await;
        self.saving = false;

        match result {
            Ok(outcome) => {
                self.last_error = None;
                info!(product = %outcome.product_id, created = outcome.created, "Product saved");
                Some(outcome)
            }
            Err(err) => {
                warn!(error = %err, "Save failed");
                self.last_error = Some(err);
                None
            }
        }
    }

    async fn save_inner(&mut self, status: ProductStatus) -> Result<SaveOutcome, FormError> {
        self.draft.validate()?;

        let attributes = self.product_attributes_payload().await;
        let payload = build_product_payload(&self.draft, status, attributes);

        let (product_id, created) = match self.mode {
            EditorMode::Edit(id) => {
                self.api.update_product(id, &payload).await?;
                (id, false)
            }
            EditorMode::Create => {
                let id = self.api.create_product(&payload).await?;
                self.mode = EditorMode::Edit(id);
                (id, true)
            }
        };

        if self.draft.kind == ProductType::Variable {
            self.reconcile_variations(product_id, created, status)
                .await?;
        }

        self.draft.apply(FormAction::SetStatus(status));
        Ok(SaveOutcome {
            product_id,
            created,
        })
    }

    /// Execute the queued variation operations against the (now existing)
    /// parent.
    ///
    /// Deletes and creates target different variation ids, so they run
    /// concurrently; the queues are cleared only after every one of them
    /// succeeded.
    async fn reconcile_variations(
        &mut self,
        product_id: ProductId,
        freshly_created: bool,
        status: ProductStatus,
    ) -> Result<(), FormError> {
        if self.staging.deleted().is_empty() && self.staging.pending().is_empty() {
            return Ok(());
        }

        if freshly_created {
            wait_until_attachable(&self.api, product_id).await?;
        }

        let delete_calls = join_all(
            self.staging
                .deleted()
                .iter()
                .map(|&id| self.api.delete_variation(product_id, id)),
        );
        let create_calls = join_all(
            self.staging
                .pending()
                .iter()
                .map(|pending| self.api.create_variation(product_id, &pending.payload)),
        );

        let (delete_results, create_results) = join(delete_calls, create_calls).await;
        for result in delete_results {
            result?;
        }
        for result in create_results {
            let _ = result?;
        }

        self.staging.clear_deleted();
        self.staging.clear_pending();

        best_effort(
            "parent pricing resync",
            self.api.touch_product(product_id, status),
        )
        .await;

        if let Some(variations) =
            best_effort("variation list refresh", self.api.list_variations(product_id)).await
        {
            self.staging.set_persisted(variations);
        }

        Ok(())
    }
}

/// Probe that a newly created parent accepts variation reads.
///
/// The catalog is eventually consistent: a fresh product id may not be
/// queryable for variation attachment right away. Bounded retry with
/// doubling backoff; the last error surfaces if the endpoint never becomes
/// ready.
async fn wait_until_attachable<A: StoreApi>(
    api: &A,
    product: ProductId,
) -> Result<(), WooError> {
    let mut delay = ATTACH_PROBE_INITIAL_DELAY;
    let mut last_err = None;

    for attempt in 1..=ATTACH_PROBE_ATTEMPTS {
        match api.list_variations(product).await {
            Ok(_) => return Ok(()),
            Err(err) => {
                debug!(product = %product, attempt, error = %err, "Variation endpoint not ready");
                last_err = Some(err);
            }
        }
        if attempt < ATTACH_PROBE_ATTEMPTS {
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    Err(last_err.unwrap_or_else(|| {
        WooError::UnexpectedResponse("variation endpoint never became ready".to_string())
    }))
}

/// Run a store call whose failure must not fail the surrounding flow.
///
/// Failures are logged and swallowed; the caller gets `None`.
async fn best_effort<T>(
    what: &str,
    operation: impl Future<Output = Result<T, WooError>>,
) -> Option<T> {
    match operation.await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = %err, "Best-effort {what} failed");
            None
        }
    }
}
