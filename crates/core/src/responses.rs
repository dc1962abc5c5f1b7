//! Response recording.
//!
//! End-user submissions are append-only: each submit adds one record to the
//! responses collection. The first response a survey ever receives also
//! stamps the survey's `first_response_at`, exactly once; only an explicit
//! reset clears it again.

use crate::error::{KioskError, KioskResult};
use crate::model::{Response, SurveyId};
use crate::store::DataStore;
use chrono::Utc;
use kiosk_types::ItemId;
use std::collections::HashSet;
use std::sync::Arc;

/// Records end-user survey submissions.
#[derive(Debug, Clone)]
pub struct ResponseRecorder {
    store: Arc<DataStore>,
}

impl ResponseRecorder {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self { store }
    }

    /// Records a submission for the given survey.
    ///
    /// The survey must exist and every selected id must name one of its
    /// items; submissions referencing unknown surveys or items are rejected
    /// rather than silently stored. Duplicate selections are collapsed,
    /// keeping the first occurrence.
    ///
    /// After the response is appended, the survey's `first_response_at` is
    /// stamped if this was its first response. The whole read-modify-write
    /// runs under the store's write lock.
    ///
    /// # Errors
    ///
    /// - `KioskError::SurveyNotFound` if the survey id is unknown
    /// - `KioskError::MalformedInput` if a selected id is empty or does not
    ///   name an item of the survey
    /// - storage errors from loading or saving either collection
    pub fn submit(&self, survey_id: &SurveyId, selected: &[String]) -> KioskResult<Response> {
        let _guard = self.store.lock_for_write();

        let mut surveys = self.store.load_surveys()?;
        let survey = surveys
            .iter_mut()
            .find(|s| &s.id == survey_id)
            .ok_or_else(|| KioskError::SurveyNotFound(survey_id.clone()))?;

        let mut seen = HashSet::new();
        let mut selected_items = Vec::with_capacity(selected.len());
        for raw in selected {
            let item_id = ItemId::new(raw)
                .map_err(|_| KioskError::MalformedInput("selected item id is empty".into()))?;
            if survey.item(&item_id).is_none() {
                return Err(KioskError::MalformedInput(format!(
                    "survey {} has no item '{}'",
                    survey_id, item_id
                )));
            }
            if seen.insert(item_id.clone()) {
                selected_items.push(item_id);
            }
        }

        let response = Response {
            survey_id: survey_id.clone(),
            selected_items,
            timestamp: Utc::now(),
        };

        let mut responses = self.store.load_responses()?;
        responses.push(response.clone());
        self.store.save_responses(&responses)?;

        // Set-once: only the very first response stamps the survey.
        if survey.first_response_at.is_none() {
            survey.first_response_at = Some(response.timestamp);
            self.store.save_surveys(&surveys)?;
        }

        Ok(response)
    }
}
