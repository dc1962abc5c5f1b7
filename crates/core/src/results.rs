//! Result aggregation for a survey's responses.
//!
//! Tallies are computed on demand from the full responses collection; no
//! counts are cached in the documents. For each item of the survey, the
//! count is the number of responses that selected it, and the percentage is
//! `count / total_responses * 100` rounded to one decimal place (`0.0` when
//! there are no responses). Items are returned sorted by count descending;
//! the sort is stable, so items with equal counts keep their survey order.

use crate::error::{KioskError, KioskResult};
use crate::model::SurveyId;
use crate::store::DataStore;
use kiosk_types::{ImageName, ItemId};
use serde::Serialize;

/// Tally for one survey item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTally {
    pub id: ItemId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageName>,
    pub count: usize,
    pub percentage: f64,
}

/// Aggregated results for one survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyResults {
    pub survey_id: SurveyId,
    pub total_responses: usize,
    pub items: Vec<ItemTally>,
}

/// Computes the aggregated results for a survey.
///
/// A response can select zero, one, or many items, so the item counts are
/// independent of the response total: their sum may be smaller or larger
/// than `total_responses`.
///
/// # Errors
///
/// Returns `KioskError::SurveyNotFound` if the survey id is unknown, or a
/// storage error if either collection cannot be loaded.
pub fn compute_results(store: &DataStore, survey_id: &SurveyId) -> KioskResult<SurveyResults> {
    let surveys = store.load_surveys()?;
    let survey = surveys
        .iter()
        .find(|s| &s.id == survey_id)
        .ok_or_else(|| KioskError::SurveyNotFound(survey_id.clone()))?;

    let responses = store.load_responses()?;
    let survey_responses: Vec<_> = responses
        .iter()
        .filter(|r| &r.survey_id == survey_id)
        .collect();
    let total_responses = survey_responses.len();

    let mut items: Vec<ItemTally> = survey
        .items
        .iter()
        .map(|item| {
            let count = survey_responses
                .iter()
                .filter(|r| r.selected_items.contains(&item.id))
                .count();
            ItemTally {
                id: item.id.clone(),
                text: item.text.clone(),
                image: item.image.clone(),
                count,
                percentage: percentage(count, total_responses),
            }
        })
        .collect();

    // Stable sort: ties keep their survey item order.
    items.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(SurveyResults {
        survey_id: survey_id.clone(),
        total_responses,
        items,
    })
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
