//! Survey management.
//!
//! This module provides the admin-side lifecycle of surveys: create, edit,
//! duplicate, delete and reset, plus the housekeeping pass that prunes
//! responses left behind by deleted surveys. All mutating operations
//! require an [`AdminAuth`] proof and run under the store's write lock.
//!
//! ## Image lifecycle
//!
//! Inline image payloads arrive base64-encoded with a caller-chosen
//! filename and are persisted to the blob store before the survey document
//! is saved. Edits are full-replace: blobs referenced before the edit but
//! not after are deleted once the new document is safely on disk. Survey
//! deletion removes the survey's blobs; duplication gives the clone its own
//! physical copies so the two surveys' image lifetimes stay independent.

use crate::auth::AdminAuth;
use crate::error::{KioskError, KioskResult};
use crate::model::{Item, ItemDraft, Survey, SurveyDraft, SurveyId};
use crate::store::DataStore;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use kiosk_images::ImageStore;
use kiosk_types::{ImageName, ItemId};
use std::collections::HashSet;
use std::sync::Arc;

/// A validated draft item with its image bytes decoded but not yet written.
struct ResolvedItem {
    id: ItemId,
    text: String,
    image: ResolvedImage,
}

enum ResolvedImage {
    None,
    Existing(ImageName),
    Inline(ImageName, Vec<u8>),
}

/// Service for managing survey definitions.
#[derive(Debug, Clone)]
pub struct SurveyService {
    store: Arc<DataStore>,
    images: Arc<ImageStore>,
}

impl SurveyService {
    pub fn new(store: Arc<DataStore>, images: Arc<ImageStore>) -> Self {
        Self { store, images }
    }

    /// Lists all surveys.
    pub fn list(&self) -> KioskResult<Vec<Survey>> {
        self.store.load_surveys()
    }

    /// Returns the survey with the given id.
    ///
    /// # Errors
    ///
    /// Returns `KioskError::SurveyNotFound` if the id is unknown.
    pub fn get(&self, survey_id: &SurveyId) -> KioskResult<Survey> {
        self.store
            .load_surveys()?
            .into_iter()
            .find(|s| &s.id == survey_id)
            .ok_or_else(|| KioskError::SurveyNotFound(survey_id.clone()))
    }

    /// Creates a new survey from an admin draft.
    ///
    /// The id is allocated as one more than the highest numeric id in the
    /// collection, so ids stay unique even after deletions. Inline image
    /// payloads are decoded and persisted under their supplied filenames.
    ///
    /// # Errors
    ///
    /// Returns `KioskError::MalformedInput` if an item id is empty or
    /// duplicated, an image filename is invalid, or an inline payload is
    /// missing its filename or is not valid base64.
    pub fn create(&self, _auth: &AdminAuth, draft: &SurveyDraft) -> KioskResult<SurveyId> {
        let _guard = self.store.lock_for_write();

        let mut surveys = self.store.load_surveys()?;
        let resolved = resolve_items(&draft.items)?;

        let id = next_survey_id(&surveys);
        let items = self.persist_items(resolved)?;

        surveys.push(Survey {
            id: id.clone(),
            title_en: draft.title_en.clone(),
            title_sv: draft.title_sv.clone(),
            description_en: draft.description_en.clone(),
            description_sv: draft.description_sv.clone(),
            items,
            created_at: Utc::now(),
            first_response_at: None,
        });
        self.store.save_surveys(&surveys)?;

        tracing::info!(survey_id = %id, "created survey");
        Ok(id)
    }

    /// Replaces a survey's display fields and item list.
    ///
    /// Items not present in the draft are dropped, and blobs they referenced
    /// are deleted once the updated document is saved. Items referencing an
    /// existing image keep it; inline payloads are persisted like in
    /// [`create`](Self::create).
    ///
    /// # Errors
    ///
    /// Returns `KioskError::SurveyNotFound` if the id is unknown, or
    /// `KioskError::MalformedInput` for the same draft defects as create.
    pub fn edit(
        &self,
        _auth: &AdminAuth,
        survey_id: &SurveyId,
        draft: &SurveyDraft,
    ) -> KioskResult<()> {
        let _guard = self.store.lock_for_write();

        let mut surveys = self.store.load_surveys()?;
        let pos = surveys
            .iter()
            .position(|s| &s.id == survey_id)
            .ok_or_else(|| KioskError::SurveyNotFound(survey_id.clone()))?;

        let resolved = resolve_items(&draft.items)?;

        let previous_images: HashSet<ImageName> = surveys[pos]
            .items
            .iter()
            .filter_map(|item| item.image.clone())
            .collect();

        let items = self.persist_items(resolved)?;
        let current_images: HashSet<ImageName> =
            items.iter().filter_map(|item| item.image.clone()).collect();

        let survey = &mut surveys[pos];
        survey.title_en = draft.title_en.clone();
        survey.title_sv = draft.title_sv.clone();
        survey.description_en = draft.description_en.clone();
        survey.description_sv = draft.description_sv.clone();
        survey.items = items;

        self.store.save_surveys(&surveys)?;

        // Only clean up after the new document is safely on disk.
        for dropped in previous_images.difference(&current_images) {
            if !self.images.delete(dropped)? {
                tracing::warn!(image = %dropped, "image already missing during edit cleanup");
            }
        }

        tracing::info!(survey_id = %survey_id, "edited survey");
        Ok(())
    }

    /// Deletes a survey and its image blobs.
    ///
    /// Unknown ids are a silent no-op. Responses referencing the survey are
    /// retained; [`prune_orphaned_responses`](Self::prune_orphaned_responses)
    /// removes them explicitly.
    pub fn delete(&self, _auth: &AdminAuth, survey_id: &SurveyId) -> KioskResult<()> {
        let _guard = self.store.lock_for_write();

        let mut surveys = self.store.load_surveys()?;
        let Some(pos) = surveys.iter().position(|s| &s.id == survey_id) else {
            return Ok(());
        };

        let survey = surveys.remove(pos);
        for item in &survey.items {
            if let Some(name) = &item.image {
                if !self.images.delete(name)? {
                    tracing::warn!(image = %name, "image already missing during survey delete");
                }
            }
        }

        self.store.save_surveys(&surveys)?;

        tracing::info!(survey_id = %survey_id, "deleted survey");
        Ok(())
    }

    /// Duplicates a survey under new titles with fresh response history.
    ///
    /// The clone gets the next id from the same scheme as create. Each item
    /// is cloned with id `{new_id}_{old_item_id}`, and item images are
    /// physically copied to `{new_id}_{index}_{timestamp_millis}.{ext}` so
    /// the two surveys never share a blob. Descriptions are carried over,
    /// titles are replaced, and `first_response_at` starts unset. Responses
    /// are not copied.
    ///
    /// # Errors
    ///
    /// Returns `KioskError::SurveyNotFound` if the source id is unknown.
    pub fn duplicate(
        &self,
        _auth: &AdminAuth,
        survey_id: &SurveyId,
        new_title_en: &str,
        new_title_sv: &str,
    ) -> KioskResult<SurveyId> {
        let _guard = self.store.lock_for_write();

        let mut surveys = self.store.load_surveys()?;
        let source = surveys
            .iter()
            .find(|s| &s.id == survey_id)
            .cloned()
            .ok_or_else(|| KioskError::SurveyNotFound(survey_id.clone()))?;

        let new_id = next_survey_id(&surveys);

        let mut items = Vec::with_capacity(source.items.len());
        for (index, item) in source.items.iter().enumerate() {
            let id = ItemId::new(format!("{}_{}", new_id, item.id))
                .map_err(|e| KioskError::MalformedInput(e.to_string()))?;

            let image = match &item.image {
                Some(src) if self.images.exists(src) => {
                    let copy_name = ImageName::new(format!(
                        "{}_{}_{}.{}",
                        new_id,
                        index,
                        Utc::now().timestamp_millis(),
                        src.extension()
                    ))
                    .map_err(|e| KioskError::MalformedInput(e.to_string()))?;
                    self.images.copy(src, &copy_name)?;
                    Some(copy_name)
                }
                Some(src) => {
                    tracing::warn!(image = %src, "source image missing during duplicate");
                    None
                }
                None => None,
            };

            items.push(Item {
                id,
                text: item.text.clone(),
                image,
            });
        }

        surveys.push(Survey {
            id: new_id.clone(),
            title_en: new_title_en.to_owned(),
            title_sv: new_title_sv.to_owned(),
            description_en: source.description_en.clone(),
            description_sv: source.description_sv.clone(),
            items,
            created_at: Utc::now(),
            first_response_at: None,
        });
        self.store.save_surveys(&surveys)?;

        tracing::info!(source = %survey_id, survey_id = %new_id, "duplicated survey");
        Ok(new_id)
    }

    /// Removes all of a survey's responses and clears `first_response_at`.
    ///
    /// Items and images are untouched.
    ///
    /// # Errors
    ///
    /// Returns `KioskError::SurveyNotFound` if the id is unknown.
    pub fn reset(&self, _auth: &AdminAuth, survey_id: &SurveyId) -> KioskResult<()> {
        let _guard = self.store.lock_for_write();

        let mut surveys = self.store.load_surveys()?;
        let pos = surveys
            .iter()
            .position(|s| &s.id == survey_id)
            .ok_or_else(|| KioskError::SurveyNotFound(survey_id.clone()))?;

        let mut responses = self.store.load_responses()?;
        let before = responses.len();
        responses.retain(|r| &r.survey_id != survey_id);
        self.store.save_responses(&responses)?;

        surveys[pos].first_response_at = None;
        self.store.save_surveys(&surveys)?;

        tracing::info!(
            survey_id = %survey_id,
            removed = before - responses.len(),
            "reset survey responses"
        );
        Ok(())
    }

    /// Removes responses whose survey no longer exists.
    ///
    /// Survey deletion retains responses, so this is the explicit
    /// garbage-collection pass for that policy.
    ///
    /// # Returns
    ///
    /// The number of responses removed.
    pub fn prune_orphaned_responses(&self, _auth: &AdminAuth) -> KioskResult<usize> {
        let _guard = self.store.lock_for_write();

        let surveys = self.store.load_surveys()?;
        let known: HashSet<&SurveyId> = surveys.iter().map(|s| &s.id).collect();

        let mut responses = self.store.load_responses()?;
        let before = responses.len();
        responses.retain(|r| known.contains(&r.survey_id));
        let removed = before - responses.len();

        if removed > 0 {
            self.store.save_responses(&responses)?;
            tracing::info!(removed, "pruned orphaned responses");
        }

        Ok(removed)
    }

    /// Writes the inline blobs of resolved items and produces the stored
    /// item records.
    fn persist_items(&self, resolved: Vec<ResolvedItem>) -> KioskResult<Vec<Item>> {
        let mut items = Vec::with_capacity(resolved.len());
        for entry in resolved {
            let image = match entry.image {
                ResolvedImage::None => None,
                ResolvedImage::Existing(name) => Some(name),
                ResolvedImage::Inline(name, bytes) => {
                    let metadata = self.images.write(&name, &bytes)?;
                    tracing::debug!(
                        image = %metadata.name,
                        size_bytes = metadata.size_bytes,
                        media_type = metadata.media_type.as_deref().unwrap_or("unknown"),
                        "stored item image"
                    );
                    Some(name)
                }
            };
            items.push(Item {
                id: entry.id,
                text: entry.text,
                image,
            });
        }
        Ok(items)
    }
}

/// Allocates the next survey id: one more than the highest numeric id in
/// the collection, `1` when the collection holds none.
fn next_survey_id(surveys: &[Survey]) -> SurveyId {
    let max = surveys
        .iter()
        .filter_map(|s| s.id.numeric())
        .max()
        .unwrap_or(0);
    SurveyId::new((max + 1).to_string())
}

/// Validates draft items and decodes their image payloads without touching
/// the blob store, so a defective draft is rejected before any blob is
/// written.
fn resolve_items(drafts: &[ItemDraft]) -> KioskResult<Vec<ResolvedItem>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let id = ItemId::new(&draft.id)
            .map_err(|_| KioskError::MalformedInput("item id cannot be empty".into()))?;
        if !seen.insert(id.clone()) {
            return Err(KioskError::MalformedInput(format!(
                "duplicate item id '{}'",
                id
            )));
        }

        let inline_payload = draft.image_data.as_deref().filter(|s| !s.trim().is_empty());
        let existing = draft
            .existing_image
            .as_deref()
            .filter(|s| !s.trim().is_empty());

        let image = if let Some(payload) = inline_payload {
            let filename = draft
                .image
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| {
                    KioskError::MalformedInput(format!(
                        "item '{}' has an image payload but no filename",
                        id
                    ))
                })?;
            let name =
                ImageName::new(filename).map_err(|e| KioskError::MalformedInput(e.to_string()))?;
            let bytes = BASE64.decode(payload).map_err(KioskError::ImageDecode)?;
            ResolvedImage::Inline(name, bytes)
        } else if let Some(existing) = existing {
            let name =
                ImageName::new(existing).map_err(|e| KioskError::MalformedInput(e.to_string()))?;
            ResolvedImage::Existing(name)
        } else {
            ResolvedImage::None
        };

        resolved.push(ResolvedItem {
            id,
            text: draft.text.clone(),
            image,
        });
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AdminCredentials;
    use crate::config::KioskConfig;
    use crate::model::Response;
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        store: Arc<DataStore>,
        images: Arc<ImageStore>,
        service: SurveyService,
        auth: AdminAuth,
    }

    fn fixture(data_dir: &Path) -> Fixture {
        let cfg = Arc::new(
            KioskConfig::new(data_dir.to_path_buf(), "secret".into())
                .expect("KioskConfig::new should succeed"),
        );
        let store = Arc::new(DataStore::new(cfg.clone()).expect("DataStore::new should succeed"));
        let images =
            Arc::new(ImageStore::open(&cfg.images_dir()).expect("ImageStore::open should succeed"));
        let service = SurveyService::new(store.clone(), images.clone());
        let auth = AdminCredentials::from_config(&cfg)
            .verify("secret")
            .expect("verify should succeed");

        Fixture {
            store,
            images,
            service,
            auth,
        }
    }

    fn item(id: &str) -> ItemDraft {
        ItemDraft {
            id: id.into(),
            text: id.to_uppercase(),
            ..ItemDraft::default()
        }
    }

    fn item_with_inline_image(id: &str, filename: &str, bytes: &[u8]) -> ItemDraft {
        ItemDraft {
            id: id.into(),
            text: id.to_uppercase(),
            image: Some(filename.into()),
            image_data: Some(BASE64.encode(bytes)),
            ..ItemDraft::default()
        }
    }

    fn draft(title_en: &str, items: Vec<ItemDraft>) -> SurveyDraft {
        SurveyDraft {
            title_en: title_en.into(),
            title_sv: format!("{} (sv)", title_en),
            description_en: "desc en".into(),
            description_sv: "desc sv".into(),
            items,
        }
    }

    fn seed_response(store: &DataStore, survey_id: &str, selected: &[&str]) {
        let mut responses = store.load_responses().unwrap();
        responses.push(Response {
            survey_id: SurveyId::new(survey_id),
            selected_items: selected.iter().map(|s| ItemId::new(s).unwrap()).collect(),
            timestamp: Utc::now(),
        });
        store.save_responses(&responses).unwrap();
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let first = f.service.create(&f.auth, &draft("One", vec![])).unwrap();
        let second = f.service.create(&f.auth, &draft("Two", vec![])).unwrap();

        assert_eq!(first.as_str(), "1");
        assert_eq!(second.as_str(), "2");
    }

    #[test]
    fn test_create_ids_stay_unique_after_delete() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        f.service.create(&f.auth, &draft("One", vec![])).unwrap();
        let second = f.service.create(&f.auth, &draft("Two", vec![])).unwrap();
        f.service.delete(&f.auth, &SurveyId::new("1")).unwrap();

        let third = f.service.create(&f.auth, &draft("Three", vec![])).unwrap();

        assert_eq!(second.as_str(), "2");
        assert_eq!(third.as_str(), "3", "id must not reuse the deleted '1'");
    }

    #[test]
    fn test_create_stores_fields_and_items() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let id = f
            .service
            .create(&f.auth, &draft("Lunch", vec![item("a"), item("b")]))
            .unwrap();

        let survey = f.service.get(&id).unwrap();
        assert_eq!(survey.title_en, "Lunch");
        assert_eq!(survey.title_sv, "Lunch (sv)");
        assert_eq!(survey.description_en, "desc en");
        assert_eq!(survey.items.len(), 2);
        assert!(survey.first_response_at.is_none());
    }

    #[test]
    fn test_create_persists_inline_image() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

        let id = f
            .service
            .create(
                &f.auth,
                &draft("Pics", vec![item_with_inline_image("a", "a.png", &png)]),
            )
            .unwrap();

        let survey = f.service.get(&id).unwrap();
        let name = survey.items[0].image.clone().expect("item should reference image");
        assert_eq!(name.as_str(), "a.png");
        assert_eq!(f.images.read(&name).unwrap(), png);
    }

    #[test]
    fn test_create_rejects_payload_without_filename() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let mut bad = item("a");
        bad.image_data = Some(BASE64.encode(b"bytes"));

        let result = f.service.create(&f.auth, &draft("Bad", vec![bad]));

        assert!(matches!(result, Err(KioskError::MalformedInput(_))));
    }

    #[test]
    fn test_create_rejects_undecodable_payload() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let mut bad = item("a");
        bad.image = Some("a.png".into());
        bad.image_data = Some("%%% not base64 %%%".into());

        let result = f.service.create(&f.auth, &draft("Bad", vec![bad]));

        assert!(matches!(result, Err(KioskError::ImageDecode(_))));
    }

    #[test]
    fn test_create_rejects_traversal_filename() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let bad = item_with_inline_image("a", "../escape.png", b"bytes");

        let result = f.service.create(&f.auth, &draft("Bad", vec![bad]));

        assert!(matches!(result, Err(KioskError::MalformedInput(_))));
    }

    #[test]
    fn test_create_rejects_duplicate_item_ids() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let result = f
            .service
            .create(&f.auth, &draft("Dup", vec![item("a"), item("a")]));

        assert!(matches!(result, Err(KioskError::MalformedInput(_))));
        assert!(f.service.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_empty_item_id() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let result = f.service.create(&f.auth, &draft("Bad", vec![item("  ")]));

        assert!(matches!(result, Err(KioskError::MalformedInput(_))));
    }

    #[test]
    fn test_edit_replaces_fields_and_items() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(&f.auth, &draft("Before", vec![item("a"), item("b")]))
            .unwrap();

        let mut updated = draft("After", vec![item("c")]);
        updated.description_en = "new desc".into();
        f.service.edit(&f.auth, &id, &updated).unwrap();

        let survey = f.service.get(&id).unwrap();
        assert_eq!(survey.title_en, "After");
        assert_eq!(survey.description_en, "new desc");
        assert_eq!(survey.items.len(), 1, "edit is full-replace");
        assert_eq!(survey.items[0].id.as_str(), "c");
    }

    #[test]
    fn test_edit_unknown_survey_is_not_found() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let result = f
            .service
            .edit(&f.auth, &SurveyId::new("9"), &draft("X", vec![]));

        assert!(matches!(result, Err(KioskError::SurveyNotFound(_))));
    }

    #[test]
    fn test_edit_deletes_dropped_image_blobs() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(
                &f.auth,
                &draft(
                    "Pics",
                    vec![
                        item_with_inline_image("a", "a.png", b"a bytes"),
                        item_with_inline_image("b", "b.png", b"b bytes"),
                    ],
                ),
            )
            .unwrap();

        // Keep item a's image, drop item b entirely.
        let mut keep_a = item("a");
        keep_a.existing_image = Some("a.png".into());
        f.service
            .edit(&f.auth, &id, &draft("Pics", vec![keep_a]))
            .unwrap();

        let a = ImageName::new("a.png").unwrap();
        let b = ImageName::new("b.png").unwrap();
        assert!(f.images.exists(&a), "kept image must survive the edit");
        assert!(!f.images.exists(&b), "dropped image must be cleaned up");
    }

    #[test]
    fn test_edit_keeps_existing_image_reference() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(
                &f.auth,
                &draft("Pics", vec![item_with_inline_image("a", "a.png", b"bytes")]),
            )
            .unwrap();

        let mut keep = item("a");
        keep.existing_image = Some("a.png".into());
        f.service
            .edit(&f.auth, &id, &draft("Pics", vec![keep]))
            .unwrap();

        let survey = f.service.get(&id).unwrap();
        assert_eq!(
            survey.items[0].image.as_ref().map(|n| n.as_str()),
            Some("a.png")
        );
    }

    #[test]
    fn test_delete_removes_survey_and_blobs_but_keeps_responses() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(
                &f.auth,
                &draft("Gone", vec![item_with_inline_image("a", "a.png", b"bytes")]),
            )
            .unwrap();
        seed_response(&f.store, id.as_str(), &["a"]);

        f.service.delete(&f.auth, &id).unwrap();

        assert!(f.service.list().unwrap().is_empty());
        assert!(!f.images.exists(&ImageName::new("a.png").unwrap()));
        assert_eq!(
            f.store.load_responses().unwrap().len(),
            1,
            "responses are retained after survey delete"
        );
    }

    #[test]
    fn test_delete_unknown_survey_is_silent() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        f.service.create(&f.auth, &draft("Keep", vec![])).unwrap();

        f.service
            .delete(&f.auth, &SurveyId::new("42"))
            .expect("deleting an unknown survey should be a no-op");

        assert_eq!(f.service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_tolerates_missing_blob() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(
                &f.auth,
                &draft("Gone", vec![item_with_inline_image("a", "a.png", b"bytes")]),
            )
            .unwrap();
        f.images.delete(&ImageName::new("a.png").unwrap()).unwrap();

        f.service
            .delete(&f.auth, &id)
            .expect("delete should succeed despite the missing blob");

        assert!(f.service.list().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_clones_items_and_copies_images() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let source_id = f
            .service
            .create(
                &f.auth,
                &draft(
                    "Original",
                    vec![item_with_inline_image("a", "a.png", b"bytes"), item("b")],
                ),
            )
            .unwrap();

        let new_id = f
            .service
            .duplicate(&f.auth, &source_id, "Copy", "Kopia")
            .unwrap();

        assert_eq!(new_id.as_str(), "2");
        let copy = f.service.get(&new_id).unwrap();
        assert_eq!(copy.title_en, "Copy");
        assert_eq!(copy.title_sv, "Kopia");
        assert_eq!(copy.description_en, "desc en", "descriptions are carried over");
        assert!(copy.first_response_at.is_none());
        assert_eq!(copy.items.len(), 2);
        assert_eq!(copy.items[0].id.as_str(), "2_a");
        assert_eq!(copy.items[1].id.as_str(), "2_b");

        let copied_name = copy.items[0].image.clone().expect("image should be copied");
        assert!(copied_name.as_str().starts_with("2_0_"));
        assert_eq!(copied_name.extension(), "png");
        assert_eq!(f.images.read(&copied_name).unwrap(), b"bytes");
        assert!(
            f.images.exists(&ImageName::new("a.png").unwrap()),
            "source image must remain"
        );
        assert!(copy.items[1].image.is_none());
    }

    #[test]
    fn test_duplicate_does_not_copy_responses() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let source_id = f
            .service
            .create(&f.auth, &draft("Original", vec![item("a")]))
            .unwrap();
        seed_response(&f.store, source_id.as_str(), &["a"]);

        let new_id = f
            .service
            .duplicate(&f.auth, &source_id, "Copy", "Kopia")
            .unwrap();

        let results = crate::results::compute_results(&f.store, &new_id).unwrap();
        assert_eq!(results.total_responses, 0);
    }

    #[test]
    fn test_duplicate_tolerates_missing_source_image() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let source_id = f
            .service
            .create(
                &f.auth,
                &draft("Original", vec![item_with_inline_image("a", "a.png", b"x")]),
            )
            .unwrap();
        f.images.delete(&ImageName::new("a.png").unwrap()).unwrap();

        let new_id = f
            .service
            .duplicate(&f.auth, &source_id, "Copy", "Kopia")
            .unwrap();

        let copy = f.service.get(&new_id).unwrap();
        assert!(copy.items[0].image.is_none());
    }

    #[test]
    fn test_duplicate_unknown_survey_is_not_found() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let result = f
            .service
            .duplicate(&f.auth, &SurveyId::new("9"), "Copy", "Kopia");

        assert!(matches!(result, Err(KioskError::SurveyNotFound(_))));
    }

    #[test]
    fn test_reset_removes_only_matching_responses() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let one = f
            .service
            .create(&f.auth, &draft("One", vec![item("a")]))
            .unwrap();
        let two = f
            .service
            .create(&f.auth, &draft("Two", vec![item("a")]))
            .unwrap();
        seed_response(&f.store, one.as_str(), &["a"]);
        seed_response(&f.store, one.as_str(), &["a"]);
        seed_response(&f.store, two.as_str(), &["a"]);

        f.service.reset(&f.auth, &one).unwrap();

        let remaining = f.store.load_responses().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].survey_id, two);

        let results = crate::results::compute_results(&f.store, &one).unwrap();
        assert_eq!(results.total_responses, 0);
    }

    #[test]
    fn test_reset_clears_first_response_at() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(&f.auth, &draft("One", vec![item("a")]))
            .unwrap();

        let mut surveys = f.store.load_surveys().unwrap();
        surveys[0].first_response_at = Some(Utc::now());
        f.store.save_surveys(&surveys).unwrap();

        f.service.reset(&f.auth, &id).unwrap();

        assert!(f.service.get(&id).unwrap().first_response_at.is_none());
    }

    #[test]
    fn test_reset_unknown_survey_is_not_found() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let result = f.service.reset(&f.auth, &SurveyId::new("9"));

        assert!(matches!(result, Err(KioskError::SurveyNotFound(_))));
    }

    #[test]
    fn test_reset_keeps_items_and_images() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(
                &f.auth,
                &draft("One", vec![item_with_inline_image("a", "a.png", b"bytes")]),
            )
            .unwrap();
        seed_response(&f.store, id.as_str(), &["a"]);

        f.service.reset(&f.auth, &id).unwrap();

        let survey = f.service.get(&id).unwrap();
        assert_eq!(survey.items.len(), 1);
        assert!(f.images.exists(&ImageName::new("a.png").unwrap()));
    }

    #[test]
    fn test_prune_removes_only_orphans() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let keep = f
            .service
            .create(&f.auth, &draft("Keep", vec![item("a")]))
            .unwrap();
        let gone = f
            .service
            .create(&f.auth, &draft("Gone", vec![item("a")]))
            .unwrap();
        seed_response(&f.store, keep.as_str(), &["a"]);
        seed_response(&f.store, gone.as_str(), &["a"]);
        seed_response(&f.store, gone.as_str(), &["a"]);
        f.service.delete(&f.auth, &gone).unwrap();

        let removed = f.service.prune_orphaned_responses(&f.auth).unwrap();

        assert_eq!(removed, 2);
        let remaining = f.store.load_responses().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].survey_id, keep);
    }

    #[test]
    fn test_prune_with_nothing_to_remove() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());
        let id = f
            .service
            .create(&f.auth, &draft("Keep", vec![item("a")]))
            .unwrap();
        seed_response(&f.store, id.as_str(), &["a"]);

        let removed = f.service.prune_orphaned_responses(&f.auth).unwrap();

        assert_eq!(removed, 0);
        assert_eq!(f.store.load_responses().unwrap().len(), 1);
    }

    #[test]
    fn test_get_unknown_survey_is_not_found() {
        let temp = TempDir::new().unwrap();
        let f = fixture(temp.path());

        let result = f.service.get(&SurveyId::new("9"));

        assert!(matches!(result, Err(KioskError::SurveyNotFound(_))));
    }

    #[test]
    fn test_next_survey_id_ignores_non_numeric_ids() {
        let surveys = vec![
            Survey {
                id: SurveyId::new("legacy-survey"),
                title_en: String::new(),
                title_sv: String::new(),
                description_en: String::new(),
                description_sv: String::new(),
                items: vec![],
                created_at: Utc::now(),
                first_response_at: None,
            },
            Survey {
                id: SurveyId::new("7"),
                title_en: String::new(),
                title_sv: String::new(),
                description_en: String::new(),
                description_sv: String::new(),
                items: vec![],
                created_at: Utc::now(),
                first_response_at: None,
            },
        ];

        assert_eq!(next_survey_id(&surveys).as_str(), "8");
    }
}
