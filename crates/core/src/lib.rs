//! # Kiosk Core
//!
//! Core business logic for the survey kiosk.
//!
//! This crate contains pure data operations over the kiosk's flat-file
//! storage:
//! - Survey lifecycle (create, edit, duplicate, delete, reset) with item
//!   image handling
//! - Response recording with set-once first-response stamping
//! - On-demand result aggregation (per-item counts and percentages)
//!
//! **No API concerns**: HTTP routing, templating, session and cookie
//! handling belong to the web layer, which calls into these services.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── surveys.json     # the surveys collection, rewritten whole on change
//! ├── responses.json   # the responses collection, append-only in practice
//! └── images/          # item image blobs, addressed by filename
//! ```
//!
//! Every mutating operation loads a full collection, rewrites it in memory
//! and saves it back under the store's write lock; see [`store::DataStore`].

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod responses;
pub mod results;
pub mod store;
pub mod surveys;

pub use auth::{AdminAuth, AdminCredentials};
pub use config::{admin_password_from_env_value, data_dir_from_env_value, KioskConfig};
pub use error::{KioskError, KioskResult};
pub use model::{Item, ItemDraft, Response, Survey, SurveyDraft, SurveyId};
pub use responses::ResponseRecorder;
pub use results::{compute_results, ItemTally, SurveyResults};
pub use store::DataStore;
pub use surveys::SurveyService;

pub use kiosk_images::{ImageStore, ImagesError};
pub use kiosk_types::{ImageName, ItemId};
