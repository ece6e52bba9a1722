//! Model-record bookkeeping around the fuzzy-vault engine.
//!
//! A user owns an ordered collection of model records, each binding a locked
//! [`vault::Vault`] to an id, a label and an enrollment timestamp. This
//! crate persists one JSON file per user, enrolls three-direction face
//! groups and single voice models, and resolves `{modality, action}` pairs
//! through a static table of typed handlers.
//!
//! Capture and feature extraction are external: every operation takes
//! already-extracted feature vectors.

mod ops;
mod record;
mod store;

pub use ops::{
    Action, EnrollSample, Modality, ModelSummary, Request, Response, dispatch, verify_user,
};
pub use record::{Direction, ModelRecord, ModelSet, group_label};
pub use store::{ModelStore, StoreError};
