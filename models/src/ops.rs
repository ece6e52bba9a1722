//! Registered operations over a user's model collection.
//!
//! The surrounding tools resolve `{modality, action}` pairs through a static
//! table of typed handlers; unsupported pairs surface an error instead of
//! being discovered at invocation time.

use rand::RngCore;
use tracing::{debug, info};
use vault::{EnrollParams, SecretPolynomial, UnlockParams, Vault};

use crate::record::{Direction, ModelRecord, group_label};
use crate::store::{ModelStore, StoreError};

/// Biometric modality an operation applies to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Modality {
    Face,
    Voice,
}

impl Modality {
    pub fn name(&self) -> &'static str {
        match self {
            Modality::Face => "face",
            Modality::Voice => "voice",
        }
    }
}

/// Action performed on a user's model collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    List,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Remove => "remove",
            Action::List => "list",
        }
    }
}

/// One enrollment sample: a feature vector and, for face models, the head
/// direction it was captured in.
#[derive(Clone, Debug)]
pub struct EnrollSample {
    pub direction: Option<Direction>,
    pub features: Vec<f64>,
}

/// Input to a registered operation.
#[derive(Clone, Debug)]
pub enum Request {
    Enroll {
        user: String,
        base_label: String,
        time: u64,
        params: EnrollParams,
        samples: Vec<EnrollSample>,
    },
    Remove {
        user: String,
        id: u32,
    },
    List {
        user: String,
    },
}

/// Output of a registered operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Ids of the records created by an enrollment.
    Enrolled { ids: Vec<u32> },
    /// Whether the removal emptied the collection and disabled the modality.
    Removed { last_model: bool },
    Listing(Vec<ModelSummary>),
}

/// One row of a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSummary {
    pub id: u32,
    pub time: u64,
    pub label: String,
}

type Handler = fn(&ModelStore, Request, &mut dyn RngCore) -> Result<Response, StoreError>;

/// Supported `{modality, action}` pairs. Voice listing was never wired up
/// in the original tooling and stays unsupported here.
const OPERATIONS: &[(Modality, Action, Handler)] = &[
    (Modality::Face, Action::Add, enroll_face),
    (Modality::Face, Action::Remove, remove_model),
    (Modality::Face, Action::List, list_models),
    (Modality::Voice, Action::Add, enroll_voice),
    (Modality::Voice, Action::Remove, remove_model),
];

/// Resolve and run the handler registered for `{modality, action}`.
pub fn dispatch(
    modality: Modality,
    action: Action,
    store: &ModelStore,
    request: Request,
    rng: &mut dyn RngCore,
) -> Result<Response, StoreError> {
    let handler = OPERATIONS
        .iter()
        .find(|entry| entry.0 == modality && entry.1 == action)
        .map(|entry| entry.2)
        .ok_or(StoreError::UnsupportedOperation {
            modality: modality.name(),
            action: action.name(),
        })?;
    handler(store, request, rng)
}

/// Enroll a three-direction face group.
///
/// Exactly one sample per direction is required. Ids are threaded from the
/// collection's next available id; the group number is `next_id / 3`.
fn enroll_face(
    store: &ModelStore,
    request: Request,
    rng: &mut dyn RngCore,
) -> Result<Response, StoreError> {
    let Request::Enroll {
        user,
        base_label,
        time,
        params,
        samples,
    } = request
    else {
        return Err(StoreError::RequestMismatch);
    };

    let mut set = store.load(&user)?;
    let next_id = set.next_id();
    let group = next_id / 3;
    let mut ids = Vec::with_capacity(Direction::ALL.len());

    for (idx, direction) in Direction::ALL.iter().enumerate() {
        let sample = samples
            .iter()
            .find(|s| s.direction == Some(*direction))
            .ok_or(StoreError::RequestMismatch)?;

        let id = next_id + idx as u32;
        let record = enroll_one(
            id,
            group_label(&base_label, group, *direction),
            time,
            &params,
            &sample.features,
            rng,
        )?;
        ids.push(id);
        set.push(record);
    }

    store.save(&user, &set)?;
    info!(user = %user, group, ?ids, "enrolled face model group");
    Ok(Response::Enrolled { ids })
}

/// Enroll a single voice model.
fn enroll_voice(
    store: &ModelStore,
    request: Request,
    rng: &mut dyn RngCore,
) -> Result<Response, StoreError> {
    let Request::Enroll {
        user,
        base_label,
        time,
        params,
        samples,
    } = request
    else {
        return Err(StoreError::RequestMismatch);
    };
    let sample = samples.first().ok_or(StoreError::RequestMismatch)?;

    let mut set = store.load(&user)?;
    let id = set.next_id();
    let record = enroll_one(
        id,
        base_label.replace(',', ""),
        time,
        &params,
        &sample.features,
        rng,
    )?;
    set.push(record);
    store.save(&user, &set)?;
    info!(user = %user, id, "enrolled voice model");
    Ok(Response::Enrolled { ids: vec![id] })
}

fn enroll_one(
    id: u32,
    label: String,
    time: u64,
    params: &EnrollParams,
    features: &[f64],
    rng: &mut dyn RngCore,
) -> Result<ModelRecord, StoreError> {
    let secret = SecretPolynomial::derive(features, params.degree)?;
    let vault = Vault::build(&secret, features, params, rng)?;
    Ok(ModelRecord {
        id,
        label,
        time,
        degree: params.degree,
        point_count: params.point_count,
        vault,
    })
}

fn remove_model(
    store: &ModelStore,
    request: Request,
    _rng: &mut dyn RngCore,
) -> Result<Response, StoreError> {
    let Request::Remove { user, id } = request else {
        return Err(StoreError::RequestMismatch);
    };

    let mut set = store.load(&user)?;
    if !set.remove(id) {
        return Err(StoreError::UnknownModel { id });
    }
    store.save(&user, &set)?;
    info!(user = %user, id, "removed model");
    Ok(Response::Removed {
        last_model: set.is_empty(),
    })
}

fn list_models(
    store: &ModelStore,
    request: Request,
    _rng: &mut dyn RngCore,
) -> Result<Response, StoreError> {
    let Request::List { user } = request else {
        return Err(StoreError::RequestMismatch);
    };

    let set = store.load(&user)?;
    Ok(Response::Listing(
        set.iter()
            .map(|r| ModelSummary {
                id: r.id,
                time: r.time,
                label: r.label.clone(),
            })
            .collect(),
    ))
}

/// Try to unlock any of a user's stored vaults with a fresh sample.
///
/// When `direction` is given only records carrying that direction suffix
/// are tried, mirroring the directed authentication prompt. Unlock
/// parameters come from each record's stored enrollment values, so the
/// verification chunking always equals the enrollment chunking.
pub fn verify_user(
    store: &ModelStore,
    user: &str,
    direction: Option<Direction>,
    features: &[f64],
) -> Result<bool, StoreError> {
    let set = store.load(user)?;

    for record in set.iter() {
        if let Some(direction) = direction {
            if !record.matches_direction(direction) {
                continue;
            }
        }

        let params = UnlockParams::for_enrollment(record.degree, record.point_count);
        debug!(user, id = record.id, "trying vault");
        if record.vault.unlock(features, &params)? {
            info!(user, id = record.id, "vault unlocked");
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_store(tag: &str) -> ModelStore {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        ModelStore::new(std::env::temp_dir().join(format!(
            "model-ops-{tag}-{}-{nonce}",
            std::process::id()
        )))
    }

    fn patterned_vector(count: usize, width: usize, base: usize) -> Vec<f64> {
        let mut features = Vec::with_capacity(count * width);
        for chunk in 0..count {
            let pattern = base + chunk;
            for bit in 0..width {
                let sign = if pattern >> bit & 1 == 1 { 1.0 } else { -1.0 };
                features.push(sign * (0.3 + 0.01 * bit as f64));
            }
        }
        features
    }

    fn params() -> EnrollParams {
        EnrollParams {
            degree: 8,
            point_count: 10,
            chaff_count: 60,
        }
    }

    fn face_samples(base: usize) -> Vec<EnrollSample> {
        Direction::ALL
            .iter()
            .enumerate()
            .map(|(i, direction)| EnrollSample {
                direction: Some(*direction),
                features: patterned_vector(10, 8, base + i * 10),
            })
            .collect()
    }

    fn enroll_request(user: &str, base: usize) -> Request {
        Request::Enroll {
            user: user.to_string(),
            base_label: "Composite Model".to_string(),
            time: 1_700_000_000,
            params: params(),
            samples: face_samples(base),
        }
    }

    #[test]
    fn test_face_enroll_list_remove_flow() {
        let store = scratch_store("flow");
        let mut rng = StdRng::seed_from_u64(42);

        let response = dispatch(
            Modality::Face,
            Action::Add,
            &store,
            enroll_request("alice", 1),
            &mut rng,
        )
        .unwrap();
        assert_eq!(response, Response::Enrolled { ids: vec![0, 1, 2] });

        let Response::Listing(rows) = dispatch(
            Modality::Face,
            Action::List,
            &store,
            Request::List {
                user: "alice".to_string(),
            },
            &mut rng,
        )
        .unwrap() else {
            panic!("expected a listing");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "Composite Model #0 (Front)");
        assert_eq!(rows[2].label, "Composite Model #0 (Right)");

        for id in [0, 1, 2] {
            let response = dispatch(
                Modality::Face,
                Action::Remove,
                &store,
                Request::Remove {
                    user: "alice".to_string(),
                    id,
                },
                &mut rng,
            )
            .unwrap();
            assert_eq!(response, Response::Removed { last_model: id == 2 });
        }
        assert!(!store.path_for("alice").unwrap().exists());
    }

    #[test]
    fn test_second_group_continues_ids() {
        let store = scratch_store("ids");
        let mut rng = StdRng::seed_from_u64(42);

        dispatch(
            Modality::Face,
            Action::Add,
            &store,
            enroll_request("bob", 1),
            &mut rng,
        )
        .unwrap();
        let response = dispatch(
            Modality::Face,
            Action::Add,
            &store,
            enroll_request("bob", 50),
            &mut rng,
        )
        .unwrap();
        assert_eq!(response, Response::Enrolled { ids: vec![3, 4, 5] });

        let set = store.load("bob").unwrap();
        assert_eq!(set.get(3).unwrap().label, "Composite Model #1 (Front)");

        std::fs::remove_dir_all(store.path_for("bob").unwrap().parent().unwrap()).unwrap();
    }

    #[test]
    fn test_voice_list_is_unsupported() {
        let store = scratch_store("voice");
        let mut rng = StdRng::seed_from_u64(42);
        let err = dispatch(
            Modality::Voice,
            Action::List,
            &store,
            Request::List {
                user: "alice".to_string(),
            },
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedOperation {
                modality: "voice",
                action: "list",
            }
        ));
    }

    #[test]
    fn test_remove_unknown_model() {
        let store = scratch_store("unknown");
        let mut rng = StdRng::seed_from_u64(42);
        let err = dispatch(
            Modality::Face,
            Action::Remove,
            &store,
            Request::Remove {
                user: "alice".to_string(),
                id: 9,
            },
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::UnknownModel { id: 9 }));
    }

    #[test]
    fn test_verify_user_roundtrip() {
        let store = scratch_store("verify");
        let mut rng = StdRng::seed_from_u64(42);
        dispatch(
            Modality::Face,
            Action::Add,
            &store,
            enroll_request("carol", 1),
            &mut rng,
        )
        .unwrap();

        // The front sample matches only the front record.
        let front = patterned_vector(10, 8, 1);
        assert!(verify_user(&store, "carol", Some(Direction::Front), &front).unwrap());
        assert!(!verify_user(&store, "carol", Some(Direction::Left), &front).unwrap());
        assert!(verify_user(&store, "carol", None, &front).unwrap());

        // A stranger's sample matches nothing.
        let stranger = patterned_vector(10, 8, 200);
        assert!(!verify_user(&store, "carol", None, &stranger).unwrap());

        std::fs::remove_dir_all(store.path_for("carol").unwrap().parent().unwrap()).unwrap();
    }

    #[test]
    fn test_enroll_requires_all_directions() {
        let store = scratch_store("partial");
        let mut rng = StdRng::seed_from_u64(42);
        let mut samples = face_samples(1);
        samples.pop();

        let err = dispatch(
            Modality::Face,
            Action::Add,
            &store,
            Request::Enroll {
                user: "dave".to_string(),
                base_label: "Composite Model".to_string(),
                time: 1_700_000_000,
                params: params(),
                samples,
            },
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::RequestMismatch));
    }
}
