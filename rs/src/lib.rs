//! RunStore - file-backed JSON document store
//!
//! Persists one JSON document per record under a per-entity subdirectory of
//! the data directory. This is the storage substrate for mirrored runs,
//! training plans, and coaching data.
//!
//! # Architecture
//!
//! ```text
//! {data_dir}/
//! ├── run_data/
//! │   ├── run_13847291.json
//! │   └── ...
//! ├── training_plans/
//! │   └── plan_0198c4f2.json
//! └── coaching_data/
//!     ├── coaching_persona.md
//!     ├── athlete_profile_default.json
//!     └── session_notes_default.json
//! ```
//!
//! # Example
//!
//! ```ignore
//! use runstore::DocStore;
//!
//! let store = DocStore::open(data_dir.join("training_plans"))?;
//! store.save_json("plan_0198c4f2.json", &plan)?;
//! let docs = store.load_all_json("plan_")?;
//! ```

mod store;

pub use store::{DocStore, merge_json, now_iso};
