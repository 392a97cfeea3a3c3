//! # h5demo
//!
//! Edit, inspect and merge HDF5 demonstration datasets used for robot learning.
//!
//! A dataset file holds a single top-level group `data`. Its attributes carry the
//! file-level configuration (notably `env_args`, a JSON string describing the simulation
//! environment) and its child groups are the recorded episodes (`demo_1`, `demo_2`, ..),
//! each with its own attributes and named arrays.
//!
//! Three operations are provided:
//!
//! * [modify](env_args::modify_env_args): overwrite `env_args` with a fixed configuration
//!   for a given robot, gripper and environment.
//! * [read](reader::read_dataset): print every episode array.
//! * [merge](merge::merge_datasets): concatenate the episodes of several files into a new
//!   file, renumbering them sequentially.
//!
//! ```no_run
//! use h5demo::merge::{merge_datasets, MergeOptions};
//!
//! let n = merge_datasets(&["a.hdf5", "b.hdf5"], "merged.hdf5", &MergeOptions::default()).unwrap();
//! println!("merged {n} episodes");
//! ```

#[macro_use]
extern crate anyhow;

pub mod attrs;
pub mod env_args;
pub mod error;
pub mod group;
pub mod merge;
pub mod raw;
pub mod reader;
pub mod types;

pub use attrs::Attributes;
pub use env_args::EnvConfig;
pub use error::LookupError;
pub use types::AnyArray;
