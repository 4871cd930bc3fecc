//! `taskform` - task records kept in a single local JSON file
//!
//! This library provides the record store that mirrors a collection of records
//! to disk, and the two-mode form controller that creates or edits them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use form::{Field, FormController, Mode};
pub use logging::init_logging;
pub use record::{Record, RecordFields, RecordId};
pub use storage::{RecordStore, StoreStats};
