//! Disc burning module
//!
//! Assembles a staging directory of everything to be burned, then
//! hands it to the external burning tool. Actual disc writing is the
//! external tool's job; only the start of a burn is observed here.

mod burner;
mod stager;

pub use burner::start_burn;
pub use stager::{stage_files, staging_dir_for, STAGING_DIR_NAME};
