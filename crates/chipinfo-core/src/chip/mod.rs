//! Controller chip signatures and database
//!
//! Some controller families identify their silicon only by a numeric chip id
//! (and sometimes a revision byte). A signature table maps those ids to the
//! commercial part names. Built-in tables are `const` [`ChipSignature`]
//! arrays; a [`ChipDatabase`] holds the owned form and can be extended from
//! RON files at runtime.

mod database;
mod types;

pub use database::{ChipDatabase, ChipDbError};
pub use types::{ChipModel, ChipSignature};
