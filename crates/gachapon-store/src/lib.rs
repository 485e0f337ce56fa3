//! Gachapon Store: file-backed persistence for machine state.

pub mod json_file_store;
