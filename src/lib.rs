//! SII Station Editor Library
//!
//! Reads and writes the radio station list of `live_streams.sii` files and
//! provides the pieces an editor front end needs around it: an editing
//! session, backups, user settings and language files.

pub mod backup;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod language;
pub mod session;
pub mod settings;
pub mod sii;
