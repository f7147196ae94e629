//! Library half of the `bingo` binary: settings, logging, session
//! wiring, and table rendering.

#![deny(unsafe_code)]

pub mod config;
pub mod logging;
pub mod session;
pub mod table;
