//! evdump command-line front end.

pub mod app;
pub mod commands;
