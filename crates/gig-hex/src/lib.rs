//! gig-hex: hexagonal gig backend library (accounts + orders core, inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use gig_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
