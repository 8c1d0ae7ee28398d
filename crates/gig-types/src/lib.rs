//! gig-types: domain model and repository ports shared by every gig crate

pub mod domain;
pub mod ports;
