//! Ferrous Hosts Infrastructure Layer
pub mod hosts;
