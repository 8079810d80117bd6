pub mod access;
pub mod artifacts;
pub mod catalog;
pub mod media;
pub mod seed;
pub mod sites;
