pub mod prelude;

pub mod artifact;
pub mod artifact_media_file;
pub mod catalog_note;
pub mod catalog_record;
pub mod site;
pub mod user;
