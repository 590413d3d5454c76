pub mod derive;
pub mod encoding;
