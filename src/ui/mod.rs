pub mod close_incident;
pub mod file_embed;
pub mod priority;
