pub mod avatars;
pub mod chat_manifest;
pub mod config;
pub mod context;
pub mod download;
pub mod emit;
pub mod infer;
pub mod organize;
pub mod setup;
