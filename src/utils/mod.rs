pub mod file_store;
pub mod signed_url;
