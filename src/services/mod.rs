pub mod convert_service;
pub mod download;
