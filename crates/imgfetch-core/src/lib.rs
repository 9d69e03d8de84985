pub mod config;
pub mod logging;

pub mod checksum;
pub mod dedup;
pub mod fetcher;
pub mod storage;
pub mod url_model;
pub mod validate;
