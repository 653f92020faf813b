pub mod dispatch;
pub mod models;
pub mod storage;
pub mod transcript;
