pub mod entities;
pub mod service;
pub mod storage;
pub mod store;
pub mod validation;
