//! Service clients, one module per remote service.

pub mod extraction;
pub mod metadata;
pub mod storage;
