pub mod app;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod navigation;
pub mod router;
pub mod routes;
pub mod session;
pub mod storage;
