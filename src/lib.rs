//! Computer/company inventory: SQLite-backed DAOs, a service facade and a
//! JSON web layer.

pub mod config;
pub mod dao;
pub mod db;
pub mod handlers;
pub mod model;
pub mod service;
