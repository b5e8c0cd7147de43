pub mod api;
pub mod common;
pub mod config;
pub mod middleware;
pub mod models;
pub mod panels;
pub mod routes;
pub mod services;
