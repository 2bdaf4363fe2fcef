//! QueryLens: grounded web answers with citations, follow-up questions and a
//! recent-query history, served over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
