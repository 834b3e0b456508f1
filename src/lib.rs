pub mod advice;
pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod records;
pub mod state;
pub mod users;

#[cfg(test)]
mod test_support;
