pub mod broadcast;
pub mod config;
pub mod debounce;
pub mod error;
pub mod jupiter;
pub mod pipeline;
pub mod routes;
pub mod service;
pub mod swap;
pub mod wallet;

#[cfg(test)]
mod testing;
