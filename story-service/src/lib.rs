//! Story generator service: fills a fixed prompt with a topic and returns the
//! LLM's story over HTTP.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;
pub mod utils;
