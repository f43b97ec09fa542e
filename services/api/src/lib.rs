//! HTTP service for the Known folder workspace and blog.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
