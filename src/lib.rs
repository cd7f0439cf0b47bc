// src/lib.rs

//! newsharvest library
//!
//! Collects newspaper articles from a content API into a labeled flat-text
//! corpus and re-parses that corpus into rows for classification work.

pub mod codec;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
