//! Types shared between the product catalog UI and its REST API

pub mod domain;
pub mod shared;
