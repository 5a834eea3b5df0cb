// src/gateways/mod.rs

pub mod courses;
pub mod identity;
