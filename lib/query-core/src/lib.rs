#![cfg_attr(feature = "strict", deny(warnings))]

pub mod model;
pub mod normalizer;
pub mod repository;
