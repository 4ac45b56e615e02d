#![allow(dead_code)]

pub mod attrition_env;
pub mod mock_backend;
