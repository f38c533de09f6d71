//! Application layer - DTOs and the services implementing CAML operations

pub mod dto;
pub mod services;
