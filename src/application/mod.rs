pub mod dto;
pub mod error;
pub mod naming;
pub mod repositories;
pub mod services;
pub mod validation;
