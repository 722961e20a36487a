pub mod controllers;
pub mod dto;
pub mod error;
pub mod range;
pub mod repositories;
pub mod state;
