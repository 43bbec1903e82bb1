pub mod client;
pub mod dto;
pub mod utils;

pub use client::{DEFAULT_BASE_URL, WalletApi};
