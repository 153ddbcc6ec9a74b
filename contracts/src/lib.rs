#![cfg_attr(not(test), no_std)]

pub mod amm_router;
pub mod mock_router;
pub mod mock_token;
pub mod simple_swapper;

pub use simple_swapper::SimpleSwapper;
