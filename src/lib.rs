#![cfg_attr(target_family = "bolos", no_std)]

#[cfg(target_family = "bolos")]
extern crate alloc;

pub mod crypto_helpers;
pub mod ctx;
pub mod handle_apdu;
pub mod implementation;
pub mod interface;
pub mod parser;
pub mod settings;
pub mod ui;
pub mod utils;

#[cfg(target_family = "bolos")]
pub mod app_main;
