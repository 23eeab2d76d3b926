pub mod common;
pub mod hasher;

#[cfg(target_family = "bolos")]
pub mod eddsa;
