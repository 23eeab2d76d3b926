pub mod common;

#[cfg(target_family = "bolos")]
pub mod nbgl;
#[cfg(target_family = "bolos")]
pub use nbgl::*;
