#![cfg_attr(target_family = "bolos", no_std)]
#![cfg_attr(target_family = "bolos", no_main)]

#[cfg(not(target_family = "bolos"))]
fn main() {}

#[cfg(target_family = "bolos")]
use core::panic::PanicInfo;

#[cfg(target_family = "bolos")]
use near::app_main::*;

#[cfg(target_family = "bolos")]
pub fn custom_panic(info: &PanicInfo) -> ! {
    use ledger_device_sdk::io;
    ledger_device_sdk::log::error!("Panic happened! {:#?}", info);
    let mut comm = io::Comm::new();
    comm.reply(io::StatusWords::Panic);
    ledger_device_sdk::sys::exit_app(0);
}

#[cfg(target_family = "bolos")]
ledger_device_sdk::set_panic!(custom_panic);

#[no_mangle]
#[cfg(target_family = "bolos")]
extern "C" fn sample_main(_arg0: u32) {
    app_main();
}
