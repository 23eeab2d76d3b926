use crate::crypto_helpers::eddsa::DeviceKeys;
use crate::ctx::RunCtx;
use crate::handle_apdu::handle_apdu;
use crate::implementation::{Outcome, Prompt, Response};
use crate::interface::*;
use crate::settings::*;
use crate::ui::*;

use core::cell::RefCell;
use ledger_device_sdk::io::Comm;
use ledger_device_sdk::nbgl::{init_comm, NbglHomeAndSettings};
use ledger_log::{info, trace};

pub fn app_main() {
    let mut comm = Comm::new();
    let mut ctx = RunCtx::new();
    let keys = DeviceKeys;
    let settings = Settings;
    let mut menu_settings = Settings;

    // Initialize reference to Comm instance for NBGL
    // API calls.
    init_comm(&mut comm);

    info!("NEAR {}", env!("CARGO_PKG_VERSION"));

    let settings_strings = [[
        "Blind Signing",
        "Sign transactions for which details cannot be verified",
    ]];

    let main_menu = RefCell::new(
        NbglHomeAndSettings::new()
            .glyph(&APP_ICON)
            .settings(menu_settings.get_mut(), &settings_strings)
            .infos("NEAR", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_AUTHORS")),
    );
    let do_refresh = RefCell::new(true);
    let ui = UserInterface {
        main_menu: &main_menu,
        do_refresh: &do_refresh,
    };

    loop {
        ui.show_main_menu();
        let ins: Ins = comm.next_command();
        let (p1, p2) = {
            let header = comm.get_apdu_metadata();
            (header.p1, header.p2)
        };
        let outcome = match comm.get_data() {
            Ok(data) => handle_apdu(&mut ctx, &Command { ins, p1, p2, data }, &settings, &keys),
            Err(_) => Err(StatusWord::WrongLength),
        };

        let response = match outcome {
            Ok(Outcome::Reply(data)) => Response {
                data,
                status: StatusWord::Ok,
            },
            Ok(Outcome::Prompt(prompt)) => {
                let approved = match prompt {
                    Prompt::Sign(flow) => ui.review_transaction(flow, ctx.display()),
                    Prompt::BlindSign => ui.review_blind_hash(ctx.display()),
                    Prompt::Address => ctx
                        .pending_public_key()
                        .is_some_and(|key| ui.confirm_address(key)),
                    Prompt::WalletId => ctx
                        .pending_public_key()
                        .is_some_and(|key| ui.confirm_wallet_id(key)),
                };
                ctx.resolve(approved, &keys)
            }
            Err(status) => {
                if status == StatusWord::BlindSigningDisabled {
                    ui.warn_blind_signing_disabled();
                }
                Response {
                    data: Default::default(),
                    status,
                }
            }
        };

        trace!("Replying {:?}", response.status);
        if response.status == StatusWord::Ok {
            comm.append(&response.data);
            comm.reply_ok();
        } else {
            comm.reply(response.status);
        }
    }
}
