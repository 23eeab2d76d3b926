use crate::crypto_helpers::common::KeyStore;
use crate::ctx::RunCtx;
use crate::implementation::*;
use crate::interface::*;
use crate::settings::SettingsStore;

use ledger_log::trace;

/// Routes one command. Anything other than a sign command drops the
/// transaction in progress first.
pub fn handle_apdu(
    ctx: &mut RunCtx,
    cmd: &Command,
    settings: &impl SettingsStore,
    keys: &impl KeyStore,
) -> Result<Outcome, StatusWord> {
    trace!("Dispatching {:?}", cmd.ins);
    match cmd.ins {
        Ins::Sign => sign_apdu(ctx, cmd, settings),
        Ins::GetPublicKey => get_public_key_apdu(ctx, cmd, keys),
        Ins::GetWalletId => get_wallet_id_apdu(ctx, cmd, keys),
        Ins::GetAppConfiguration => Ok(get_app_configuration_apdu(ctx)),
    }
}
