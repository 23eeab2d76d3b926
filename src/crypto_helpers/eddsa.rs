use crate::crypto_helpers::common::{public_key_le_to_be, CryptographyError, KeyStore};
use crate::parser::common::{Bip32Path, HASH_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

use ledger_crypto_helpers::eddsa::with_private_key;
use ledger_log::trace;

/// Keys derived on the secure element with SLIP-10 Ed25519.
#[derive(Clone, Copy, Default)]
pub struct DeviceKeys;

impl KeyStore for DeviceKeys {
    fn public_key(&self, path: &Bip32Path) -> Result<[u8; PUBLIC_KEY_SIZE], CryptographyError> {
        with_private_key(path.as_slice(), true, |privkey| {
            let pubkey = privkey.public_key()?;
            let mut raw = [0u8; 65];
            raw.copy_from_slice(&pubkey.pubkey[..65]);
            Ok(public_key_le_to_be(&raw))
        })
    }

    fn sign(
        &self,
        path: &Bip32Path,
        message: &[u8; HASH_SIZE],
    ) -> Result<[u8; SIGNATURE_SIZE], CryptographyError> {
        trace!("signing with path {:?}", path);
        with_private_key(path.as_slice(), true, |privkey| {
            let (sig, _len) = privkey.sign(message)?;
            Ok(sig)
        })
    }
}
