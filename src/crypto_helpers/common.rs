use crate::parser::common::{Bip32Path, HASH_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};

use core::fmt;

#[cfg(target_family = "bolos")]
use ledger_device_sdk::ecc::CxError;
#[cfg(target_family = "bolos")]
use ledger_device_sdk::io::SyscallError;

// Target chain's notion of an address and how to format one.

pub trait Address<A, K>: fmt::Display {
    fn get_address(key: &K) -> Result<A, CryptographyError>;
    fn get_binary_address(&self) -> &[u8];
}

/// Key derivation and signing, scoped to one call each so no private key
/// outlives the operation that needed it.
pub trait KeyStore {
    fn public_key(&self, path: &Bip32Path) -> Result<[u8; PUBLIC_KEY_SIZE], CryptographyError>;
    fn sign(
        &self,
        path: &Bip32Path,
        message: &[u8; HASH_SIZE],
    ) -> Result<[u8; SIGNATURE_SIZE], CryptographyError>;
}

/// Converts an uncompressed Ed25519 point (0x04 || X || Y, both coordinates
/// big-endian) to the 32 byte compressed encoding: little-endian Y with the
/// parity of X in the top bit.
pub fn public_key_le_to_be(raw: &[u8; 65]) -> [u8; PUBLIC_KEY_SIZE] {
    let mut out = [0u8; PUBLIC_KEY_SIZE];
    for (i, b) in out.iter_mut().enumerate() {
        *b = raw[64 - i];
    }
    if raw[32] & 1 != 0 {
        out[31] |= 0x80;
    }
    out
}

pub struct HexSlice<'a>(pub &'a [u8]);

impl fmt::Display for HexSlice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum CryptographyError {
    NoneError,
    EncodingError,
    #[cfg(target_family = "bolos")]
    SyscallError(SyscallError),
    #[cfg(target_family = "bolos")]
    CxError(CxError),
}

#[cfg(target_family = "bolos")]
impl From<SyscallError> for CryptographyError {
    fn from(e: SyscallError) -> Self {
        CryptographyError::SyscallError(e)
    }
}
#[cfg(target_family = "bolos")]
impl From<CxError> for CryptographyError {
    fn from(e: CxError) -> Self {
        CryptographyError::CxError(e)
    }
}
impl From<bs58::encode::Error> for CryptographyError {
    fn from(_: bs58::encode::Error) -> Self {
        CryptographyError::EncodingError
    }
}
impl From<hex::FromHexError> for CryptographyError {
    fn from(_: hex::FromHexError) -> Self {
        CryptographyError::EncodingError
    }
}
