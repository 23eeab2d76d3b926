use crate::crypto_helpers::common::{Address, CryptographyError};
use crate::ctx::ChunkError;
use crate::parser::common::PUBLIC_KEY_SIZE;
use crate::parser::reader::ParseError;

use core::convert::TryFrom;
use core::fmt;
use num_enum::TryFromPrimitive;

#[cfg(target_family = "bolos")]
use ledger_device_sdk::io::{ApduHeader, Reply};

pub const CLA: u8 = 0x80;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum Ins {
    Sign = 0x02,
    GetPublicKey = 0x04,
    GetWalletId = 0x05,
    GetAppConfiguration = 0x06,
}

impl Ins {
    pub fn decode(cla: u8, ins: u8) -> Result<Ins, StatusWord> {
        if cla != CLA {
            return Err(StatusWord::ClaNotSupported);
        }
        Ins::try_from(ins).map_err(|_| StatusWord::InsNotSupported)
    }
}

#[cfg(target_family = "bolos")]
impl TryFrom<ApduHeader> for Ins {
    type Error = StatusWord;
    fn try_from(m: ApduHeader) -> Result<Ins, Self::Error> {
        Ins::decode(m.cla, m.ins)
    }
}

/// P1 of a sign command
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum SignMode {
    More = 0x00,
    Blind = 0x01,
    Last = 0x80,
}

/// P1 of a public key request
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum PublicKeyMode {
    DisplayAndConfirm = 0x00,
    ReturnOnly = 0x01,
}

/// One decoded request from the host.
#[derive(Debug, Clone, Copy)]
pub struct Command<'a> {
    pub ins: Ins,
    pub p1: u8,
    pub p2: u8,
    pub data: &'a [u8],
}

// ========== STATUS WORDS ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusWord {
    Ok,
    /// The user declined on the device
    UserRejected,
    ConditionsNotSatisfied,
    BufferOverflow,
    ParseError,
    WrongBlindLength,
    BlindSigningDisabled,
    SigningFailed,
    IncorrectParams,
    WrongLength,
    InsNotSupported,
    ClaNotSupported,
}

impl From<StatusWord> for u16 {
    fn from(sw: StatusWord) -> u16 {
        match sw {
            StatusWord::Ok => 0x9000,
            // Hosts in the field expect a rejection as 0x6985
            StatusWord::UserRejected => 0x6985,
            StatusWord::ConditionsNotSatisfied => 0x6985,
            StatusWord::BufferOverflow => 0x6990,
            StatusWord::ParseError => 0x6991,
            StatusWord::WrongBlindLength => 0x6992,
            StatusWord::BlindSigningDisabled => 0x6993,
            StatusWord::SigningFailed => 0x6F00,
            StatusWord::IncorrectParams => 0x6A86,
            StatusWord::WrongLength => 0x6A87,
            StatusWord::InsNotSupported => 0x6D00,
            StatusWord::ClaNotSupported => 0x6E00,
        }
    }
}

#[cfg(target_family = "bolos")]
impl From<StatusWord> for Reply {
    fn from(sw: StatusWord) -> Reply {
        Reply(u16::from(sw))
    }
}

impl From<ParseError> for StatusWord {
    fn from(_: ParseError) -> Self {
        StatusWord::ParseError
    }
}

impl From<ChunkError> for StatusWord {
    fn from(e: ChunkError) -> Self {
        match e {
            ChunkError::Underflow => StatusWord::WrongLength,
            ChunkError::Overflow => StatusWord::BufferOverflow,
        }
    }
}

impl From<CryptographyError> for StatusWord {
    fn from(_: CryptographyError) -> Self {
        StatusWord::SigningFailed
    }
}

// ========== ADDRESSES ==========

/// `ed25519:` followed by the base58 public key
pub struct NearPubKeyAddress([u8; PUBLIC_KEY_SIZE]);

impl Address<NearPubKeyAddress, [u8; PUBLIC_KEY_SIZE]> for NearPubKeyAddress {
    fn get_address(key: &[u8; PUBLIC_KEY_SIZE]) -> Result<Self, CryptographyError> {
        Ok(NearPubKeyAddress(*key))
    }
    fn get_binary_address(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for NearPubKeyAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 48];
        let len = bs58::encode(&self.0).onto(&mut buf[..]).or(Err(fmt::Error))?;
        let encoded = core::str::from_utf8(&buf[..len]).or(Err(fmt::Error))?;
        write!(f, "ed25519:{}", encoded)
    }
}

/// Upper-case hex of a public key, as shown when confirming a wallet id
pub struct WalletId([u8; 2 * PUBLIC_KEY_SIZE]);

impl Address<WalletId, [u8; PUBLIC_KEY_SIZE]> for WalletId {
    fn get_address(key: &[u8; PUBLIC_KEY_SIZE]) -> Result<Self, CryptographyError> {
        let mut buf = [0u8; 2 * PUBLIC_KEY_SIZE];
        hex::encode_to_slice(key, &mut buf)?;
        buf.make_ascii_uppercase();
        Ok(WalletId(buf))
    }
    fn get_binary_address(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = core::str::from_utf8(&self.0).or(Err(fmt::Error))?;
        f.write_str(s)
    }
}
