use crate::crypto_helpers::common::KeyStore;
use crate::crypto_helpers::hasher::{Base58Hash, Hasher, Sha256};
use crate::ctx::{RunCtx, State};
use crate::interface::*;
use crate::parser::common::{Bip32Path, BIP32_PATH_SIZE, HASH_SIZE, SIGNATURE_SIZE};
use crate::parser::tx::{parse_transaction, SignFlow};
use crate::settings::SettingsStore;

use arrayvec::{ArrayString, ArrayVec};
use core::convert::TryFrom;
use core::fmt::Write;
use ledger_log::{error, info, trace};
use zeroize::Zeroizing;

pub type ReplyData = ArrayVec<u8, SIGNATURE_SIZE>;

/// What the device has to show before a pending command can be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Sign(SignFlow),
    BlindSign,
    Address,
    WalletId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Answer the command right away
    Reply(ReplyData),
    /// Ask the user, then call [`RunCtx::resolve`]
    Prompt(Prompt),
}

/// Final answer to a command that waited on the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub data: ReplyData,
    pub status: StatusWord,
}

impl Response {
    fn ok(data: ReplyData) -> Self {
        Response {
            data,
            status: StatusWord::Ok,
        }
    }

    fn err(status: StatusWord) -> Self {
        Response {
            data: ArrayVec::new(),
            status,
        }
    }
}

fn reply_from(bytes: &[u8]) -> Result<Outcome, StatusWord> {
    let mut rv = ReplyData::new();
    rv.try_extend_from_slice(bytes)
        .map_err(|_| StatusWord::SigningFailed)?;
    Ok(Outcome::Reply(rv))
}

const BLIND_SIGN_TITLE: &[u8] = b"blind sign SHA256";

impl RunCtx {
    fn has_pending_prompt(&self) -> bool {
        !matches!(self.state, State::Idle | State::Accumulating)
    }

    /// Public key waiting for confirmation, if an address or wallet id
    /// prompt is open.
    pub fn pending_public_key(&self) -> Option<&[u8; 32]> {
        match &self.state {
            State::AwaitingAddressApproval(key) | State::AwaitingWalletIdApproval(key) => Some(key),
            _ => None,
        }
    }

    /// Applies the user's decision on the open prompt. The context is always
    /// cleared afterwards, whatever the decision.
    pub fn resolve(&mut self, approved: bool, keys: &impl KeyStore) -> Response {
        let response = match (self.state, approved) {
            (State::Idle | State::Accumulating, _) => {
                Response::err(StatusWord::ConditionsNotSatisfied)
            }
            (_, false) => {
                info!("User rejected");
                Response::err(StatusWord::UserRejected)
            }
            (State::AwaitingSignApproval(_), true) => {
                let mut hasher = Sha256::new();
                hasher.update(self.signing.data());
                let hash: Zeroizing<[u8; HASH_SIZE]> = hasher.finalize();
                self.sign_hash(&hash, keys)
            }
            (State::AwaitingBlindApproval, true) => {
                let mut hash = Zeroizing::new([0u8; HASH_SIZE]);
                hash.copy_from_slice(self.signing.data());
                self.sign_hash(&hash, keys)
            }
            (State::AwaitingAddressApproval(key) | State::AwaitingWalletIdApproval(key), true) => {
                let mut rv = ReplyData::new();
                match rv.try_extend_from_slice(&key) {
                    Ok(()) => Response::ok(rv),
                    Err(_) => Response::err(StatusWord::SigningFailed),
                }
            }
        };
        self.reset();
        response
    }

    fn sign_hash(&self, hash: &[u8; HASH_SIZE], keys: &impl KeyStore) -> Response {
        let Some(path) = self.signing.path() else {
            return Response::err(StatusWord::ConditionsNotSatisfied);
        };
        trace!(
            "Signing hash {}",
            crate::crypto_helpers::hasher::HexHash(*hash)
        );
        match keys.sign(path, hash) {
            Ok(sig) => Response::ok(ArrayVec::from(sig)),
            Err(_e) => {
                error!("Signing failed: {:?}", _e);
                Response::err(StatusWord::SigningFailed)
            }
        }
    }
}

// ========== SIGN ==========

pub fn sign_apdu(
    ctx: &mut RunCtx,
    cmd: &Command,
    settings: &impl SettingsStore,
) -> Result<Outcome, StatusWord> {
    let mode = SignMode::try_from(cmd.p1).map_err(|_| {
        ctx.reset();
        StatusWord::IncorrectParams
    })?;

    if ctx.has_pending_prompt() {
        info!("Sign command while a prompt is open, aborting it");
        ctx.reset();
        return Err(StatusWord::ConditionsNotSatisfied);
    }

    match mode {
        SignMode::More => {
            add_chunk(ctx, cmd.data)?;
            ctx.state = State::Accumulating;
            Ok(Outcome::Reply(ReplyData::new()))
        }
        SignMode::Last => {
            ctx.signing.set_network_byte(cmd.p2);
            add_chunk(ctx, cmd.data)?;
            info!("Transaction length {}", ctx.signing.data().len());
            match parse_transaction(ctx.signing.data(), &mut ctx.display) {
                Ok(flow) => {
                    info!("Sign flow {:?}", flow);
                    ctx.state = State::AwaitingSignApproval(flow);
                    Ok(Outcome::Prompt(Prompt::Sign(flow)))
                }
                Err(_e) => {
                    error!("Parsing failed: {:?}", _e);
                    ctx.reset();
                    Err(StatusWord::ParseError)
                }
            }
        }
        SignMode::Blind => blind_sign_apdu(ctx, cmd, settings),
    }
}

fn add_chunk(ctx: &mut RunCtx, data: &[u8]) -> Result<(), StatusWord> {
    ctx.signing.add_chunk(data).map_err(|e| {
        error!("Rejecting chunk: {:?}", e);
        ctx.reset();
        StatusWord::from(e)
    })
}

fn blind_sign_apdu(
    ctx: &mut RunCtx,
    cmd: &Command,
    settings: &impl SettingsStore,
) -> Result<Outcome, StatusWord> {
    if !settings.get_blind_sign() {
        info!("Blind signing is disabled");
        return Err(StatusWord::BlindSigningDisabled);
    }
    ctx.reset();
    if cmd.data.len() != BIP32_PATH_SIZE + HASH_SIZE {
        return Err(StatusWord::WrongBlindLength);
    }
    add_chunk(ctx, cmd.data)?;

    let mut hash = Base58Hash([0u8; HASH_SIZE]);
    hash.0.copy_from_slice(ctx.signing.data());
    let mut rendered = ArrayString::<64>::new();
    if write!(rendered, "{}", hash).is_err() {
        ctx.reset();
        return Err(StatusWord::SigningFailed);
    }
    ctx.display.line1.set(BLIND_SIGN_TITLE);
    ctx.display.line2.set(rendered.as_bytes());
    ctx.state = State::AwaitingBlindApproval;
    Ok(Outcome::Prompt(Prompt::BlindSign))
}

// ========== KEYS ==========

fn read_path(data: &[u8]) -> Result<Bip32Path, StatusWord> {
    if data.len() != BIP32_PATH_SIZE {
        return Err(StatusWord::ConditionsNotSatisfied);
    }
    Bip32Path::split(data)
        .map(|(path, _)| path)
        .ok_or(StatusWord::ConditionsNotSatisfied)
}

pub fn get_public_key_apdu(
    ctx: &mut RunCtx,
    cmd: &Command,
    keys: &impl KeyStore,
) -> Result<Outcome, StatusWord> {
    ctx.reset();
    let path = read_path(cmd.data)?;
    let mode = PublicKeyMode::try_from(cmd.p1).map_err(|_| StatusWord::IncorrectParams)?;
    let key = keys.public_key(&path)?;
    match mode {
        PublicKeyMode::ReturnOnly => reply_from(&key),
        PublicKeyMode::DisplayAndConfirm => {
            ctx.state = State::AwaitingAddressApproval(key);
            Ok(Outcome::Prompt(Prompt::Address))
        }
    }
}

pub fn get_wallet_id_apdu(
    ctx: &mut RunCtx,
    cmd: &Command,
    keys: &impl KeyStore,
) -> Result<Outcome, StatusWord> {
    ctx.reset();
    let path = read_path(cmd.data)?;
    let key = keys.public_key(&path)?;
    ctx.state = State::AwaitingWalletIdApproval(key);
    Ok(Outcome::Prompt(Prompt::WalletId))
}

// ========== CONFIGURATION ==========

/// Answers with the app version. Doubles as the host's way to drop any
/// transaction in progress.
pub fn get_app_configuration_apdu(ctx: &mut RunCtx) -> Outcome {
    ctx.reset();
    let mut rv = ReplyData::new();
    rv.push(env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0));
    rv.push(env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0));
    rv.push(env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0));
    Outcome::Reply(rv)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::crypto_helpers::common::CryptographyError;
    use crate::parser::common::PUBLIC_KEY_SIZE;
    use crate::parser::tx::fixtures::*;
    use crate::settings::MemorySettings;
    use core::cell::{Cell, RefCell};
    use hex_literal::hex;
    use sha2::Digest;

    pub const PATH: [u8; 20] = hex!("8000002c8000018d800000008000000080000001");
    const NETWORK_BYTE: u8 = 0x57;

    /// Deterministic keys: the signature echoes the message and the path.
    #[derive(Default)]
    pub struct MockKeys {
        pub sign_calls: Cell<usize>,
        pub last_message: RefCell<Option<[u8; 32]>>,
        pub fail: bool,
    }

    impl MockKeys {
        pub fn public_key_for(path: &Bip32Path) -> [u8; PUBLIC_KEY_SIZE] {
            let mut key = [0u8; PUBLIC_KEY_SIZE];
            for (i, b) in key.iter_mut().enumerate() {
                *b = (path.0[i % 5] as u8).wrapping_add(i as u8);
            }
            key
        }

        pub fn signature_for(message: &[u8; 32]) -> [u8; 64] {
            let mut sig = [0x5a; 64];
            sig[..32].copy_from_slice(message);
            sig
        }
    }

    impl KeyStore for MockKeys {
        fn public_key(&self, path: &Bip32Path) -> Result<[u8; PUBLIC_KEY_SIZE], CryptographyError> {
            Ok(Self::public_key_for(path))
        }

        fn sign(&self, _path: &Bip32Path, message: &[u8; 32]) -> Result<[u8; 64], CryptographyError> {
            self.sign_calls.set(self.sign_calls.get() + 1);
            if self.fail {
                return Err(CryptographyError::NoneError);
            }
            self.last_message.replace(Some(*message));
            Ok(Self::signature_for(message))
        }
    }

    fn cmd(ins: Ins, p1: u8, p2: u8, data: &[u8]) -> Command<'_> {
        Command { ins, p1, p2, data }
    }

    fn with_path(tx: &[u8]) -> Vec<u8> {
        let mut v = Vec::from(&PATH[..]);
        v.extend_from_slice(tx);
        v
    }

    fn sha256(data: &[u8]) -> [u8; 32] {
        let mut rv = [0u8; 32];
        rv.copy_from_slice(&sha2::Sha256::digest(data));
        rv
    }

    fn sign_last(ctx: &mut RunCtx, data: &[u8]) -> Result<Outcome, StatusWord> {
        let settings = MemorySettings::default();
        sign_apdu(ctx, &cmd(Ins::Sign, 0x80, NETWORK_BYTE, data), &settings)
    }

    fn assert_wiped(ctx: &RunCtx) {
        assert_eq!(ctx.state(), State::Idle);
        assert!(ctx.signing().is_empty());
        assert!(ctx.signing().data().is_empty());
        assert!(ctx.display().line1.is_empty());
    }

    #[test]
    fn test_transfer_approved() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let outcome = sign_last(&mut ctx, &with_path(&TRANSFER_TX)).unwrap();
        assert_eq!(outcome, Outcome::Prompt(Prompt::Sign(SignFlow::Transfer)));
        assert_eq!(ctx.display().amount, "0.1234");
        assert_eq!(ctx.signing().network_byte(), NETWORK_BYTE);

        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::Ok);
        let expected = MockKeys::signature_for(&sha256(&TRANSFER_TX));
        assert_eq!(response.data.as_slice(), &expected[..]);
        assert_eq!(keys.sign_calls.get(), 1);
        assert_wiped(&ctx);
    }

    fn borsh_tx(actions: u32, body: &[u8]) -> Vec<u8> {
        let mut tx = Vec::new();
        for (account, rest) in [
            (&b"alice.near"[..], &[0u8; 1 + 32 + 8][..]),
            (&b"bob.near"[..], &[0u8; 32][..]),
        ] {
            tx.extend_from_slice(&(account.len() as u32).to_le_bytes());
            tx.extend_from_slice(account);
            tx.extend_from_slice(rest);
        }
        tx.extend_from_slice(&actions.to_le_bytes());
        tx.extend_from_slice(body);
        tx
    }

    #[test]
    fn test_one_near_to_bob() {
        let mut transfer = vec![3u8];
        transfer.extend_from_slice(&1_000_000_000_000_000_000_000_000u128.to_le_bytes());
        let tx = borsh_tx(1, &transfer);

        let mut ctx = RunCtx::new();
        let outcome = sign_last(&mut ctx, &with_path(&tx)).unwrap();
        assert_eq!(outcome, Outcome::Prompt(Prompt::Sign(SignFlow::Transfer)));
        assert_eq!(ctx.display().amount, "1");
        assert_eq!(ctx.display().line2, "bob.near");
        assert_eq!(ctx.display().line3, "alice.near");
    }

    #[test]
    fn test_multiple_actions_wait_for_approval() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let tx = borsh_tx(2, &[0xff; 8]);
        let outcome = sign_last(&mut ctx, &with_path(&tx)).unwrap();
        assert_eq!(outcome, Outcome::Prompt(Prompt::Sign(SignFlow::Generic)));
        assert_eq!(ctx.display().line1, "multiple actions");
        assert_eq!(keys.sign_calls.get(), 0);

        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::Ok);
        assert_eq!(keys.last_message.borrow().as_ref(), Some(&sha256(&tx)));
    }

    #[test]
    fn test_chunked_function_call() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let settings = MemorySettings::default();
        let data = with_path(&FUNCTION_CALL_TX);
        let (first, rest) = data.split_at(60);
        let (second, last) = rest.split_at(60);

        for chunk in [first, second] {
            let outcome = sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x00, 0, chunk), &settings).unwrap();
            assert_eq!(outcome, Outcome::Reply(ReplyData::new()));
            assert_eq!(ctx.state(), State::Accumulating);
        }
        let outcome = sign_last(&mut ctx, last).unwrap();
        assert_eq!(outcome, Outcome::Prompt(Prompt::Sign(SignFlow::FunctionCall)));
        assert_eq!(ctx.signing().data(), &FUNCTION_CALL_TX[..]);
        assert_eq!(ctx.display().line1, "function_name");

        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::Ok);
        assert_eq!(
            keys.last_message.borrow().as_ref(),
            Some(&sha256(&FUNCTION_CALL_TX))
        );
    }

    #[test]
    fn test_rejection_never_signs() {
        for tx in [&TRANSFER_TX[..], &STAKE_TX[..], &ADD_FULL_ACCESS_KEY_TX[..]] {
            let mut ctx = RunCtx::new();
            let keys = MockKeys::default();
            assert!(matches!(
                sign_last(&mut ctx, &with_path(tx)),
                Ok(Outcome::Prompt(Prompt::Sign(_)))
            ));
            let response = ctx.resolve(false, &keys);
            assert_eq!(response.status, StatusWord::UserRejected);
            assert!(response.data.is_empty());
            assert_eq!(keys.sign_calls.get(), 0);
            assert_wiped(&ctx);
        }
    }

    #[test]
    fn test_full_access_key_flow() {
        let mut ctx = RunCtx::new();
        let outcome = sign_last(&mut ctx, &with_path(&ADD_FULL_ACCESS_KEY_TX)).unwrap();
        assert_eq!(
            outcome,
            Outcome::Prompt(Prompt::Sign(SignFlow::AddFullAccessKey))
        );
        assert_eq!(ctx.display().line5, "Full access");
    }

    #[test]
    fn test_overflow_clears_context() {
        let mut ctx = RunCtx::new();
        let settings = MemorySettings::default();
        let mut first = Vec::from(&PATH[..]);
        first.resize(20 + 600, 0);
        sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x00, 0, &first), &settings).unwrap();
        let err = sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x00, 0, &[0; 51]), &settings);
        assert_eq!(err, Err(StatusWord::BufferOverflow));
        assert_wiped(&ctx);
    }

    #[test]
    fn test_short_first_chunk() {
        let mut ctx = RunCtx::new();
        assert_eq!(
            sign_last(&mut ctx, &PATH[..10]),
            Err(StatusWord::WrongLength)
        );
        assert_wiped(&ctx);
    }

    #[test]
    fn test_parse_error_clears_context() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let truncated = with_path(&TRANSFER_TX[..TRANSFER_TX.len() - 1]);
        assert_eq!(sign_last(&mut ctx, &truncated), Err(StatusWord::ParseError));
        assert_wiped(&ctx);
        // Nothing left to approve
        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::ConditionsNotSatisfied);
        assert_eq!(keys.sign_calls.get(), 0);
    }

    #[test]
    fn test_incorrect_p1() {
        let mut ctx = RunCtx::new();
        let settings = MemorySettings::default();
        assert_eq!(
            sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x42, 0, &PATH), &settings),
            Err(StatusWord::IncorrectParams)
        );
    }

    #[test]
    fn test_incorrect_p1_drops_transaction() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let settings = MemorySettings::default();
        let data = with_path(&TRANSFER_TX);
        sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x00, 0, &data[..64]), &settings).unwrap();
        assert_eq!(ctx.state(), State::Accumulating);

        assert_eq!(
            sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x42, 0, &data[64..]), &settings),
            Err(StatusWord::IncorrectParams)
        );
        assert_wiped(&ctx);

        // The next request starts from an empty buffer
        let outcome = sign_last(&mut ctx, &data).unwrap();
        assert_eq!(outcome, Outcome::Prompt(Prompt::Sign(SignFlow::Transfer)));
        assert_eq!(ctx.signing().data(), &TRANSFER_TX[..]);
        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::Ok);
        assert_eq!(keys.last_message.borrow().as_ref(), Some(&sha256(&TRANSFER_TX)));
    }

    #[test]
    fn test_sign_while_prompt_open() {
        let mut ctx = RunCtx::new();
        sign_last(&mut ctx, &with_path(&TRANSFER_TX)).unwrap();
        assert_eq!(
            sign_last(&mut ctx, &with_path(&TRANSFER_TX)),
            Err(StatusWord::ConditionsNotSatisfied)
        );
        assert_wiped(&ctx);
    }

    #[test]
    fn test_signing_failure() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys {
            fail: true,
            ..Default::default()
        };
        sign_last(&mut ctx, &with_path(&TRANSFER_TX)).unwrap();
        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::SigningFailed);
        assert!(response.data.is_empty());
        assert_wiped(&ctx);
    }

    const BLIND_HASH: [u8; 32] =
        hex!("0000000000000000000000000000000000000000000000000000000000000001");

    #[test]
    fn test_blind_sign_disabled_leaves_context() {
        let mut ctx = RunCtx::new();
        let settings = MemorySettings::default();
        let mut first = Vec::from(&PATH[..]);
        first.extend_from_slice(&TRANSFER_TX[..40]);
        sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x00, 0, &first), &settings).unwrap();

        let blind = with_path(&BLIND_HASH);
        assert_eq!(
            sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x01, 0, &blind), &settings),
            Err(StatusWord::BlindSigningDisabled)
        );
        assert_eq!(ctx.state(), State::Accumulating);
        assert_eq!(ctx.signing().data(), &TRANSFER_TX[..40]);
    }

    #[test]
    fn test_blind_sign_wrong_length() {
        let mut ctx = RunCtx::new();
        let settings = MemorySettings::with_blind_sign(true);
        let mut blind = with_path(&BLIND_HASH);
        blind.push(0);
        assert_eq!(
            sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x01, 0, &blind), &settings),
            Err(StatusWord::WrongBlindLength)
        );
        assert_wiped(&ctx);
    }

    #[test]
    fn test_blind_sign_approved() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let settings = MemorySettings::with_blind_sign(true);
        let blind = with_path(&BLIND_HASH);
        let outcome = sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x01, 0, &blind), &settings).unwrap();
        assert_eq!(outcome, Outcome::Prompt(Prompt::BlindSign));
        assert_eq!(ctx.display().line1, "blind sign SHA256");
        assert_eq!(ctx.display().line2, "11111111111111111111111111111112");

        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::Ok);
        // The supplied hash is signed as is
        assert_eq!(keys.last_message.borrow().as_ref(), Some(&BLIND_HASH));
        assert_eq!(
            response.data.as_slice(),
            &MockKeys::signature_for(&BLIND_HASH)[..]
        );
        assert_wiped(&ctx);
    }

    #[test]
    fn test_blind_sign_rejected() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let settings = MemorySettings::with_blind_sign(true);
        let blind = with_path(&BLIND_HASH);
        sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x01, 0, &blind), &settings).unwrap();
        assert_eq!(ctx.resolve(false, &keys).status, StatusWord::UserRejected);
        assert_eq!(keys.sign_calls.get(), 0);
    }

    #[test]
    fn test_public_key_return_only() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let outcome = get_public_key_apdu(&mut ctx, &cmd(Ins::GetPublicKey, 1, 0, &PATH), &keys);
        let (path, _) = Bip32Path::split(&PATH).unwrap();
        let expected = MockKeys::public_key_for(&path);
        assert_eq!(
            outcome,
            Ok(Outcome::Reply(ArrayVec::try_from(&expected[..]).unwrap()))
        );
        assert_eq!(ctx.state(), State::Idle);
    }

    #[test]
    fn test_public_key_display() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let outcome = get_public_key_apdu(&mut ctx, &cmd(Ins::GetPublicKey, 0, 0, &PATH), &keys);
        assert_eq!(outcome, Ok(Outcome::Prompt(Prompt::Address)));
        let (path, _) = Bip32Path::split(&PATH).unwrap();
        let expected = MockKeys::public_key_for(&path);
        assert_eq!(ctx.pending_public_key(), Some(&expected));

        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::Ok);
        assert_eq!(response.data.as_slice(), &expected[..]);
        assert_eq!(ctx.pending_public_key(), None);

        get_public_key_apdu(&mut ctx, &cmd(Ins::GetPublicKey, 0, 0, &PATH), &keys).unwrap();
        assert_eq!(ctx.resolve(false, &keys).status, StatusWord::UserRejected);
    }

    #[test]
    fn test_public_key_bad_input() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        assert_eq!(
            get_public_key_apdu(&mut ctx, &cmd(Ins::GetPublicKey, 0, 0, &PATH[..19]), &keys),
            Err(StatusWord::ConditionsNotSatisfied)
        );
        assert_eq!(
            get_public_key_apdu(&mut ctx, &cmd(Ins::GetPublicKey, 0, 0, &with_path(&[0])), &keys),
            Err(StatusWord::ConditionsNotSatisfied)
        );
        assert_eq!(
            get_public_key_apdu(&mut ctx, &cmd(Ins::GetPublicKey, 2, 0, &PATH), &keys),
            Err(StatusWord::IncorrectParams)
        );
    }

    #[test]
    fn test_wallet_id() {
        let mut ctx = RunCtx::new();
        let keys = MockKeys::default();
        let outcome = get_wallet_id_apdu(&mut ctx, &cmd(Ins::GetWalletId, 0, 0, &PATH), &keys);
        assert_eq!(outcome, Ok(Outcome::Prompt(Prompt::WalletId)));
        assert!(matches!(ctx.state(), State::AwaitingWalletIdApproval(_)));
        let response = ctx.resolve(true, &keys);
        assert_eq!(response.status, StatusWord::Ok);
        assert_eq!(response.data.len(), PUBLIC_KEY_SIZE);
    }

    #[test]
    fn test_app_configuration_cancels_transaction() {
        let mut ctx = RunCtx::new();
        let settings = MemorySettings::default();
        sign_apdu(&mut ctx, &cmd(Ins::Sign, 0x00, 0, &with_path(&TRANSFER_TX[..50])), &settings)
            .unwrap();
        assert_eq!(ctx.state(), State::Accumulating);

        let outcome = get_app_configuration_apdu(&mut ctx);
        assert_eq!(
            outcome,
            Outcome::Reply(ArrayVec::try_from(&[2u8, 3, 0][..]).unwrap())
        );
        assert_wiped(&ctx);

        // A new transaction starts from scratch, path included
        let outcome = sign_last(&mut ctx, &with_path(&TRANSFER_TX)).unwrap();
        assert_eq!(outcome, Outcome::Prompt(Prompt::Sign(SignFlow::Transfer)));
    }
}
