use crate::parser::common::*;
use crate::parser::reader::{BorshReader, ParseError};
use crate::utils::format_long_decimal_amount;

use core::convert::TryFrom;
use ledger_log::trace;
use num_enum::TryFromPrimitive;

// ========== SCHEMA ==========

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum ActionType {
    CreateAccount = 0,
    DeployContract = 1,
    FunctionCall = 2,
    Transfer = 3,
    Stake = 4,
    AddKey = 5,
    DeleteKey = 6,
    DeleteAccount = 7,
}

impl ActionType {
    /// Review title for actions that are not decoded past their tag
    fn generic_label(&self) -> Option<&'static str> {
        match self {
            ActionType::CreateAccount => Some("create account"),
            ActionType::DeployContract => Some("deploy contract"),
            ActionType::Stake => Some("stake"),
            ActionType::DeleteKey => Some("delete key"),
            ActionType::DeleteAccount => Some("delete account"),
            ActionType::FunctionCall | ActionType::Transfer | ActionType::AddKey => None,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum AccessKeyPermission {
    FunctionCall = 0,
    FullAccess = 1,
}

/// Which review the user is shown before signing.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignFlow {
    Generic = 0,
    Transfer = 1,
    FunctionCall = 2,
    AddFunctionCallKey = 3,
    AddFullAccessKey = 4,
}

const MULTIPLE_ACTIONS: &[u8] = b"multiple actions";

// ========== DECODER ==========

/// Decodes a serialized transaction into `display` and classifies it.
///
/// Layout: signer id, public key, nonce, receiver id, block hash, then the
/// action list. Only a single action is decoded; anything else falls back to
/// the generic review of signer and receiver.
pub fn parse_transaction(data: &[u8], display: &mut DisplayContext) -> Result<SignFlow, ParseError> {
    display.clear();
    let mut reader = BorshReader::new(data);

    let signer_id = reader.read_buffer()?;
    display.line3.set(signer_id);
    reader.skip(TX_PUBLIC_KEY_SIZE)?;
    let _nonce = reader.read_u64()?;

    let receiver_id = reader.read_buffer()?;
    display.line2.set(receiver_id);
    reader.skip(BLOCK_HASH_SIZE)?;

    let actions = reader.read_u32()?;
    trace!("actions: {}", actions);
    if actions != 1 {
        display.line1.set(MULTIPLE_ACTIONS);
        return Ok(SignFlow::Generic);
    }

    let tag = reader.read_u8()?;
    let action = ActionType::try_from(tag).map_err(|_| ParseError::UnknownAction(tag))?;
    trace!("action: {:?}", action);

    match action {
        ActionType::Transfer => {
            let deposit: [u8; BALANCE_SIZE] = reader.read_fixed()?;
            display.line1.set(b"transfer");
            set_amount(&mut display.amount, &deposit)?;
            reader.finish()?;
            Ok(SignFlow::Transfer)
        }
        ActionType::FunctionCall => {
            let method_name = reader.read_buffer()?;
            display.line1.set(method_name);

            // Only arguments that look like JSON are worth showing
            let args = reader.read_buffer()?;
            if args.first() == Some(&b'{') {
                display.long_line.set(args);
            }

            let _gas = reader.read_u64()?;
            let deposit: [u8; BALANCE_SIZE] = reader.read_fixed()?;
            set_amount(&mut display.line5, &deposit)?;
            reader.finish()?;
            Ok(SignFlow::FunctionCall)
        }
        ActionType::AddKey => {
            display.line1.set(b"add key");
            reader.skip(1)?; // key type
            let _public_key: [u8; PUBLIC_KEY_SIZE] = reader.read_fixed()?;
            let _key_nonce = reader.read_u64()?;

            let permission = reader.read_u8()?;
            match AccessKeyPermission::try_from(permission) {
                Ok(AccessKeyPermission::FunctionCall) => {
                    if reader.read_bool()? {
                        let allowance: [u8; BALANCE_SIZE] = reader.read_fixed()?;
                        set_amount(&mut display.line5, &allowance)?;
                    } else {
                        display.line5.set(b"Unlimited");
                    }
                    let permission_receiver = reader.read_buffer()?;
                    display.line2.set(permission_receiver);
                    Ok(SignFlow::AddFunctionCallKey)
                }
                Ok(AccessKeyPermission::FullAccess) => {
                    display.line5.set(b"Full access");
                    reader.finish()?;
                    Ok(SignFlow::AddFullAccessKey)
                }
                Err(_) => Err(ParseError::InvalidTag(permission)),
            }
        }
        other => {
            let label = other
                .generic_label()
                .ok_or(ParseError::UnknownAction(tag))?;
            display.line1.set(label.as_bytes());
            Ok(SignFlow::Generic)
        }
    }
}

fn set_amount<const N: usize>(
    line: &mut DisplayLine<N>,
    amount: &[u8; BALANCE_SIZE],
) -> Result<(), ParseError> {
    let formatted = format_long_decimal_amount::<N>(amount, NEAR_NOMINATION)?;
    line.set_exact(formatted.as_str())?;
    Ok(())
}
