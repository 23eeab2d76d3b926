use crate::parser::common::{DisplayContext, LINE1_SIZE};
use crate::parser::tx::SignFlow;

use arrayvec::{ArrayString, ArrayVec, CapacityError};
use core::fmt::Write;

pub const FULL_ACCESS_WARNING: &str = "This gives full access to a device other than Ledger";

const TITLE_SIZE: usize = 24 + LINE1_SIZE;
const MAX_FIELDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewField<'a> {
    pub name: &'static str,
    pub value: &'a str,
}

/// Screens shown for one signing request, before any toolkit draws them.
#[derive(Debug, Clone)]
pub struct Review<'a> {
    /// What is being signed, in a few words
    pub action: &'a str,
    pub intro: ArrayString<TITLE_SIZE>,
    pub finish: ArrayString<TITLE_SIZE>,
    /// Shown before the fields, and must be acknowledged
    pub warning: Option<&'static str>,
    pub blind: bool,
    pub fields: ArrayVec<ReviewField<'a>, MAX_FIELDS>,
}

impl<'a> Review<'a> {
    fn new(display: &'a DisplayContext, blind: bool) -> Result<Self, CapacityError> {
        let action = display.line1.as_str();
        let mut intro = ArrayString::new();
        write!(intro, "Review transaction to\n{}", action).map_err(|_| CapacityError::new(()))?;
        let mut finish = ArrayString::new();
        write!(finish, "Sign transaction to\n{}?", action).map_err(|_| CapacityError::new(()))?;
        Ok(Review {
            action,
            intro,
            finish,
            warning: None,
            blind,
            fields: ArrayVec::new(),
        })
    }

    fn field(mut self, name: &'static str, value: &'a str) -> Result<Self, CapacityError> {
        self.fields
            .try_push(ReviewField { name, value })
            .map_err(|e| e.simplify())?;
        Ok(self)
    }

    pub fn for_transaction(
        flow: SignFlow,
        display: &'a DisplayContext,
    ) -> Result<Self, CapacityError> {
        let review = Review::new(display, false)?;
        let to = display.line2.as_str();
        let from = display.line3.as_str();
        match flow {
            SignFlow::Generic => review.field("To", to)?.field("From", from),
            SignFlow::Transfer => review
                .field("Amount (NEAR)", display.amount.as_str())?
                .field("To", to)?
                .field("From", from),
            SignFlow::FunctionCall => review
                .field("Deposit", display.line5.as_str())?
                .field("To", to)?
                .field("From", from)?
                .field("Args", display.long_line.as_str()),
            SignFlow::AddFunctionCallKey => review
                .field("To account", from)?
                .field("Contract", to)?
                .field("Allowance", display.line5.as_str()),
            SignFlow::AddFullAccessKey => {
                let mut review = review
                    .field("To account", from)?
                    .field("Contract", to)?
                    .field("Permission", display.line5.as_str())?;
                review.warning = Some(FULL_ACCESS_WARNING);
                Ok(review)
            }
        }
    }

    pub fn for_blind_hash(display: &'a DisplayContext) -> Result<Self, CapacityError> {
        Review::new(display, true)?.field("Base58 Hash", display.line2.as_str())
    }
}
