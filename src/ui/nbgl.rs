use crate::crypto_helpers::common::Address;
use crate::interface::*;
use crate::parser::common::{DisplayContext, PUBLIC_KEY_SIZE};
use crate::parser::tx::SignFlow;
use crate::ui::common::*;

extern crate alloc;
use alloc::format;

use arrayvec::ArrayVec;
use core::cell::RefCell;
use include_gif::include_gif;
use ledger_device_sdk::nbgl::*;
use ledger_log::error;

#[cfg(any(target_os = "stax", target_os = "flex", target_os = "apex_p"))]
pub const APP_ICON: NbglGlyph = NbglGlyph::from_include(include_gif!("near_64x64.gif", NBGL));
#[cfg(not(any(target_os = "stax", target_os = "flex", target_os = "apex_p")))]
pub const APP_ICON: NbglGlyph = NbglGlyph::from_include(include_gif!("near-small.gif", NBGL));

#[derive(Copy, Clone)]
pub struct UserInterface<'a> {
    pub main_menu: &'a RefCell<NbglHomeAndSettings>,
    pub do_refresh: &'a RefCell<bool>,
}

impl UserInterface<'_> {
    pub fn show_main_menu(&self) {
        let refresh = self.do_refresh.replace(false);
        if refresh {
            self.main_menu.borrow_mut().show_and_return();
        }
    }

    fn show_review(&self, review: &Review) -> bool {
        self.do_refresh.replace(true);
        if let Some(warning) = review.warning {
            let accepted =
                NbglChoice::new().show("DANGER", warning, "Continue", "Reject transaction");
            if !accepted {
                NbglReviewStatus::new()
                    .status_type(StatusType::Transaction)
                    .show(false);
                return false;
            }
        }

        let fields: ArrayVec<Field, 4> = review
            .fields
            .iter()
            .map(|f| Field {
                name: f.name,
                value: f.value,
            })
            .collect();
        let mut nbgl_review = NbglReview::new().glyph(&APP_ICON).titles(
            review.intro.as_str(),
            "",
            review.finish.as_str(),
        );
        if review.blind {
            nbgl_review = nbgl_review.blind();
        }
        let success = nbgl_review.show(&fields);
        NbglReviewStatus::new()
            .status_type(StatusType::Transaction)
            .show(success);
        success
    }

    pub fn review_transaction(&self, flow: SignFlow, display: &DisplayContext) -> bool {
        match Review::for_transaction(flow, display) {
            Ok(review) => self.show_review(&review),
            Err(_) => {
                error!("Review does not fit the screen");
                false
            }
        }
    }

    pub fn review_blind_hash(&self, display: &DisplayContext) -> bool {
        match Review::for_blind_hash(display) {
            Ok(review) => self.show_review(&review),
            Err(_) => false,
        }
    }

    fn verify(&self, verify_str: &str, shown: &str) -> bool {
        self.do_refresh.replace(true);
        let success = NbglAddressReview::new()
            .glyph(&APP_ICON)
            .verify_str(verify_str)
            .show(shown);
        NbglReviewStatus::new()
            .status_type(StatusType::Address)
            .show(success);
        success
    }

    pub fn confirm_address(&self, key: &[u8; PUBLIC_KEY_SIZE]) -> bool {
        match NearPubKeyAddress::get_address(key) {
            Ok(address) => self.verify("Verify NEAR\naddress", &format!("{address}")),
            Err(_) => false,
        }
    }

    pub fn confirm_wallet_id(&self, key: &[u8; PUBLIC_KEY_SIZE]) -> bool {
        match WalletId::get_address(key) {
            Ok(id) => self.verify("Verify NEAR\nwallet id", &format!("{id}")),
            Err(_) => false,
        }
    }

    pub fn warn_blind_signing_disabled(&self) {
        let choice = NbglChoice::new().show(
            "This transaction cannot be clear-signed",
            "Enable blind signing in the settings to sign this transaction",
            "Go to settings",
            "Reject transaction",
        );
        if choice {
            let mut mm = self.main_menu.borrow_mut();
            mm.set_start_page(PageIndex::Settings(0));
            mm.show_and_return();
            mm.set_start_page(PageIndex::Home);
        } else {
            self.do_refresh.replace(true);
        }
    }
}
