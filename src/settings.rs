/// Persistent user settings.
pub trait SettingsStore {
    fn get_blind_sign(&self) -> bool;
    fn set_blind_sign(&mut self, enabled: bool);
}

#[cfg(target_family = "bolos")]
pub use device::*;

#[cfg(target_family = "bolos")]
mod device {
    use super::*;
    use ledger_device_sdk::nvm::*;
    use ledger_device_sdk::NVMData;

    /// Length of the switch array the home screen edits in place
    pub const SETTINGS_SIZE: usize = 10;

    /// Index of the blind signing switch
    const BLIND_SIGN_INDEX: usize = 0;

    // Zero means disabled, which is also the state after install.
    #[link_section = ".nvm_data"]
    static mut DATA: NVMData<AtomicStorage<[u8; SETTINGS_SIZE]>> =
        NVMData::new(AtomicStorage::new(&[0u8; SETTINGS_SIZE]));

    #[derive(Clone, Copy, Default)]
    pub struct Settings;

    impl Settings {
        #[inline(never)]
        pub fn get_mut(&mut self) -> &mut AtomicStorage<[u8; SETTINGS_SIZE]> {
            let data = &raw mut DATA;
            unsafe { (*data).get_mut() }
        }

        #[inline(never)]
        pub fn get_ref(&self) -> &AtomicStorage<[u8; SETTINGS_SIZE]> {
            let data = &raw const DATA;
            unsafe { (*data).get_ref() }
        }
    }

    impl SettingsStore for Settings {
        fn get_blind_sign(&self) -> bool {
            self.get_ref().get_ref()[BLIND_SIGN_INDEX] == 1
        }

        fn set_blind_sign(&mut self, enabled: bool) {
            let mut switches = *self.get_ref().get_ref();
            switches[BLIND_SIGN_INDEX] = enabled as u8;
            self.get_mut().update(&switches);
        }
    }
}

/// Settings kept in RAM, for hosts without persistent storage.
#[derive(Clone, Copy, Default, Debug)]
pub struct MemorySettings {
    blind_sign: bool,
}

impl MemorySettings {
    pub fn with_blind_sign(enabled: bool) -> Self {
        Self {
            blind_sign: enabled,
        }
    }
}

impl SettingsStore for MemorySettings {
    fn get_blind_sign(&self) -> bool {
        self.blind_sign
    }

    fn set_blind_sign(&mut self, enabled: bool) {
        self.blind_sign = enabled;
    }
}
