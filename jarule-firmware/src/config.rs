//! Compile-time build configuration: the UID and software version id
//! every firmware image bakes in at build time. Analogous to
//! `APP_Initialize`'s `OUR_UID` constant and `RDMResponderSettings` in
//! the original firmware.

use jarule_core::Uid;

#[derive(Debug, Clone, Copy)]
pub struct BuildConfig {
    pub uid: Uid,
    pub software_version_id: u32,
}

impl BuildConfig {
    pub const fn new(manufacturer_id: u16, device_id: u32, software_version_id: u32) -> Self {
        BuildConfig {
            uid: Uid::new(manufacturer_id, device_id),
            software_version_id,
        }
    }
}
