//! USB identifiers for kuando Busylight devices.
//!
//! ## Sources
//!
//! - Community Busylight drivers (`busylight-for-humans`, `hidapi`-based
//!   Node and Go ports) list VID `0x27BB` with PIDs `0x3BCA`-`0x3BCF`.
//! - First-generation "Busylight Lync" units enumerate under the Microchip
//!   VID `0x04D8` with PID `0xF848`.
//!
//! All models speak protocol v2; the model only matters for display.

#![deny(static_mut_refs)]

/// Plenom A/S (kuando) USB Vendor ID.
pub const KUANDO_VENDOR_ID: u16 = 0x27BB;

/// Microchip VID used by first-generation units.
pub const MICROCHIP_VENDOR_ID: u16 = 0x04D8;

/// Known product IDs.
pub mod product_ids {
    pub const ALPHA: u16 = 0x3BCA;
    pub const UC_ALPHA: u16 = 0x3BCB;
    pub const KUANDO_BOX: u16 = 0x3BCC;
    pub const UC_OMEGA: u16 = 0x3BCD;
    pub const ALPHA_REV2: u16 = 0x3BCE;
    pub const OMEGA: u16 = 0x3BCF;
    /// Busylight Lync, Microchip VID.
    pub const LYNC: u16 = 0xF848;
}

/// Every known VID/PID pair, in the order [`acquire`] tries them.
///
/// [`acquire`]: crate::HidApiWriter::acquire
pub const KNOWN_DEVICES: [(u16, u16); 7] = [
    (KUANDO_VENDOR_ID, product_ids::OMEGA),
    (KUANDO_VENDOR_ID, product_ids::UC_OMEGA),
    (KUANDO_VENDOR_ID, product_ids::ALPHA),
    (KUANDO_VENDOR_ID, product_ids::UC_ALPHA),
    (KUANDO_VENDOR_ID, product_ids::ALPHA_REV2),
    (KUANDO_VENDOR_ID, product_ids::KUANDO_BOX),
    (MICROCHIP_VENDOR_ID, product_ids::LYNC),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusylightModel {
    Alpha,
    Omega,
    KuandoBox,
    Lync,
    Unknown,
}

impl BusylightModel {
    pub fn from_ids(vendor_id: u16, product_id: u16) -> Self {
        match (vendor_id, product_id) {
            (KUANDO_VENDOR_ID, product_ids::ALPHA)
            | (KUANDO_VENDOR_ID, product_ids::UC_ALPHA)
            | (KUANDO_VENDOR_ID, product_ids::ALPHA_REV2) => Self::Alpha,
            (KUANDO_VENDOR_ID, product_ids::OMEGA) | (KUANDO_VENDOR_ID, product_ids::UC_OMEGA) => {
                Self::Omega
            }
            (KUANDO_VENDOR_ID, product_ids::KUANDO_BOX) => Self::KuandoBox,
            (MICROCHIP_VENDOR_ID, product_ids::LYNC) => Self::Lync,
            _ => Self::Unknown,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Alpha => "kuando Busylight Alpha",
            Self::Omega => "kuando Busylight Omega",
            Self::KuandoBox => "kuandoBOX",
            Self::Lync => "Busylight Lync",
            Self::Unknown => "Unknown Busylight Device",
        }
    }
}

pub fn is_busylight_device(vendor_id: u16, product_id: u16) -> bool {
    BusylightModel::from_ids(vendor_id, product_id) != BusylightModel::Unknown
}
