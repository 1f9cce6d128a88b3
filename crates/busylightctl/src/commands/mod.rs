//! Command implementations for busylightctl

pub mod demo;
pub mod send;
pub mod show;
pub mod verify;

use clap::Args;

/// Device selection shared by commands that write to hardware.
#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    /// USB vendor ID (hex, e.g. 27BB); defaults to probing known devices
    #[arg(long, value_parser = send::parse_hex_id, requires = "pid")]
    pub vid: Option<u16>,

    /// USB product ID (hex, e.g. 3BCD)
    #[arg(long, value_parser = send::parse_hex_id, requires = "vid")]
    pub pid: Option<u16>,
}

impl DeviceArgs {
    pub fn ids(&self) -> Option<(u16, u16)> {
        self.vid.zip(self.pid)
    }
}
