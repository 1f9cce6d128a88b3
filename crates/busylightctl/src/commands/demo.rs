//! `demo`: the built-in three-step pattern.

use anyhow::Result;

use crate::commands::{DeviceArgs, send};
use crate::output;
use crate::pattern::Pattern;

pub fn execute(send_to_device: bool, device: &DeviceArgs, json: bool) -> Result<()> {
    let spec = Pattern::demo().to_spec()?;
    if send_to_device {
        send::deliver(&spec, device, json)
    } else {
        output::print_spec(&spec, json);
        Ok(())
    }
}
