//! `send`: assemble a pattern file and write it to a connected Busylight.

use std::path::Path;

use anyhow::Result;
use busylight_hid_protocol::BusylightSpec;
use busylight_hid_transport::{HidApiWriter, SpecWriter, send_spec};
use tracing::info;

use crate::commands::DeviceArgs;
use crate::error::CliError;
use crate::output;
use crate::pattern::Pattern;

pub fn execute(path: &Path, device: &DeviceArgs, json: bool) -> Result<()> {
    let spec = Pattern::load(path)?.to_spec()?;
    deliver(&spec, device, json)
}

/// Open the selected device and write `spec` to it.
pub fn deliver(spec: &BusylightSpec, device: &DeviceArgs, json: bool) -> Result<()> {
    let mut writer = match device.ids() {
        Some((vendor_id, product_id)) => HidApiWriter::open(vendor_id, product_id),
        None => HidApiWriter::acquire(),
    }
    .map_err(CliError::from)?;

    write_to(&mut writer, spec)?;
    info!(checksum = spec.checksum(), "pattern sent");
    output::print_sent(spec, writer.model(), writer.ids(), json);
    Ok(())
}

fn write_to(writer: &mut dyn SpecWriter, spec: &BusylightSpec) -> Result<(), CliError> {
    send_spec(writer, spec)?;
    Ok(())
}

/// Parse a USB ID given as hex, with or without a `0x` prefix.
pub fn parse_hex_id(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex ID '{s}': {e}"))
}
