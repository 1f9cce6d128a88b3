//! Output formatting for CLI responses

use anyhow::Error;
use busylight_hid_protocol::{BusylightSpec, StepField, USER_STEPS};
use busylight_hid_transport::BusylightModel;
use colored::*;
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::DeviceNotFound(_)) => "device_not_found",
        Some(CliError::ValidationError(_)) => "validation",
        Some(CliError::ChecksumMismatch { .. }) => "checksum_mismatch",
        Some(CliError::Protocol(_)) => "protocol",
        Some(CliError::Transport(_)) => "transport",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        Some(CliError::YamlError(_)) => "yaml",
        None => "unknown",
    }
}

fn spec_json(spec: &BusylightSpec) -> serde_json::Value {
    let steps: Vec<String> = spec.steps().iter().map(|step| step.hex_dump()).collect();
    let fields: Vec<serde_json::Map<String, serde_json::Value>> = spec
        .steps()
        .iter()
        .take(USER_STEPS)
        .map(|step| {
            StepField::ALL
                .iter()
                .map(|&field| (field.name().to_string(), json!(step.field(field).value())))
                .collect()
        })
        .collect();
    json!({
        "checksum": format!("{:#06X}", spec.checksum()),
        "steps": steps,
        "fields": fields,
        "bytes": spec.to_bytes().to_vec(),
    })
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format output as JSON: {}", e),
    }
}

/// Print an assembled buffer, one step per line.
pub fn print_spec(spec: &BusylightSpec, json: bool) {
    if json {
        let mut output = spec_json(spec);
        output["success"] = json!(true);
        print_json(&output);
    } else {
        println!("{}", spec.hex_dump());
        println!(
            "{} {}",
            "checksum:".dimmed(),
            format!("{:#06X}", spec.checksum()).bold()
        );
    }
}

/// Report a buffer delivered to a device.
pub fn print_sent(spec: &BusylightSpec, model: BusylightModel, ids: (u16, u16), json: bool) {
    let (vendor_id, product_id) = ids;
    if json {
        let mut output = spec_json(spec);
        output["success"] = json!(true);
        output["device"] = json!({
            "model": model.display_name(),
            "vendor_id": format!("0x{vendor_id:04X}"),
            "product_id": format!("0x{product_id:04X}"),
        });
        print_json(&output);
    } else {
        println!(
            "{} Sent {} bytes to {} ({})",
            "✓".green(),
            spec.to_bytes().len(),
            model.display_name().bold(),
            format!("0x{vendor_id:04X}:0x{product_id:04X}").dimmed()
        );
    }
}

/// Report a buffer whose checksum matched.
pub fn print_verified(checksum: u16, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "valid": true,
            "checksum": format!("{:#06X}", checksum),
        }));
    } else {
        println!(
            "{} Checksum valid ({})",
            "✓".green(),
            format!("{:#06X}", checksum).bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn spec_json_lists_every_step() -> TestResult {
        let spec = BusylightSpec::builder().build()?;
        let value = spec_json(&spec);
        assert_eq!(value["checksum"], "0x0416");
        assert_eq!(value["steps"].as_array().map(Vec::len), Some(8));
        assert_eq!(value["bytes"].as_array().map(Vec::len), Some(64));
        assert_eq!(value["steps"][7], "00 1F FA FF FF FF 04 16");
        assert_eq!(value["fields"].as_array().map(Vec::len), Some(7));
        Ok(())
    }

    #[test]
    fn spec_json_labels_step_fields() -> TestResult {
        let spec = crate::pattern::Pattern::demo().to_spec()?;
        let value = spec_json(&spec);
        let first = &value["fields"][0];
        assert_eq!(first["command"], 0x11);
        assert_eq!(first["repeat"], 3);
        assert_eq!(first["blue"], 20);
        assert_eq!(first["on_time"], 5);
        assert_eq!(first["tone"], 0x80);
        assert_eq!(value["fields"][2]["tone"], 0xEF);
        Ok(())
    }

    #[test]
    fn error_type_names_follow_cli_errors() {
        let err = Error::new(CliError::ValidationError("bad".to_string()));
        assert_eq!(error_type_name(&err), "validation");
        let err = anyhow::anyhow!("plain");
        assert_eq!(error_type_name(&err), "unknown");
    }
}
