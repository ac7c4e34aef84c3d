//! Plain-text report rendering.

use crate::structs::CanonicalMetadata;

const RULE_WIDTH: usize = 50;
pub const ADDRESS_NOT_FOUND: &str = "Address not found";
pub const METADATA_UNAVAILABLE: &str = "Could not extract metadata from this image.";

/// Message shown to the user when no report can be produced.
pub fn unavailable_message() -> &'static str {
    METADATA_UNAVAILABLE
}

/// Renders a record as a fixed-structure report.
///
/// The GPS block is written only when both coordinates are known; the
/// device block is always written. The output is fully determined by the
/// record.
pub fn format_report(metadata: &CanonicalMetadata) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![rule.clone(), "IMAGE INFORMATION".to_string(), rule.clone()];

    if let (Some(lat), Some(lon)) = (metadata.latitude, metadata.longitude) {
        lines.push("\n📍 GPS DATA:".to_string());
        lines.push(format!("  Latitude: {lat}°"));
        lines.push(format!("  Longitude: {lon}°"));
        lines.push(format!(
            "\n📌 Address: {}",
            metadata.address.as_deref().unwrap_or(ADDRESS_NOT_FOUND)
        ));
        if let Some(link) = &metadata.map_link {
            lines.push(format!("🌍 Google Maps: {link}"));
        }
    }

    lines.push("\n📱 DEVICE INFORMATION:".to_string());
    lines.push(format!("  Make: {}", metadata.make));
    lines.push(format!("  Model: {}", metadata.model));
    lines.push(format!("  Software: {}", metadata.software));
    lines.push(format!("  DateTime: {}", metadata.datetime));
    let extras = [
        ("HostComputer", metadata.host_computer.as_deref()),
        ("LensMake", metadata.lens_make.as_deref()),
        ("LensModel", metadata.lens_model.as_deref()),
    ];
    for (label, value) in extras {
        if let Some(value) = value {
            lines.push(format!("  {label}: {value}"));
        }
    }
    if let Some((width, height)) = metadata.pixel_dimensions {
        lines.push(format!("  Dimensions: {width}x{height}"));
    }

    lines.push(rule);
    lines.join("\n")
}
