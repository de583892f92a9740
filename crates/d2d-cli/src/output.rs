//! Rendering of resolved inventories

use clap::ValueEnum;
use d2d_inventory::Resolution;

/// Output format for `resolve`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Connection records as a JSON array
    #[default]
    Json,
    /// Human readable table, credentials omitted
    Table,
}

/// Render the resolved records in `format`
///
/// # Errors
/// Returns error if JSON serialization fails
pub fn render(resolution: &Resolution, format: Format) -> eyre::Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&resolution.devices)?),
        Format::Table => Ok(table(resolution)),
    }
}

fn table(resolution: &Resolution) -> String {
    const HEADERS: [&str; 4] = ["DEVICE ID", "HOSTNAME", "HOST", "OS"];

    let rows: Vec<[&str; 4]> = resolution
        .devices
        .iter()
        .map(|d| {
            [
                d.device_id.as_str(),
                d.hostname.as_str(),
                d.host.as_str(),
                d.os.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: &[&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&HEADERS)];
    out.extend(rows.iter().map(line));

    if !resolution.skipped.is_empty() {
        out.push(String::new());
        out.push("SKIPPED".to_string());
        out.extend(
            resolution
                .skipped
                .iter()
                .map(|s| format!("{}: {}", s.device_id, s.reason)),
        );
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use d2d_inventory::{CredentialPair, DeviceRecord, SkipRecord};

    use super::*;

    fn sample() -> Resolution {
        let mut record = DeviceRecord::new("switch1", "10.0.0.1", "iosxe", "switch1");
        record.set_credentials(&CredentialPair::new("admin", "secret"));

        Resolution {
            devices: vec![record],
            skipped: vec![SkipRecord::new("router9", "Router missing 'chassis_id' field")],
        }
    }

    #[test]
    fn test_render_json() {
        let out = render(&sample(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["hostname"], "switch1");
        assert_eq!(value[0]["password"], "secret");
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_render_table() {
        let out = render(&sample(), Format::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "DEVICE ID  HOSTNAME  HOST      OS");
        assert_eq!(lines[1], "switch1    switch1   10.0.0.1  iosxe");
        assert_eq!(lines[3], "SKIPPED");
        assert_eq!(lines[4], "router9: Router missing 'chassis_id' field");
        assert!(!out.contains("secret"));
    }
}
