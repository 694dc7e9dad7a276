// Small dev utility: dump a facility spreadsheet as JSON rows on stdout.
//
// Usage:
//   cargo run --bin extract_facilities -- <spreadsheet path>
//
// This is intentionally lightweight and does not touch the data directory.

use std::path::PathBuf;

use war_room_data::importer::UniversalSpreadsheetParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let spreadsheet = args
        .next()
        .map(PathBuf::from)
        .ok_or("用法: extract_facilities <表格文件>")?;

    let rows = UniversalSpreadsheetParser.parse(&spreadsheet)?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    eprintln!("共 {} 行", rows.len());

    Ok(())
}
