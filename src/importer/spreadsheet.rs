// ==========================================
// War Room 工厂数据管线 - 表格解析器实现
// ==========================================
// 阶段 0: 提取 - 表格文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 按原始列顺序保留全部列的 JSON 行记录
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use serde_json::{Map, Value};
use std::fs::File;
use std::path::Path;

/// 原始行记录: 列名 -> JSON 值（保留列顺序，缺失单元格为 null）
pub type RawRow = Map<String, Value>;

/// 表格解析器接口
pub trait SpreadsheetParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl SpreadsheetParser for CsvParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;

            let mut row = blank_row(&headers);
            for (col_idx, raw) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if header.is_empty() {
                        continue;
                    }
                    let trimmed = raw.trim();
                    if !trimmed.is_empty() {
                        row.insert(header.clone(), Value::String(trimmed.to_string()));
                    }
                }
            }

            // 跳过完全空白的行
            if row.values().all(Value::is_null) {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl SpreadsheetParser for ExcelParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 Excel 文件
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row = blank_row(&headers);
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if header.is_empty() {
                        continue;
                    }
                    let value = cell_to_value(cell);
                    if !value.is_null() {
                        row.insert(header.clone(), value);
                    }
                }
            }

            // 跳过完全空白的行
            if row.values().all(Value::is_null) {
                continue;
            }

            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// 通用表格解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSpreadsheetParser;

impl UniversalSpreadsheetParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_rows(path),
            "xlsx" | "xls" => ExcelParser.parse_to_rows(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// 以全部表头初始化为 null 的空行
///
/// 保证每条记录携带全部原始列（缺失单元格为 null，而非缺失键）。
fn blank_row(headers: &[String]) -> RawRow {
    let mut row = RawRow::new();
    for header in headers {
        if !header.is_empty() {
            row.insert(header.clone(), Value::Null);
        }
    }
    row
}

/// Excel 单元格 -> JSON 值
///
/// 数值保持数值类型，空单元格与错误单元格为 null。
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::String(trimmed.to_string())
            }
        }
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => serde_json::Number::from_f64(dt.as_f64())
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = write_csv(&[
            "Company,Facility Type,City",
            "Nova Bus,Assembly,St. Eustache",
            "New Flyer,Assembly,Crookston",
        ]);

        let records = CsvParser.parse_to_rows(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("Company"),
            Some(&Value::String("Nova Bus".to_string()))
        );
        assert_eq!(
            records[1].get("City"),
            Some(&Value::String("Crookston".to_string()))
        );
    }

    #[test]
    fn test_csv_parser_missing_cells_become_null() {
        let temp_file = write_csv(&["Company,City,Notes", "Nova Bus,,", "TAM"]);

        let records = CsvParser.parse_to_rows(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        // 空单元格与缺失单元格都应为 null，且键存在
        assert_eq!(records[0].get("City"), Some(&Value::Null));
        assert_eq!(records[1].get("Notes"), Some(&Value::Null));
        // 列顺序保持原始顺序
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, vec!["Company", "City", "Notes"]);
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = write_csv(&["Company,City", "Nova Bus,St. Eustache", ",", "TAM,"]);

        let records = CsvParser.parse_to_rows(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_rows(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_unsupported_extension() {
        let result = UniversalSpreadsheetParser.parse(Path::new("data.txt"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
