use std::path::Path;

use anyhow::{Context, Result};

use super::model::{CellValue, RawTables, Table};
use crate::config::{DataSources, DecimalSeparator, TableSource, TextEncoding};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load all five tables from `data_dir`.
pub fn load_tables(data_dir: &Path, sources: &DataSources) -> Result<RawTables> {
    Ok(RawTables {
        robbery: load_table(data_dir, "robbery", &sources.robbery)?,
        population: load_table(data_dir, "population", &sources.population)?,
        salary: load_table(data_dir, "salary", &sources.salary)?,
        age_brackets: load_table(data_dir, "age_brackets", &sources.age_brackets)?,
        property: load_table(data_dir, "property", &sources.property)?,
    })
}

/// Load a single table described by `source`.
pub fn load_table(data_dir: &Path, name: &str, source: &TableSource) -> Result<Table> {
    let path = data_dir.join(&source.file);
    if !path.exists() {
        return Err(DataError::MissingTable {
            table: name.to_string(),
            path,
        }
        .into());
    }

    let bytes = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode(&bytes, source.encoding)
        .with_context(|| format!("decoding {}", path.display()))?;
    let table = parse_csv(name, &text, source)
        .with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "Loaded table '{name}' from {}: {} rows, columns {:?}",
        path.display(),
        table.len(),
        table.columns
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            String::from_utf8(bytes.to_vec()).context("file is not valid UTF-8")
        }
        // Latin-1 maps every byte to the code point of the same value.
        TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse decoded CSV text. The header row names the columns; cells are kept
/// verbatim apart from numeric inference.
pub fn parse_csv(name: &str, text: &str, source: &TableSource) -> Result<Table> {
    let delimiter = u8::try_from(source.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("delimiter {:?} is not a single ASCII byte", source.delimiter))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::None)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            record
                .iter()
                .map(|cell| parse_cell(cell, source.decimal))
                .collect(),
        );
    }

    Ok(Table::new(name, columns, rows))
}

fn parse_cell(raw: &str, decimal: DecimalSeparator) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    let numeric = match decimal {
        DecimalSeparator::Dot => trimmed.parse::<f64>(),
        DecimalSeparator::Comma => trimmed.replace(',', ".").parse::<f64>(),
    };
    match numeric {
        Ok(v) if v.is_finite() => CellValue::Number(v),
        _ => CellValue::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_decimal_comma() {
        assert_eq!(parse_cell("12,5", DecimalSeparator::Comma), CellValue::Number(12.5));
        assert_eq!(parse_cell("12.5", DecimalSeparator::Dot), CellValue::Number(12.5));
        assert_eq!(
            parse_cell("12,5", DecimalSeparator::Dot),
            CellValue::Text("12,5".into())
        );
        assert_eq!(parse_cell("", DecimalSeparator::Dot), CellValue::Null);
    }

    #[test]
    fn test_parse_cell_keeps_padding_on_text() {
        assert_eq!(
            parse_cell(" Bangu ", DecimalSeparator::Dot),
            CellValue::Text(" Bangu ".into())
        );
        assert_eq!(parse_cell("NaN", DecimalSeparator::Dot), CellValue::Text("NaN".into()));
    }

    #[test]
    fn test_parse_semicolon_csv() {
        let source = DataSources::default().robbery;
        let table = parse_csv("robbery", "Bairros;Média\nBangu;120,4\nRealengo;88\n", &source).unwrap();
        assert_eq!(table.columns, vec!["Bairros", "Média"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.text(0, 0), Some("Bangu"));
        assert_eq!(table.number(0, 1).unwrap(), 120.4);
    }

    #[test]
    fn test_decode_latin1() {
        let bytes = b"Jacarepagu\xe1";
        assert_eq!(decode(bytes, TextEncoding::Latin1).unwrap(), "Jacarepaguá");
        assert!(decode(bytes, TextEncoding::Utf8).is_err());
    }

    #[test]
    fn test_decode_strips_bom() {
        let bytes = b"\xEF\xBB\xBFbairro";
        assert_eq!(decode(bytes, TextEncoding::Utf8).unwrap(), "bairro");
    }

    #[test]
    fn test_load_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path(), "salary", &DataSources::default().salary).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingTable { .. })
        ));
    }

    #[test]
    fn test_load_tables_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DataSources::default();
        let write = |file: &str, bytes: &[u8]| std::fs::write(dir.path().join(file), bytes).unwrap();

        write(&sources.robbery.file, "Bairros;Média\nBangu;10,5\n".as_bytes());
        write(&sources.population.file, b"bairro,Homens/2022,Mulheres/2022\nBangu,1,2\n");
        write(&sources.salary.file, "bairro;valor médio\nBangu;2500,75\n".as_bytes());
        write(&sources.age_brackets.file, b"bairro;Sexo masculino, 15 a 19 anos\nJacarepagu\xe1;7\n");
        write(&sources.property.file, "bairro,uso,média_valor_imóvel\n Bangu ,NAO RESIDENCIAL,100\n".as_bytes());

        let tables = load_tables(dir.path(), &sources).unwrap();
        assert_eq!(tables.robbery.number(0, 1).unwrap(), 10.5);
        assert_eq!(tables.salary.number(0, 1).unwrap(), 2500.75);
        assert_eq!(tables.age_brackets.text(0, 0), Some("Jacarepaguá"));
        assert_eq!(tables.age_brackets.columns[1], "Sexo masculino, 15 a 19 anos");
        assert_eq!(tables.property.text(0, 0), Some(" Bangu "));
    }
}
