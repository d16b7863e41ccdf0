use std::collections::HashSet;
use std::path::Path;

use crate::data::dataset::TabularDataset;
use crate::error::{AppError, Result};

pub const DEFAULT_DELIMITER: u8 = b';';

/// Load a delimited text file. The first record is the header row.
pub fn load(path: &Path, delimiter: u8) -> Result<TabularDataset> {
    let content = std::fs::read(path)
        .map_err(|e| AppError::load(format!("Cannot read {}: {e}", path.display())))?;
    parse(&decode(content), delimiter)
}

/// Parse already-decoded text into a dataset.
pub fn parse(text: &str, delimiter: u8) -> Result<TabularDataset> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(AppError::load("File is empty"));
    }
    check_quotes(text, delimiter)?;

    // Strict width: a row with a different field count than the header is an error.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(false)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(|e| AppError::load(format!("Malformed header: {e}")))?,
        None => return Err(AppError::load("No header row found")),
    };
    let columns = unique_headers(header.iter().map(str::to_string).collect());

    let mut rows = Vec::new();
    for result in records {
        let record = result.map_err(|e| AppError::load(describe_csv_error(&e)))?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(TabularDataset::new(columns, rows))
}

/// The csv reader accepts a quoted field that is still open at end of input,
/// swallowing every following line into one cell. Reject that up front.
fn check_quotes(text: &str, delimiter: u8) -> Result<()> {
    let bytes = text.as_bytes();
    let mut line = 1usize;
    let mut field_start = true;
    let mut open_line: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\n' {
            line += 1;
        }
        match open_line {
            Some(_) if b == b'"' => {
                // A doubled quote is an escaped quote inside the field.
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    open_line = None;
                }
            }
            Some(_) => {}
            None if field_start && b == b'"' => {
                open_line = Some(line);
                field_start = false;
            }
            None => field_start = b == delimiter || b == b'\n' || b == b'\r',
        }
        i += 1;
    }

    match open_line {
        Some(line) => Err(AppError::load(format!(
            "Unterminated quoted field on line {line}"
        ))),
        None => Ok(()),
    }
}

/// UTF-8 when valid, otherwise every byte is taken as its Latin-1 code point.
fn decode(content: Vec<u8>) -> String {
    match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

fn describe_csv_error(e: &csv::Error) -> String {
    match e.kind() {
        csv::ErrorKind::UnequalLengths { pos, expected_len, len } => {
            let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
            format!("Line {line} has {len} fields, expected {expected_len}")
        }
        _ => format!("Malformed row: {e}"),
    }
}

/// Blank header cells become `Unnamed: <i>`; repeats get `.1`, `.2`, ... suffixes.
pub fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(raw.len());

    for (i, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        columns.push(candidate);
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_csv(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_header_and_rows_in_order() {
        let file = write_csv(b"a;b;c\n1;2;3\n4;5;6\n");
        let ds = load(file.path(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(ds.columns(), &["a", "b", "c"]);
        assert_eq!(
            ds.rows(),
            &[
                vec!["1".to_string(), "2".into(), "3".into()],
                vec!["4".to_string(), "5".into(), "6".into()],
            ]
        );
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load(Path::new("/definitely/not/here.csv"), DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, AppError::Load { .. }));
    }

    #[test]
    fn empty_file_is_a_load_error() {
        let file = write_csv(b"");
        assert_eq!(
            load(file.path(), DEFAULT_DELIMITER),
            Err(AppError::load("File is empty"))
        );
        let blank = write_csv(b"  \n\n");
        assert!(load(blank.path(), DEFAULT_DELIMITER).is_err());
    }

    #[test]
    fn column_count_mismatch_is_a_load_error() {
        let err = parse("a;b\n1;2\n3;4;5\n", b';').unwrap_err();
        match err {
            AppError::Load { reason } => assert!(reason.contains("expected 2"), "{reason}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_quote_is_a_load_error() {
        assert_eq!(
            parse("a;b\n1;\"2\n3;4\n", b';'),
            Err(AppError::load("Unterminated quoted field on line 2"))
        );
        assert_eq!(
            parse("a\n\"x\n", b';'),
            Err(AppError::load("Unterminated quoted field on line 2"))
        );
    }

    #[test]
    fn closed_quotes_may_span_lines_and_escape_quotes() {
        let ds = parse("a;b\n\"multi\nline\";\"say \"\"hi\"\"\"\n", b';').unwrap();
        assert_eq!(ds.cell(0, "a"), Some("multi\nline"));
        assert_eq!(ds.cell(0, "b"), Some("say \"hi\""));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let ds = parse("a;b\n", b';').unwrap();
        assert_eq!(ds.column_count(), 2);
        assert!(ds.is_empty());
    }

    #[test]
    fn quoted_fields_keep_delimiters() {
        let ds = parse("name;note\n\"x;y\";ok\n", b';').unwrap();
        assert_eq!(ds.cell(0, "name"), Some("x;y"));
    }

    #[test]
    fn latin1_bytes_are_decoded() {
        let file = write_csv(b"name;city\nJos\xe9;K\xf6ln\n");
        let ds = load(file.path(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(ds.cell(0, "name"), Some("José"));
        assert_eq!(ds.cell(0, "city"), Some("Köln"));
    }

    #[test]
    fn byte_order_mark_is_not_part_of_the_first_header() {
        let ds = parse("\u{feff}a;b\n1;2\n", b';').unwrap();
        assert_eq!(ds.columns(), &["a", "b"]);
    }

    #[test]
    fn headers_are_made_unique() {
        let cols = unique_headers(vec![
            "a".into(),
            "".into(),
            "a".into(),
            "a.1".into(),
            "a".into(),
        ]);
        assert_eq!(cols, vec!["a", "Unnamed: 1", "a.1", "a.1.1", "a.2"]);
    }
}
