//! Spreadsheet import normalization.
//!
//! Turns an uploaded CSV of arbitrary column naming and encoding into
//! validated student insert records plus a per-row outcome ledger. Header
//! names are matched against a fixed synonym table; each row is coerced
//! independently, so one bad row never aborts the batch. Only the name
//! column is mandatory — a file without one is rejected before any row is
//! processed.

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Serialize;
use thiserror::Error;

use crate::domain::belts;
use crate::domain::derivation::height_in_meters;
use crate::models::{NewStudent, StudentCategory, StudentStatus};

/// Date layouts tried in order; first match wins.
pub const DATE_PATTERNS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];

const NAME_SYNONYMS: &[&str] = &["nome", "nome completo", "nome_completo", "nomecompleto"];
const BIRTH_DATE_SYNONYMS: &[&str] = &[
    "data nascimento",
    "data_nascimento",
    "datanascimento",
    "nascimento",
    "data de nascimento",
];
const CATEGORY_SYNONYMS: &[&str] = &["tipo", "categoria", "categoria_aluno"];
const GUARDIAN_SYNONYMS: &[&str] = &[
    "responsavel",
    "nome responsavel",
    "nome_responsavel",
    "responsável",
];
const CONTACT_SYNONYMS: &[&str] = &["contato", "telefone", "whatsapp", "celular"];
const ENROLLMENT_DATE_SYNONYMS: &[&str] = &[
    "data matricula",
    "data_matricula",
    "matricula",
    "data de matrícula",
];
const STATUS_SYNONYMS: &[&str] = &["status", "situacao", "situação"];
const RANK_SYNONYMS: &[&str] = &[
    "graduacao",
    "graduação",
    "graduacao_atual",
    "faixa",
    "faixa atual",
];
const MODALITY_SYNONYMS: &[&str] = &["modalidade"];
const WEIGHT_SYNONYMS: &[&str] = &["peso", "peso (kg)", "peso_kg"];
const HEIGHT_SYNONYMS: &[&str] = &["altura", "altura (cm)", "altura_cm"];
const NOTES_SYNONYMS: &[&str] = &["observacoes", "observações", "obs", "observacao"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported file format. Upload a .csv file")]
    UnsupportedFormat,
    #[error("No name column found in the spreadsheet")]
    MissingNameColumn,
    #[error("Could not read the file: {0}")]
    Csv(#[from] csv::Error),
}

/// Resolved position of each canonical field in the uploaded sheet.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub name: usize,
    pub birth_date: Option<usize>,
    pub category: Option<usize>,
    pub guardian_name: Option<usize>,
    pub contact: Option<usize>,
    pub enrollment_date: Option<usize>,
    pub status: Option<usize>,
    pub rank: Option<usize>,
    pub modality: Option<usize>,
    pub weight: Option<usize>,
    pub height: Option<usize>,
    pub notes: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowSuccess {
    pub row: usize,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub row: usize,
    pub name: String,
    pub error: String,
}

/// Batch outcome before persistence: validated records keyed by their
/// sheet row number, plus the errors collected along the way.
#[derive(Debug)]
pub struct NormalizedImport {
    pub total: usize,
    pub rows: Vec<(usize, NewStudent)>,
    pub errors: Vec<RowError>,
}

/// Final import response: the ledger plus a one-line human summary.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub imported: Vec<RowSuccess>,
    pub errors: Vec<RowError>,
    pub message: String,
}

impl ImportSummary {
    pub fn new(total: usize, imported: Vec<RowSuccess>, errors: Vec<RowError>) -> Self {
        let message = format!(
            "Import finished: {} succeeded, {} failed",
            imported.len(),
            errors.len()
        );
        Self {
            total,
            imported,
            errors,
            message,
        }
    }
}

fn find_column(headers: &[String], synonyms: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| synonyms.contains(&h.as_str()))
}

/// Maps trimmed, lowercased header names onto canonical fields. The first
/// matching column wins. Fails when no name-like header exists.
pub fn resolve_columns(raw_headers: &StringRecord) -> Result<ColumnMap, ImportError> {
    let headers: Vec<String> = raw_headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let name = find_column(&headers, NAME_SYNONYMS).ok_or(ImportError::MissingNameColumn)?;

    Ok(ColumnMap {
        name,
        birth_date: find_column(&headers, BIRTH_DATE_SYNONYMS),
        category: find_column(&headers, CATEGORY_SYNONYMS),
        guardian_name: find_column(&headers, GUARDIAN_SYNONYMS),
        contact: find_column(&headers, CONTACT_SYNONYMS),
        enrollment_date: find_column(&headers, ENROLLMENT_DATE_SYNONYMS),
        status: find_column(&headers, STATUS_SYNONYMS),
        rank: find_column(&headers, RANK_SYNONYMS),
        modality: find_column(&headers, MODALITY_SYNONYMS),
        weight: find_column(&headers, WEIGHT_SYNONYMS),
        height: find_column(&headers, HEIGHT_SYNONYMS),
        notes: find_column(&headers, NOTES_SYNONYMS),
    })
}

// Spreadsheet exports mark missing cells with "nan" or leave them blank.
fn cell<'a>(record: &'a StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = record.get(index?)?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value)
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(value, pattern).ok())
}

/// Coerces one data row into an insert record. Only the name can fail the
/// row; every other field degrades to its default or to absent.
pub fn normalize_row(
    map: &ColumnMap,
    record: &StringRecord,
    today: NaiveDate,
) -> Result<NewStudent, String> {
    let full_name = cell(record, Some(map.name))
        .map(str::to_owned)
        .ok_or_else(|| "Name cannot be empty".to_string())?;

    let category = match cell(record, map.category) {
        Some(value) if value.to_lowercase().contains("adult") => StudentCategory::Adult,
        _ => StudentCategory::Child,
    };

    let birth_date = cell(record, map.birth_date).and_then(parse_date);

    let enrollment_date = cell(record, map.enrollment_date)
        .and_then(parse_date)
        .unwrap_or(today);

    let status = match cell(record, map.status) {
        Some(value) if value.to_lowercase().contains("inactive") => StudentStatus::Inactive,
        _ => StudentStatus::Active,
    };

    let current_rank = cell(record, map.rank)
        .filter(|value| belts::is_valid_rank(value))
        .unwrap_or(belts::DEFAULT_RANK)
        .to_owned();

    let weight_kg = cell(record, map.weight).and_then(|v| v.parse::<f64>().ok());
    let height = cell(record, map.height)
        .and_then(|v| v.parse::<f64>().ok())
        .map(height_in_meters);

    Ok(NewStudent {
        full_name,
        category,
        birth_date,
        guardian_name: cell(record, map.guardian_name).map(str::to_owned),
        contact: cell(record, map.contact).map(str::to_owned),
        enrollment_date: Some(enrollment_date),
        status: Some(status),
        notes: cell(record, map.notes).map(str::to_owned),
        current_rank: Some(current_rank),
        modality: cell(record, map.modality).map(str::to_owned),
        eligible_to_promote: false,
        target_rank: None,
        weight_kg,
        height,
    })
}

/// CSV bytes arrive in whatever encoding the spreadsheet tool used; try
/// UTF-8 first and fall back to Latin-1.
pub fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Full normalization pipeline: decode, resolve headers, coerce each row
/// independently. Row numbers are sheet rows (header is row 1).
pub fn normalize_batch(
    bytes: &[u8],
    filename: &str,
    today: NaiveDate,
) -> Result<NormalizedImport, ImportError> {
    if !filename.to_lowercase().ends_with(".csv") {
        return Err(ImportError::UnsupportedFormat);
    }

    let text = decode_bytes(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let map = resolve_columns(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    let mut total = 0usize;

    for (index, result) in reader.records().enumerate() {
        let row = index + 2;
        total += 1;

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                errors.push(RowError {
                    row,
                    name: "unknown".to_string(),
                    error: err.to_string(),
                });
                continue;
            }
        };

        match normalize_row(&map, &record, today) {
            Ok(student) => rows.push((row, student)),
            Err(error) => errors.push(RowError {
                row,
                name: cell(&record, Some(map.name))
                    .unwrap_or("unknown")
                    .to_string(),
                error,
            }),
        }
    }

    Ok(NormalizedImport { total, rows, errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_header_synonyms_resolve() {
        let csv = "Nome Completo,Faixa,Peso (kg),Situação\nJoão,Azul,42,Ativo\n";
        let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();
        assert_eq!(batch.total, 1);
        assert_eq!(batch.errors.len(), 0);

        let (_, student) = &batch.rows[0];
        assert_eq!(student.full_name, "João");
        assert_eq!(student.current_rank.as_deref(), Some("Azul"));
        assert_eq!(student.weight_kg, Some(42.0));
    }

    #[test]
    fn test_missing_name_header_aborts() {
        let csv = "Faixa,Peso\nAzul,42\n";
        let err = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap_err();
        assert!(matches!(err, ImportError::MissingNameColumn));
    }

    #[test]
    fn test_non_csv_rejected() {
        let err = normalize_batch(b"whatever", "alunos.xlsx", today()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat));
    }

    #[test]
    fn test_blank_name_fails_only_that_row() {
        let csv = "Nome,Peso\n,40\nMaria,50\n";
        let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();

        assert_eq!(batch.total, 2);
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].row, 2);
        assert_eq!(batch.errors[0].name, "unknown");
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].0, 3);
        assert_eq!(batch.rows[0].1.full_name, "Maria");
    }

    #[test]
    fn test_date_patterns_first_match_wins() {
        assert_eq!(
            parse_date("15/03/2010"),
            NaiveDate::from_ymd_opt(2010, 3, 15)
        );
        assert_eq!(
            parse_date("2010-03-15"),
            NaiveDate::from_ymd_opt(2010, 3, 15)
        );
        assert_eq!(
            parse_date("15-03-2010"),
            NaiveDate::from_ymd_opt(2010, 3, 15)
        );
        assert_eq!(
            parse_date("2010/03/15"),
            NaiveDate::from_ymd_opt(2010, 3, 15)
        );
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_field_coercion_defaults() {
        let csv = "Nome,Tipo,Status,Graduação,Altura,Data Nascimento\n\
                   Pedro,Adulto,inativo,Verde,175,31/12/1999\n\
                   Lia,criança,ativo,roxa,1.40,bad-date\n";
        let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();
        assert_eq!(batch.errors.len(), 0);

        let pedro = &batch.rows[0].1;
        assert_eq!(pedro.category, StudentCategory::Adult);
        // "inativo" does not carry the "inactive" marker
        assert_eq!(pedro.status, Some(StudentStatus::Active));
        assert_eq!(pedro.current_rank.as_deref(), Some("Verde"));
        assert_eq!(pedro.height, Some(1.75));
        assert_eq!(pedro.birth_date, NaiveDate::from_ymd_opt(1999, 12, 31));

        let lia = &batch.rows[1].1;
        assert_eq!(lia.category, StudentCategory::Child);
        // rank match is case-sensitive; "roxa" falls back to the default
        assert_eq!(lia.current_rank.as_deref(), Some("Branca"));
        assert_eq!(lia.height, Some(1.40));
        assert_eq!(lia.birth_date, None);
    }

    #[test]
    fn test_inactive_status_marker() {
        let csv = "Nome,Status\nRui,Inactive\n";
        let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();
        assert_eq!(batch.rows[0].1.status, Some(StudentStatus::Inactive));
    }

    #[test]
    fn test_missing_enrollment_date_defaults_to_today() {
        let csv = "Nome,Data Matricula\nRui,nan\n";
        let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();
        assert_eq!(batch.rows[0].1.enrollment_date, Some(today()));
    }

    #[test]
    fn test_latin1_fallback() {
        // "José" encoded as Latin-1: é = 0xE9
        let mut bytes = b"Nome\nJos".to_vec();
        bytes.push(0xE9);
        bytes.push(b'\n');
        let batch = normalize_batch(&bytes, "alunos.csv", today()).unwrap();
        assert_eq!(batch.rows[0].1.full_name, "José");
    }

    #[test]
    fn test_summary_message() {
        let summary = ImportSummary::new(
            3,
            vec![
                RowSuccess { row: 2, name: "A".into() },
                RowSuccess { row: 3, name: "B".into() },
            ],
            vec![RowError {
                row: 4,
                name: "unknown".into(),
                error: "Name cannot be empty".into(),
            }],
        );
        assert_eq!(summary.message, "Import finished: 2 succeeded, 1 failed");
    }
}
