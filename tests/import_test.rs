use assert_matches::assert_matches;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use dojo_admin::domain::import::{normalize_batch, ImportError, ImportSummary, RowSuccess};
use dojo_admin::models::{StudentCategory, StudentStatus};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
}

#[test]
fn full_sheet_with_synonym_headers() {
    let csv = "Nome Completo,Data de Nascimento,Tipo,Responsável,Telefone,Data Matricula,\
               Situação,Faixa Atual,Modalidade,Peso (kg),Altura (cm),Obs\n\
               João Silva,15/03/2010,Criança,Maria Silva,(11) 99999-9999,01/01/2024,\
               Ativo,Branca,Judô Infantil,35.5,140,Aluno dedicado\n";

    let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();
    assert_eq!(batch.total, 1);
    assert!(batch.errors.is_empty());

    let (row, student) = &batch.rows[0];
    assert_eq!(*row, 2);
    assert_eq!(student.full_name, "João Silva");
    assert_eq!(student.category, StudentCategory::Child);
    assert_eq!(student.birth_date, NaiveDate::from_ymd_opt(2010, 3, 15));
    assert_eq!(student.guardian_name.as_deref(), Some("Maria Silva"));
    assert_eq!(student.contact.as_deref(), Some("(11) 99999-9999"));
    assert_eq!(
        student.enrollment_date,
        NaiveDate::from_ymd_opt(2024, 1, 1)
    );
    assert_eq!(student.status, Some(StudentStatus::Active));
    assert_eq!(student.current_rank.as_deref(), Some("Branca"));
    assert_eq!(student.modality.as_deref(), Some("Judô Infantil"));
    assert_eq!(student.weight_kg, Some(35.5));
    assert_eq!(student.height, Some(1.40));
    assert_eq!(student.notes.as_deref(), Some("Aluno dedicado"));
    assert!(!student.eligible_to_promote);
    assert_eq!(student.target_rank, None);
}

#[test]
fn blank_name_errors_do_not_abort_following_rows() {
    let csv = "Nome,Peso\n,40\nnan,41\nMaria,50\n";
    let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();

    assert_eq!(batch.total, 3);
    assert_eq!(batch.errors.len(), 2);
    assert_eq!(batch.errors[0].row, 2);
    assert_eq!(batch.errors[0].error, "Name cannot be empty");
    assert_eq!(batch.errors[1].row, 3);

    assert_eq!(batch.rows.len(), 1);
    assert_eq!(batch.rows[0].0, 4);
    assert_eq!(batch.rows[0].1.full_name, "Maria");
}

#[test]
fn missing_name_header_aborts_before_any_row() {
    let csv = "Faixa,Peso\nAzul,42\nVerde,50\n";
    let err = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap_err();
    assert_matches!(err, ImportError::MissingNameColumn);
}

#[test]
fn non_csv_extension_rejected() {
    let err = normalize_batch(b"x", "alunos.xlsx", today()).unwrap_err();
    assert_matches!(err, ImportError::UnsupportedFormat);

    let err = normalize_batch(b"x", "alunos.xls", today()).unwrap_err();
    assert_matches!(err, ImportError::UnsupportedFormat);
}

#[test]
fn category_adult_substring_case_insensitive() {
    let csv = "Nome,Categoria\nA,ADULTO\nB,adulto\nC,Criança\nD,\n";
    let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();

    let categories: Vec<StudentCategory> =
        batch.rows.iter().map(|(_, s)| s.category).collect();
    assert_eq!(
        categories,
        vec![
            StudentCategory::Adult,
            StudentCategory::Adult,
            StudentCategory::Child,
            StudentCategory::Child,
        ]
    );
}

#[test]
fn unparseable_birth_date_left_absent() {
    let csv = "Nome,Nascimento\nA,03-2010-15\n";
    let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();
    assert_eq!(batch.rows[0].1.birth_date, None);
    assert!(batch.errors.is_empty());
}

#[test]
fn invalid_rank_defaults_to_lowest() {
    let csv = "Nome,Graduacao\nA,preta\nB,Preta\nC,Vermelha\n";
    let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();

    let ranks: Vec<&str> = batch
        .rows
        .iter()
        .map(|(_, s)| s.current_rank.as_deref().unwrap())
        .collect();
    // Matching is case-sensitive against the chain
    assert_eq!(ranks, vec!["Branca", "Preta", "Branca"]);
}

#[test]
fn numeric_coercion_failures_degrade_to_absent() {
    let csv = "Nome,Peso,Altura\nA,heavy,tall\n";
    let batch = normalize_batch(csv.as_bytes(), "alunos.csv", today()).unwrap();

    let student = &batch.rows[0].1;
    assert_eq!(student.weight_kg, None);
    assert_eq!(student.height, None);
    assert!(batch.errors.is_empty());
}

#[test]
fn summary_counts_and_message() {
    let summary = ImportSummary::new(
        2,
        vec![RowSuccess {
            row: 2,
            name: "Maria".into(),
        }],
        vec![],
    );
    assert_eq!(summary.total, 2);
    assert_eq!(summary.message, "Import finished: 1 succeeded, 0 failed");
}
