use chrono::Utc;
use sqlx::PgPool;

use crate::domain::import::{self, ImportError, ImportSummary, RowError, RowSuccess};
use crate::errors::ApiError;
use crate::services::StudentService;

/// Canonical template served to admins preparing an import sheet.
const TEMPLATE_HEADER: &str = "Nome,Data Nascimento,Tipo,Nome Responsável,Contato,\
Data Matrícula,Status,Graduação,Modalidade,Peso,Altura,Observações";
const TEMPLATE_EXAMPLE: &str = "João Silva,15/03/2010,Criança,Maria Silva,(11) 99999-9999,\
01/01/2024,Ativo,Branca,Judô Infantil,35.5,140,Aluno dedicado";

#[derive(Clone)]
pub struct ImportService {
    db: PgPool,
}

impl ImportService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Normalize an uploaded sheet and persist the valid rows. Row
    /// failures (validation or storage) land in the error ledger without
    /// affecting the other rows.
    pub async fn import_students(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<ImportSummary, ApiError> {
        let today = Utc::now().date_naive();
        let batch = import::normalize_batch(bytes, filename, today).map_err(|err| match err {
            ImportError::Csv(csv_err) => {
                ApiError::validation(format!("Could not read the file: {csv_err}"))
            }
            other => ApiError::validation(other.to_string()),
        })?;

        let students = StudentService::new(self.db.clone());
        let mut imported = Vec::new();
        let mut errors = batch.errors;

        for (row, record) in batch.rows {
            match students.insert(&record, today).await {
                Ok(_) => imported.push(RowSuccess {
                    row,
                    name: record.full_name.clone(),
                }),
                Err(err) => {
                    tracing::warn!(row, error = %err, "import row failed to persist");
                    errors.push(RowError {
                        row,
                        name: record.full_name.clone(),
                        error: "Could not save row".to_string(),
                    });
                }
            }
        }

        errors.sort_by_key(|e| e.row);

        tracing::info!(
            total = batch.total,
            succeeded = imported.len(),
            failed = errors.len(),
            "student import finished"
        );

        Ok(ImportSummary::new(batch.total, imported, errors))
    }

    pub fn template_csv(&self) -> String {
        format!("{TEMPLATE_HEADER}\n{TEMPLATE_EXAMPLE}\n")
    }
}
