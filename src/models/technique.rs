use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Technique kinds offered in the library form dropdown.
pub const TECHNIQUE_KINDS: [&str; 10] = [
    "Queda (Nage-waza)",
    "Imobilização (Katame-waza)",
    "Golpe no Pescoço (Shime-waza)",
    "Luxação (Kansetsu-waza)",
    "Técnica de Chão (Ne-waza)",
    "Técnica em Pé (Tachi-waza)",
    "Projeção (Tsurikomi)",
    "Rasteira (Ashi-waza)",
    "Sacrifício (Sutemi-waza)",
    "Outro",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechniqueEntry {
    pub id: Uuid,
    pub title: String,
    pub technique_kind: String,
    pub min_rank: Option<String>,
    pub modality: Option<String>,
    pub video_url: Option<String>,
    pub photo_url: Option<String>,
    pub instructions: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertTechnique {
    pub title: String,
    pub technique_kind: String,
    pub min_rank: Option<String>,
    pub modality: Option<String>,
    pub video_url: Option<String>,
    pub photo_url: Option<String>,
    pub instructions: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TechniqueQuery {
    pub min_rank: Option<String>,
    pub modality: Option<String>,
    pub technique_kind: Option<String>,
}
