// src/models/proveedor.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proveedor {
    pub id: Uuid,

    #[schema(example = "Distribuidora San Jorge")]
    pub nombre: String,

    #[schema(example = "20123456789")]
    pub ruc: Option<String>,

    pub telefono: Option<String>,

    pub fecha_creacion: DateTime<Utc>,
}
