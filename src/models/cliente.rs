// src/models/cliente.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Registro puro, sin estado derivado. La deuda de un cliente se calcula
// siempre a partir de sus ventas impagas (ver models/deuda.rs).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,

    #[schema(example = "María Quispe")]
    pub nombre: String,

    #[schema(example = "maria@example.com")]
    pub correo: Option<String>,

    #[schema(example = "+51 999 888 777")]
    pub telefono: Option<String>,

    pub fecha_creacion: DateTime<Utc>,
}
