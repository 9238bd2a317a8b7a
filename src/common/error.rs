use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0} no encontrado: {1}")]
    NotFound(&'static str, Uuid),

    #[error("Stock insuficiente para '{nombre}'")]
    StockInsuficiente {
        nombre: String,
        solicitado: Decimal,
        disponible: i32,
    },

    // Una venta fiada (Pendiente/Parcial) sin cliente identificado no existe.
    #[error("Una venta a crédito requiere un cliente identificado")]
    CreditoSinCliente,

    #[error("El monto del pago debe ser mayor que cero")]
    MontoPagoInvalido,

    #[error("El adelanto debe ser mayor que cero y menor que el total")]
    AdelantoInvalido,

    #[error("Cantidad inválida para '{0}': se vende en unidades enteras")]
    CantidadInvalida(String),

    #[error("La categoría '{0}' lleva control de unidades y requiere stock")]
    StockRequerido(String),

    #[error("Agregado desconocido: {0}")]
    AgregadoDesconocido(String),

    #[error("Token inválido")]
    InvalidToken,

    // Variante para errores de base de datos (sqlx)
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolvemos todos los detalles de la validación, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::NotFound(entidad, id) => {
                let body = Json(json!({
                    "error": format!("{} no encontrado.", entidad),
                    "id": id,
                }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            // 409: el recurso (stock) no alcanza; el cliente puede corregir la cantidad.
            AppError::StockInsuficiente { nombre, solicitado, disponible } => {
                let body = Json(json!({
                    "error": format!("Stock insuficiente para '{}'.", nombre),
                    "solicitado": solicitado,
                    "disponible": disponible,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::CreditoSinCliente => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Una venta a crédito requiere un cliente identificado.".to_string(),
            ),
            AppError::MontoPagoInvalido => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "El monto del pago debe ser mayor que cero.".to_string(),
            ),
            AppError::AdelantoInvalido => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "El adelanto debe ser mayor que cero y menor que el total.".to_string(),
            ),
            AppError::CantidadInvalida(nombre) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("'{}' se vende en unidades enteras.", nombre),
            ),
            AppError::StockRequerido(categoria) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("La categoría '{}' requiere un stock inicial.", categoria),
            ),
            AppError::AgregadoDesconocido(nombre) => (
                StatusCode::NOT_FOUND,
                format!("Agregado desconocido: '{}'.", nombre),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.".to_string(),
            ),
            AppError::JwtError(_) => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.".to_string(),
            ),

            // Todo lo demás (DatabaseError, InternalServerError) es un 500.
            // `tracing` registra el mensaje detallado que `thiserror` nos dio.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.".to_string(),
                )
            }
        };

        // Respuesta estándar para errores simples que solo tienen un mensaje.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
