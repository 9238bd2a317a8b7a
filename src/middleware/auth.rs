// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::{common::error::AppError, config::AppState};

// Claims mínimos del token que emite el proveedor de identidad externo.
// Este backend no registra usuarios ni guarda credenciales: solo valida la
// firma y la vigencia del token que le llega.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub correo: Option<String>,
    pub exp: usize,
}

// El middleware en sí
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let datos = decode::<Claims>(
                token,
                &DecodingKey::from_secret(app_state.jwt_secret.as_ref()),
                &Validation::default(),
            )
            .map_err(|_| AppError::InvalidToken)?;

            // Inserta los claims en las "extensions" de la petición
            request.extensions_mut().insert(datos.claims);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::InvalidToken)
}

// Extractor para obtener al usuario autenticado directamente en los handlers
pub struct UsuarioAutenticado(pub Claims);

impl<S> FromRequestParts<S> for UsuarioAutenticado
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(UsuarioAutenticado)
            .ok_or(AppError::InvalidToken)
    }
}
