// src/handlers/clientes.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::cliente::Cliente};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearClientePayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,

    #[validate(email(message = "El correo no es válido."))]
    pub correo: Option<String>,

    pub telefono: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditarClientePayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre: Option<String>,

    #[validate(email(message = "El correo no es válido."))]
    pub correo: Option<String>,

    pub telefono: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = CrearClientePayload,
    responses(
        (status = 201, description = "Cliente creado", body = Cliente),
        (status = 400, description = "Campos inválidos"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .clientes_service
        .crear_cliente(
            &app_state.db_pool,
            &payload.nombre,
            payload.correo.as_deref(),
            payload.telefono.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    responses(
        (status = 200, description = "Todos los clientes registrados", body = Vec<Cliente>),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.clientes_service.listar(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(clientes)))
}

#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID del cliente")),
    responses(
        (status = 200, description = "Cliente", body = Cliente),
        (status = 404, description = "Cliente no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obtener_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state.clientes_service.obtener(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(cliente)))
}

#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    request_body = EditarClientePayload,
    params(("id" = Uuid, Path, description = "ID del cliente")),
    responses(
        (status = 200, description = "Cliente actualizado", body = Cliente),
        (status = 404, description = "Cliente no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn editar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .clientes_service
        .editar_cliente(
            &app_state.db_pool,
            id,
            payload.nombre.as_deref(),
            payload.correo.as_deref(),
            payload.telefono.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(cliente)))
}

#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID del cliente")),
    responses(
        (status = 204, description = "Cliente eliminado"),
        (status = 404, description = "Cliente no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .clientes_service
        .eliminar_cliente(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
