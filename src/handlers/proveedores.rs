// src/handlers/proveedores.rs

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

use crate::{common::error::AppError, config::AppState, models::proveedor::Proveedor};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearProveedorPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,

    pub ruc: Option<String>,
    pub telefono: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditarProveedorPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre: Option<String>,

    pub ruc: Option<String>,
    pub telefono: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/proveedores",
    tag = "Proveedores",
    request_body = CrearProveedorPayload,
    responses(
        (status = 201, description = "Proveedor creado", body = Proveedor),
        (status = 400, description = "Campos inválidos"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_proveedor(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearProveedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let proveedor = app_state
        .proveedores_service
        .crear_proveedor(
            &app_state.db_pool,
            &payload.nombre,
            payload.ruc.as_deref(),
            payload.telefono.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(proveedor)))
}

#[utoipa::path(
    get,
    path = "/api/proveedores",
    tag = "Proveedores",
    responses(
        (status = 200, description = "Todos los proveedores", body = Vec<Proveedor>),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_proveedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let proveedores = app_state.proveedores_service.listar(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(proveedores)))
}

#[utoipa::path(
    get,
    path = "/api/proveedores/{id}",
    tag = "Proveedores",
    params(("id" = Uuid, Path, description = "ID del proveedor")),
    responses(
        (status = 200, description = "Proveedor", body = Proveedor),
        (status = 404, description = "Proveedor no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obtener_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let proveedor = app_state.proveedores_service.obtener(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(proveedor)))
}

#[utoipa::path(
    put,
    path = "/api/proveedores/{id}",
    tag = "Proveedores",
    request_body = EditarProveedorPayload,
    params(("id" = Uuid, Path, description = "ID del proveedor")),
    responses(
        (status = 200, description = "Proveedor actualizado", body = Proveedor),
        (status = 404, description = "Proveedor no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn editar_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditarProveedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let proveedor = app_state
        .proveedores_service
        .editar_proveedor(
            &app_state.db_pool,
            id,
            payload.nombre.as_deref(),
            payload.ruc.as_deref(),
            payload.telefono.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(proveedor)))
}

#[utoipa::path(
    delete,
    path = "/api/proveedores/{id}",
    tag = "Proveedores",
    params(("id" = Uuid, Path, description = "ID del proveedor")),
    responses(
        (status = 204, description = "Proveedor eliminado"),
        (status = 404, description = "Proveedor no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .proveedores_service
        .eliminar_proveedor(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
