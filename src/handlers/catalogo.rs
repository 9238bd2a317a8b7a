// src/handlers/catalogo.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::validacion::{error_de_campo, validar_no_negativo},
    models::producto::{CambiosProducto, Producto, es_categoria_especial},
};

// ---
// Payload: CrearProducto
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrearProductoPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,

    #[validate(custom(function = "validar_no_negativo"))]
    pub precio: Decimal,

    #[validate(length(min = 1, message = "La categoría es obligatoria."))]
    pub categoria: String,

    // Obligatorio para categorías normales; las especiales lo ignoran.
    #[validate(range(min = 0, message = "El stock no puede ser negativo."))]
    pub stock: Option<i32>,

    pub marca: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_vencimiento: Option<NaiveDate>,
}

impl CrearProductoPayload {
    // Regla que el derive no puede expresar: si la categoría lleva control
    // de unidades, necesitamos saber con cuántas arranca.
    fn validar_consistencia(&self) -> Result<(), ValidationError> {
        if !es_categoria_especial(&self.categoria) && self.stock.is_none() {
            return Err(ValidationError::new("StockRequeridoParaCategoria"));
        }
        Ok(())
    }
}

// ---
// Handler: crear_producto
// ---
#[utoipa::path(
    post,
    path = "/api/catalogo/productos",
    tag = "Catálogo",
    request_body = CrearProductoPayload,
    responses(
        (status = 201, description = "Producto creado", body = Producto),
        (status = 400, description = "Campos inválidos"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn crear_producto(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload
        .validar_consistencia()
        .map_err(|e| AppError::ValidationError(error_de_campo("stock", e)))?;

    let producto = app_state
        .catalogo_service
        .crear_producto(
            &app_state.db_pool,
            &payload.nombre,
            payload.precio,
            &payload.categoria,
            payload.stock,
            payload.marca.as_deref(),
            payload.fecha_vencimiento,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(producto)))
}

// ---
// Handler: listar_productos
// ---
#[utoipa::path(
    get,
    path = "/api/catalogo/productos",
    tag = "Catálogo",
    responses(
        (status = 200, description = "Todos los productos del catálogo", body = Vec<Producto>),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_productos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state.catalogo_service.listar(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(productos)))
}

// ---
// Handler: obtener_producto
// ---
#[utoipa::path(
    get,
    path = "/api/catalogo/productos/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID del producto")),
    responses(
        (status = 200, description = "Producto", body = Producto),
        (status = 404, description = "Producto no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obtener_producto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state.catalogo_service.obtener(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(producto)))
}

// ---
// Payload: EditarProducto (parche parcial)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditarProductoPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre: Option<String>,

    #[validate(custom(function = "validar_no_negativo"))]
    pub precio: Option<Decimal>,

    #[validate(length(min = 1, message = "La categoría no puede quedar vacía."))]
    pub categoria: Option<String>,

    #[validate(range(min = 0, message = "El stock no puede ser negativo."))]
    pub stock: Option<i32>,

    pub marca: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_vencimiento: Option<NaiveDate>,
}

// ---
// Handler: editar_producto
// ---
#[utoipa::path(
    put,
    path = "/api/catalogo/productos/{id}",
    tag = "Catálogo",
    request_body = EditarProductoPayload,
    params(("id" = Uuid, Path, description = "ID del producto")),
    responses(
        (status = 200, description = "Producto actualizado", body = Producto),
        (status = 404, description = "Producto no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn editar_producto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditarProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cambios = CambiosProducto {
        nombre: payload.nombre,
        precio: payload.precio,
        categoria: payload.categoria,
        stock: payload.stock,
        marca: payload.marca,
        fecha_vencimiento: payload.fecha_vencimiento,
    };

    let producto = app_state
        .catalogo_service
        .editar_producto(&app_state.db_pool, id, cambios)
        .await?;

    Ok((StatusCode::OK, Json(producto)))
}

// ---
// Handler: eliminar_producto
// ---
#[utoipa::path(
    delete,
    path = "/api/catalogo/productos/{id}",
    tag = "Catálogo",
    params(("id" = Uuid, Path, description = "ID del producto")),
    responses(
        (status = 204, description = "Producto eliminado"),
        (status = 404, description = "Producto no encontrado"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_producto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalogo_service
        .eliminar_producto(&app_state.db_pool, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
