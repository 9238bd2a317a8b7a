// src/handlers/ventas.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::validacion::{error_de_campo, validar_no_negativo, validar_positivo},
    middleware::auth::UsuarioAutenticado,
    models::venta::{EstadoPago, ItemVenta, ResumenDia, VentaConNombres},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemVentaPayload {
    pub producto_id: Uuid,

    #[validate(custom(function = "validar_positivo"))]
    pub cantidad: Decimal,

    #[validate(custom(function = "validar_no_negativo"))]
    pub precio_unitario: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarVentaPayload {
    /// Ausente = consumidor final.
    pub cliente_id: Option<Uuid>,

    pub estado_pago: EstadoPago,

    /// Solo para ventas Parciales: lo abonado al momento de la venta.
    #[validate(custom(function = "validar_positivo"))]
    pub adelanto: Option<Decimal>,

    pub fecha: DateTime<Utc>,

    #[validate(length(min = 1, message = "La venta debe tener al menos un producto."), nested)]
    pub items: Vec<ItemVentaPayload>,
}

impl RegistrarVentaPayload {
    // Reglas cruzadas que el derive no cubre. El motor las vuelve a
    // verificar de todos modos.
    fn validar_consistencia(&self) -> Result<(), AppError> {
        if self.cliente_id.is_none()
            && matches!(self.estado_pago, EstadoPago::Pendiente | EstadoPago::Parcial)
        {
            return Err(AppError::ValidationError(error_de_campo(
                "clienteId",
                ValidationError::new("CreditoRequiereCliente"),
            )));
        }
        if self.estado_pago == EstadoPago::Parcial && self.adelanto.is_none() {
            return Err(AppError::ValidationError(error_de_campo(
                "adelanto",
                ValidationError::new("AdelantoRequerido"),
            )));
        }
        Ok(())
    }
}

// ---
// Handler: registrar_venta
// ---
#[utoipa::path(
    post,
    path = "/api/ventas",
    tag = "Ventas",
    request_body = RegistrarVentaPayload,
    responses(
        (status = 201, description = "Venta registrada, con nombres resueltos", body = VentaConNombres),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Algún producto no existe"),
        (status = 409, description = "Stock insuficiente"),
        (status = 422, description = "Crédito sin cliente o adelanto inválido"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn registrar_venta(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Json(payload): Json<RegistrarVentaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validar_consistencia()?;

    let items: Vec<ItemVenta> = payload
        .items
        .iter()
        .map(|item| ItemVenta {
            producto_id: item.producto_id,
            cantidad: item.cantidad,
            precio_unitario: item.precio_unitario,
        })
        .collect();

    let venta = app_state
        .ventas_service
        .registrar_venta(
            &app_state.db_pool,
            payload.cliente_id,
            payload.estado_pago,
            payload.adelanto,
            payload.fecha,
            &items,
        )
        .await?;

    tracing::info!(usuario = %usuario.0.sub, venta_id = %venta.id, "Venta registrada por caja");

    Ok((StatusCode::CREATED, Json(venta)))
}

// ---
// Handler: listar_ventas
// ---
#[utoipa::path(
    get,
    path = "/api/ventas",
    tag = "Ventas",
    responses(
        (status = 200, description = "Todas las ventas, denormalizadas", body = Vec<VentaConNombres>),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_ventas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let ventas = app_state.ventas_service.listar_ventas(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(ventas)))
}

// ---
// Handler: resumen_del_dia
// ---
#[derive(Debug, Deserialize, IntoParams)]
pub struct ResumenQuery {
    /// Día a resumir, en formato YYYY-MM-DD.
    #[param(value_type = String, format = Date, example = "2026-08-06")]
    pub fecha: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/api/ventas/resumen",
    tag = "Ventas",
    params(ResumenQuery),
    responses(
        (status = 200, description = "Totales del día", body = ResumenDia),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn resumen_del_dia(
    State(app_state): State<AppState>,
    Query(consulta): Query<ResumenQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resumen = app_state
        .ventas_service
        .resumen_del_dia(&app_state.db_pool, consulta.fecha)
        .await?;
    Ok((StatusCode::OK, Json(resumen)))
}

// ---
// Handler: obtener_venta
// ---
#[utoipa::path(
    get,
    path = "/api/ventas/{id}",
    tag = "Ventas",
    params(("id" = Uuid, Path, description = "ID de la venta")),
    responses(
        (status = 200, description = "La venta, denormalizada", body = VentaConNombres),
        (status = 404, description = "Venta no encontrada"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn obtener_venta(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let venta = app_state.ventas_service.obtener_venta(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(venta)))
}

// ---
// Handler: eliminar_venta
// ---
#[utoipa::path(
    delete,
    path = "/api/ventas/{id}",
    tag = "Ventas",
    params(("id" = Uuid, Path, description = "ID de la venta")),
    responses(
        (status = 204, description = "Venta eliminada (sin reponer stock)"),
        (status = 404, description = "Venta no encontrada"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_venta(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.ventas_service.eliminar_venta(&app_state.db_pool, id).await?;

    tracing::info!(usuario = %usuario.0.sub, venta_id = %id, "Venta eliminada por caja");

    Ok(StatusCode::NO_CONTENT)
}
