// src/handlers/deudas.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::validacion::validar_positivo,
    middleware::auth::UsuarioAutenticado,
    models::{
        deuda::{DeudaCliente, PagoAplicado},
        venta::VentaConNombres,
    },
};

// ---
// Handler: listar_clientes_con_deudas
// ---
#[utoipa::path(
    get,
    path = "/api/deudas",
    tag = "Deudas",
    responses(
        (status = 200, description = "Deuda agregada por cliente", body = Vec<DeudaCliente>),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar_clientes_con_deudas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let deudores = app_state
        .deudas_service
        .listar_clientes_con_deudas(&app_state.db_pool)
        .await?;
    Ok((StatusCode::OK, Json(deudores)))
}

// ---
// Handler: ventas_de_cliente (estado de cuenta)
// ---
#[utoipa::path(
    get,
    path = "/api/deudas/clientes/{clienteId}",
    tag = "Deudas",
    params(("clienteId" = Uuid, Path, description = "ID del cliente")),
    responses(
        (status = 200, description = "Ventas impagas del cliente con líneas resueltas", body = Vec<VentaConNombres>),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn ventas_de_cliente(
    State(app_state): State<AppState>,
    Path(cliente_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let ventas = app_state
        .deudas_service
        .ventas_de_cliente(&app_state.db_pool, cliente_id)
        .await?;
    Ok((StatusCode::OK, Json(ventas)))
}

// ---
// Payload y handler: pagar_deuda
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagarDeudaPayload {
    #[validate(custom(function = "validar_positivo"))]
    pub monto_pagado: Decimal,
}

#[utoipa::path(
    post,
    path = "/api/deudas/ventas/{ventaId}/pagos",
    tag = "Deudas",
    request_body = PagarDeudaPayload,
    params(("ventaId" = Uuid, Path, description = "ID de la venta a abonar")),
    responses(
        (status = 200, description = "Pago aplicado; el excedente recortado viaja en la respuesta", body = PagoAplicado),
        (status = 404, description = "Venta no encontrada"),
        (status = 422, description = "Monto inválido"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn pagar_deuda(
    State(app_state): State<AppState>,
    usuario: UsuarioAutenticado,
    Path(venta_id): Path<Uuid>,
    Json(payload): Json<PagarDeudaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let pago = app_state
        .deudas_service
        .pagar_deuda(&app_state.db_pool, venta_id, payload.monto_pagado)
        .await?;

    tracing::info!(
        usuario = %usuario.0.sub,
        venta_id = %venta_id,
        abonado = %pago.monto_abonado,
        "Abono registrado por caja"
    );

    Ok((StatusCode::OK, Json(pago)))
}
