// src/handlers/eventos.rs

use std::pin::Pin;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, KeepAliveStream, Sse},
};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};

use crate::{common::error::AppError, config::AppState};

type FlujoEventos = Pin<Box<dyn Stream<Item = Result<Event, axum::Error>> + Send>>;

fn flujo_de<T>(rx: broadcast::Receiver<T>) -> FlujoEventos
where
    T: Clone + Serialize + Send + 'static,
{
    Box::pin(
        BroadcastStream::new(rx)
            // Un suscriptor rezagado pierde avisos, no recibe un error:
            // los eventos son señales de re-consulta, no datos.
            .filter_map(|evento| evento.ok())
            .map(|evento| Event::default().json_data(&evento)),
    )
}

// Las superficies de la UI se suscriben al agregado que pintan y vuelven a
// consultar al recibir cada aviso.
#[utoipa::path(
    get,
    path = "/api/eventos/{agregado}",
    tag = "Eventos",
    params(("agregado" = String, Path, description = "productos | ventas | deudas")),
    responses(
        (status = 200, description = "Flujo SSE de avisos de cambio del agregado"),
        (status = 404, description = "Agregado desconocido"),
        (status = 401, description = "No autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn suscribir(
    State(app_state): State<AppState>,
    Path(agregado): Path<String>,
) -> Result<Sse<KeepAliveStream<FlujoEventos>>, AppError> {
    let flujo = match agregado.as_str() {
        "productos" => flujo_de(app_state.bus.suscribir_productos()),
        "ventas" => flujo_de(app_state.bus.suscribir_ventas()),
        "deudas" => flujo_de(app_state.bus.suscribir_deudas()),
        _ => return Err(AppError::AgregadoDesconocido(agregado)),
    };

    Ok(Sse::new(flujo).keep_alive(KeepAlive::default()))
}
