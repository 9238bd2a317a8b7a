// src/common/eventos.rs

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

// Los eventos son avisos de refresco, no datos: un suscriptor que se atrasa
// pierde eventos y simplemente vuelve a consultar.
const CAPACIDAD_CANAL: usize = 64;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tipo", rename_all = "camelCase")]
pub enum EventoProducto {
    Creado { id: Uuid },
    Actualizado { id: Uuid },
    Eliminado { id: Uuid },
    StockDescontado { id: Uuid },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tipo", rename_all = "camelCase")]
pub enum EventoVenta {
    Registrada { id: Uuid },
    Eliminada { id: Uuid },
    PagoAplicado { id: Uuid },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tipo", rename_all = "camelCase")]
pub enum EventoDeuda {
    Actualizada { cliente_id: Uuid },
}

// Un canal por agregado (Productos, Ventas, Deudas). Los servicios que
// escriben en la tienda son los únicos emisores; las superficies de la UI
// se suscriben vía SSE y re-consultan al recibir el aviso.
#[derive(Clone)]
pub struct BusEventos {
    productos: broadcast::Sender<EventoProducto>,
    ventas: broadcast::Sender<EventoVenta>,
    deudas: broadcast::Sender<EventoDeuda>,
}

impl BusEventos {
    pub fn new() -> Self {
        let (productos, _) = broadcast::channel(CAPACIDAD_CANAL);
        let (ventas, _) = broadcast::channel(CAPACIDAD_CANAL);
        let (deudas, _) = broadcast::channel(CAPACIDAD_CANAL);
        Self { productos, ventas, deudas }
    }

    // Publicar nunca falla: si no hay suscriptores el aviso se descarta.
    pub fn publicar_producto(&self, evento: EventoProducto) {
        let _ = self.productos.send(evento);
    }

    pub fn publicar_venta(&self, evento: EventoVenta) {
        let _ = self.ventas.send(evento);
    }

    pub fn publicar_deuda(&self, evento: EventoDeuda) {
        let _ = self.deudas.send(evento);
    }

    pub fn suscribir_productos(&self) -> broadcast::Receiver<EventoProducto> {
        self.productos.subscribe()
    }

    pub fn suscribir_ventas(&self) -> broadcast::Receiver<EventoVenta> {
        self.ventas.subscribe()
    }

    pub fn suscribir_deudas(&self) -> broadcast::Receiver<EventoDeuda> {
        self.deudas.subscribe()
    }
}

impl Default for BusEventos {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn el_suscriptor_recibe_lo_publicado() {
        let bus = BusEventos::new();
        let mut rx = bus.suscribir_ventas();

        let id = Uuid::new_v4();
        bus.publicar_venta(EventoVenta::Registrada { id });

        match rx.recv().await {
            Ok(EventoVenta::Registrada { id: recibido }) => assert_eq!(recibido, id),
            otro => panic!("evento inesperado: {:?}", otro),
        }
    }

    #[tokio::test]
    async fn publicar_sin_suscriptores_no_falla() {
        let bus = BusEventos::new();
        bus.publicar_producto(EventoProducto::Eliminado { id: Uuid::new_v4() });
    }

    #[test]
    fn los_canales_son_independientes() {
        let bus = BusEventos::new();
        let mut rx_productos = bus.suscribir_productos();

        bus.publicar_venta(EventoVenta::Eliminada { id: Uuid::new_v4() });

        // Nada llegó al canal de productos.
        assert!(rx_productos.try_recv().is_err());
    }
}
