// src/services/ventas_service.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        eventos::{BusEventos, EventoDeuda, EventoProducto, EventoVenta},
    },
    db::{ProductoRepository, VentaRepository},
    models::venta::{EstadoPago, ItemVenta, ResumenDia, VentaConNombres},
    services::nombres::ResolutorNombres,
};

// ---
// Reglas puras del motor (sin I/O, ver tests abajo)
// ---

/// Crédito anónimo no existe: fiar exige un cliente identificado.
fn validar_credito(cliente_id: Option<Uuid>, estado: EstadoPago) -> Result<(), AppError> {
    if cliente_id.is_none() && matches!(estado, EstadoPago::Pendiente | EstadoPago::Parcial) {
        return Err(AppError::CreditoSinCliente);
    }
    Ok(())
}

/// Saldo inicial según el estado de pago declarado:
/// Pagado ⇒ 0, Pendiente ⇒ total, Parcial ⇒ total − adelanto.
fn pendiente_inicial(
    total: Decimal,
    estado: EstadoPago,
    adelanto: Option<Decimal>,
) -> Result<Decimal, AppError> {
    match estado {
        EstadoPago::Pagado => Ok(Decimal::ZERO),
        EstadoPago::Pendiente => Ok(total),
        EstadoPago::Parcial => {
            let adelanto = adelanto.ok_or(AppError::AdelantoInvalido)?;
            // 0 < pendiente < total, por invariante de Parcial.
            if adelanto <= Decimal::ZERO || adelanto >= total {
                return Err(AppError::AdelantoInvalido);
            }
            Ok(total - adelanto)
        }
    }
}

fn subtotal_de(item: &ItemVenta) -> Decimal {
    (item.cantidad * item.precio_unitario).round_dp(2)
}

fn total_de(items: &[ItemVenta]) -> Decimal {
    items.iter().map(subtotal_de).sum()
}

/// Los productos con control de unidades se venden en enteros (≥ 1);
/// las categorías especiales aceptan fracciones (kilos).
fn cantidad_es_entera(cantidad: Decimal) -> bool {
    cantidad >= Decimal::ONE && cantidad.fract() == Decimal::ZERO
}

// ---
// Servicio
// ---

#[derive(Clone)]
pub struct VentasService {
    venta_repo: VentaRepository,
    producto_repo: ProductoRepository,
    nombres: ResolutorNombres,
    bus: BusEventos,
}

impl VentasService {
    pub fn new(
        venta_repo: VentaRepository,
        producto_repo: ProductoRepository,
        nombres: ResolutorNombres,
        bus: BusEventos,
    ) -> Self {
        Self { venta_repo, producto_repo, nombres, bus }
    }

    /// Registra una venta de forma atómica: todos los descuentos de stock y
    /// la inserción de la venta entran en la misma transacción, o nada de
    /// eso queda visible.
    pub async fn registrar_venta<'e, E>(
        &self,
        executor: E,
        cliente_id: Option<Uuid>,
        estado_pago: EstadoPago,
        adelanto: Option<Decimal>,
        fecha: DateTime<Utc>,
        items: &[ItemVenta],
    ) -> Result<VentaConNombres, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        validar_credito(cliente_id, estado_pago)?;

        if items.is_empty() {
            let mut errores = validator::ValidationErrors::new();
            let mut error = validator::ValidationError::new("length");
            error.message = Some("La venta debe tener al menos un producto.".into());
            errores.add("items", error);
            return Err(AppError::ValidationError(errores));
        }

        // El motor calcula los montos; no se confía en totales del cliente.
        let total = total_de(items);
        let pendiente = pendiente_inicial(total, estado_pago, adelanto)?;

        let mut tx = executor.begin().await?;

        // (id, nombre, es_especial) de cada producto vendido, para la caché
        // y los eventos de stock tras el commit.
        let mut vendidos: Vec<(Uuid, String, bool)> = Vec::with_capacity(items.len());

        for item in items {
            let producto = self
                .producto_repo
                .obtener(&mut *tx, item.producto_id)
                .await?
                .ok_or(AppError::NotFound("Producto", item.producto_id))?;

            if producto.es_especial() {
                vendidos.push((producto.id, producto.nombre, true));
                continue;
            }

            if !cantidad_es_entera(item.cantidad) {
                return Err(AppError::CantidadInvalida(producto.nombre));
            }
            let unidades = item
                .cantidad
                .to_i32()
                .ok_or_else(|| AppError::CantidadInvalida(producto.nombre.clone()))?;

            // El chequeo de stock ES el decremento (UPDATE condicional):
            // cero filas = no alcanzaba, y la transacción entera se revierte.
            let filas = self
                .producto_repo
                .descontar_stock(&mut *tx, producto.id, unidades)
                .await?;
            if filas == 0 {
                return Err(AppError::StockInsuficiente {
                    nombre: producto.nombre,
                    solicitado: item.cantidad,
                    disponible: producto.stock.unwrap_or(0),
                });
            }

            vendidos.push((producto.id, producto.nombre, false));
        }

        let venta = self
            .venta_repo
            .insertar_cabecera(&mut *tx, cliente_id, total, estado_pago, pendiente, fecha)
            .await?;

        let mut detalles = Vec::with_capacity(items.len());
        for (posicion, item) in items.iter().enumerate() {
            let detalle = self
                .venta_repo
                .insertar_detalle(
                    &mut *tx,
                    venta.id,
                    item.producto_id,
                    item.cantidad,
                    item.precio_unitario,
                    subtotal_de(item),
                    posicion as i32,
                )
                .await?;
            detalles.push(detalle);
        }

        tx.commit().await?;

        // Tras el commit: caché, eventos y proyección enriquecida.
        for (id, nombre, es_especial) in &vendidos {
            self.nombres.guardar_producto(*id, nombre);
            if !*es_especial {
                self.bus.publicar_producto(EventoProducto::StockDescontado { id: *id });
            }
        }
        self.bus.publicar_venta(EventoVenta::Registrada { id: venta.id });
        if estado_pago != EstadoPago::Pagado {
            if let Some(cliente_id) = cliente_id {
                self.bus.publicar_deuda(EventoDeuda::Actualizada { cliente_id });
            }
        }

        tracing::info!(
            id = %venta.id,
            total = %venta.total,
            estado = ?venta.estado_pago,
            "Venta registrada"
        );

        self.nombres.proyectar_venta(&venta, &detalles).await
    }

    /// Borra la venta. No repone stock: el descuento de la venta queda en el
    /// inventario tal como ocurrió.
    pub async fn eliminar_venta<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let venta = self
            .venta_repo
            .obtener(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Venta", id))?;

        self.venta_repo.eliminar(&mut *tx, id).await?;
        tx.commit().await?;

        self.bus.publicar_venta(EventoVenta::Eliminada { id });
        // Si tenía saldo, la deuda agregada del cliente cambió.
        if venta.estado_pago != EstadoPago::Pagado {
            if let Some(cliente_id) = venta.cliente_id {
                self.bus.publicar_deuda(EventoDeuda::Actualizada { cliente_id });
            }
        }

        tracing::info!(id = %id, "Venta eliminada");
        Ok(())
    }

    /// Proyección viva y denormalizada de todas las ventas.
    pub async fn listar_ventas<'e, E>(&self, executor: E) -> Result<Vec<VentaConNombres>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let ventas = self.venta_repo.listar(&mut *tx).await?;
        let mut con_detalles = Vec::with_capacity(ventas.len());
        for venta in ventas {
            let detalles = self.venta_repo.listar_detalles(&mut *tx, venta.id).await?;
            con_detalles.push((venta, detalles));
        }

        tx.commit().await?;

        let mut proyectadas = Vec::with_capacity(con_detalles.len());
        for (venta, detalles) in &con_detalles {
            proyectadas.push(self.nombres.proyectar_venta(venta, detalles).await?);
        }
        Ok(proyectadas)
    }

    pub async fn obtener_venta<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<VentaConNombres, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let venta = self
            .venta_repo
            .obtener(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Venta", id))?;
        let detalles = self.venta_repo.listar_detalles(&mut *tx, id).await?;

        tx.commit().await?;

        self.nombres.proyectar_venta(&venta, &detalles).await
    }

    pub async fn resumen_del_dia<'e, E>(
        &self,
        executor: E,
        fecha: NaiveDate,
    ) -> Result<ResumenDia, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        self.venta_repo.resumen_del_dia(executor, fecha).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(cantidad: &str, precio: &str) -> ItemVenta {
        ItemVenta {
            producto_id: Uuid::new_v4(),
            cantidad: dec(cantidad),
            precio_unitario: dec(precio),
        }
    }

    #[test]
    fn credito_anonimo_se_rechaza() {
        assert!(matches!(
            validar_credito(None, EstadoPago::Pendiente),
            Err(AppError::CreditoSinCliente)
        ));
        assert!(matches!(
            validar_credito(None, EstadoPago::Parcial),
            Err(AppError::CreditoSinCliente)
        ));
    }

    #[test]
    fn venta_anonima_pagada_es_valida() {
        assert!(validar_credito(None, EstadoPago::Pagado).is_ok());
        assert!(validar_credito(Some(Uuid::new_v4()), EstadoPago::Pendiente).is_ok());
    }

    #[test]
    fn pendiente_inicial_por_estado() {
        let total = dec("100");
        assert_eq!(pendiente_inicial(total, EstadoPago::Pagado, None).unwrap(), Decimal::ZERO);
        assert_eq!(pendiente_inicial(total, EstadoPago::Pendiente, None).unwrap(), total);
    }

    #[test]
    fn parcial_descuenta_el_adelanto() {
        // total=50, adelanto=20 ⇒ pendiente=30.
        let pendiente =
            pendiente_inicial(dec("50"), EstadoPago::Parcial, Some(dec("20"))).unwrap();
        assert_eq!(pendiente, dec("30"));
    }

    #[test]
    fn parcial_exige_adelanto_dentro_del_rango() {
        let total = dec("50");
        for adelanto in [None, Some(Decimal::ZERO), Some(dec("-5")), Some(dec("50")), Some(dec("80"))] {
            assert!(matches!(
                pendiente_inicial(total, EstadoPago::Parcial, adelanto),
                Err(AppError::AdelantoInvalido)
            ));
        }
    }

    #[test]
    fn el_total_es_la_suma_de_subtotales() {
        let items = vec![item("3", "12.50"), item("1", "8.00")];
        assert_eq!(subtotal_de(&items[0]), dec("37.50"));
        assert_eq!(subtotal_de(&items[1]), dec("8.00"));
        assert_eq!(total_de(&items), dec("45.50"));
    }

    #[test]
    fn subtotal_fraccionario_se_redondea_a_centavos() {
        // 0.750 kg a 7.90 el kilo = 5.925; redondeo bancario a 5.92.
        let fraccion = item("0.750", "7.90");
        assert_eq!(subtotal_de(&fraccion), dec("5.92"));
    }

    #[test]
    fn cantidades_enteras_para_productos_por_unidad() {
        assert!(cantidad_es_entera(dec("1")));
        assert!(cantidad_es_entera(dec("3.000")));
        assert!(!cantidad_es_entera(dec("0.5")));
        assert!(!cantidad_es_entera(dec("2.25")));
        assert!(!cantidad_es_entera(Decimal::ZERO));
    }
}
