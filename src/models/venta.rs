// src/models/venta.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (mapeando el Postgres) ---

// Estado de pago de una venta. `Pagado` es terminal: una vez saldada,
// ninguna operación la regresa a Pendiente ni a Parcial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "estado_pago", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoPago {
    Pagado,    // Saldada
    Pendiente, // Fiada, sin abonos
    Parcial,   // Fiada, con abonos
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    pub id: Uuid,

    /// `None` = consumidor final (venta anónima, siempre pagada).
    pub cliente_id: Option<Uuid>,

    /// Suma de los subtotales al momento de la venta; inmutable.
    #[schema(example = "100.00")]
    pub total: Decimal,

    pub estado_pago: EstadoPago,

    /// Saldo sin pagar. Solo decrece, nunca sube.
    #[schema(example = "60.00")]
    pub monto_pendiente: Decimal,

    pub fecha: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VentaDetalle {
    pub id: Uuid,
    pub venta_id: Uuid,
    pub producto_id: Uuid,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
    pub subtotal: Decimal,
    pub posicion: i32,
}

/// Línea de un borrador de venta tal como llega al motor; los subtotales y
/// el total los calcula el motor, no el que llama.
#[derive(Debug, Clone)]
pub struct ItemVenta {
    pub producto_id: Uuid,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
}

// --- Proyecciones de lectura (nombres resueltos) ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetalleConNombre {
    pub producto_id: Uuid,
    #[schema(example = "Arroz 1kg")]
    pub producto_nombre: String,
    pub cantidad: Decimal,
    pub precio_unitario: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VentaConNombres {
    pub id: Uuid,
    pub cliente_id: Option<Uuid>,
    #[schema(example = "Consumidor Final")]
    pub cliente_nombre: String,
    pub total: Decimal,
    pub estado_pago: EstadoPago,
    pub monto_pendiente: Decimal,
    pub fecha: DateTime<Utc>,
    pub detalles: Vec<DetalleConNombre>,
}

/// Resumen agregado de un día de ventas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumenDia {
    #[schema(value_type = String, format = Date, example = "2026-08-06")]
    pub fecha: NaiveDate,
    pub total_vendido: Decimal,
    pub numero_ventas: i64,
    /// Crédito otorgado ese día que sigue sin cobrarse.
    pub total_fiado: Decimal,
}

// --- Liquidación de deuda ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Liquidacion {
    pub nuevo_pendiente: Decimal,
    pub nuevo_estado: EstadoPago,
    /// Parte del pago que excede el saldo; se descarta, pero se informa.
    pub excedente: Decimal,
}

/// Aplica un pago sobre el saldo pendiente de una venta.
///
/// El saldo se recorta a cero (el excedente no es un error, se devuelve
/// para que la capa que llama decida qué hacer con él) y el estado avanza
/// de forma monótona: un abono parcial sobre una venta `Pendiente` la deja
/// `Parcial`; saldo cero la deja `Pagado`, de donde no se sale.
pub fn liquidar(pendiente: Decimal, monto_pagado: Decimal) -> Liquidacion {
    let excedente = (monto_pagado - pendiente).max(Decimal::ZERO);
    let nuevo_pendiente = (pendiente - monto_pagado).max(Decimal::ZERO);
    let nuevo_estado = if nuevo_pendiente == Decimal::ZERO {
        EstadoPago::Pagado
    } else {
        EstadoPago::Parcial
    };

    Liquidacion { nuevo_pendiente, nuevo_estado, excedente }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn abono_parcial_deja_la_venta_parcial() {
        let liq = liquidar(dec("100"), dec("40"));
        assert_eq!(liq.nuevo_pendiente, dec("60"));
        assert_eq!(liq.nuevo_estado, EstadoPago::Parcial);
        assert_eq!(liq.excedente, Decimal::ZERO);
    }

    #[test]
    fn pago_exacto_salda_la_venta() {
        let liq = liquidar(dec("60"), dec("60"));
        assert_eq!(liq.nuevo_pendiente, Decimal::ZERO);
        assert_eq!(liq.nuevo_estado, EstadoPago::Pagado);
        assert_eq!(liq.excedente, Decimal::ZERO);
    }

    #[test]
    fn sobrepago_se_recorta_y_el_excedente_se_informa() {
        let liq = liquidar(dec("30"), dec("1000"));
        assert_eq!(liq.nuevo_pendiente, Decimal::ZERO);
        assert_eq!(liq.nuevo_estado, EstadoPago::Pagado);
        assert_eq!(liq.excedente, dec("970"));
    }

    #[test]
    fn una_venta_saldada_se_queda_saldada() {
        // Pagar sobre saldo cero: todo el monto es excedente y el estado
        // no retrocede.
        let liq = liquidar(Decimal::ZERO, dec("25"));
        assert_eq!(liq.nuevo_pendiente, Decimal::ZERO);
        assert_eq!(liq.nuevo_estado, EstadoPago::Pagado);
        assert_eq!(liq.excedente, dec("25"));
    }

    #[test]
    fn secuencia_de_abonos_es_monotona() {
        // Escenario clásico: total 100, abonos de 40 y 60.
        let primero = liquidar(dec("100"), dec("40"));
        assert_eq!(primero.nuevo_pendiente, dec("60"));
        assert_eq!(primero.nuevo_estado, EstadoPago::Parcial);

        let segundo = liquidar(primero.nuevo_pendiente, dec("60"));
        assert_eq!(segundo.nuevo_pendiente, Decimal::ZERO);
        assert_eq!(segundo.nuevo_estado, EstadoPago::Pagado);

        // El saldo nunca creció en el camino.
        assert!(segundo.nuevo_pendiente <= primero.nuevo_pendiente);
        assert!(primero.nuevo_pendiente <= dec("100"));
    }

    #[test]
    fn el_invariante_pagado_equivale_a_saldo_cero() {
        for (pendiente, monto) in [("50", "10"), ("50", "50"), ("50", "80"), ("0.01", "0.01")] {
            let liq = liquidar(dec(pendiente), dec(monto));
            assert_eq!(
                liq.nuevo_estado == EstadoPago::Pagado,
                liq.nuevo_pendiente == Decimal::ZERO,
            );
        }
    }
}
