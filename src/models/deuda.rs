// src/models/deuda.rs

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::venta::{EstadoPago, Venta};

// Agregado derivado, nunca persistido: se recalcula sobre el conjunto vivo
// de ventas impagas cada vez que cambia.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeudaCliente {
    pub cliente_id: Uuid,
    #[schema(example = "María Quispe")]
    pub nombre: String,
    #[schema(example = "75.00")]
    pub total_deuda: Decimal,
    pub ventas_pendientes: i64,
}

/// Resultado de aplicar un pago vía el libro de deudas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagoAplicado {
    pub venta_id: Uuid,
    pub estado_pago: EstadoPago,
    pub monto_pendiente: Decimal,
    /// Lo que del pago realmente redujo el saldo.
    pub monto_abonado: Decimal,
    /// Sobrante recortado del pago; cero si no hubo sobrepago.
    pub excedente: Decimal,
}

/// Agrupa las ventas impagas por cliente: suma de saldos y número de ventas.
///
/// Las ventas sin cliente no deberían llegar aquí (el motor rechaza crédito
/// anónimo); si llegan, se ignoran en vez de inventar un deudor.
pub fn agrupar_deudas(ventas: &[Venta]) -> Vec<(Uuid, Decimal, i64)> {
    let mut por_cliente: HashMap<Uuid, (Decimal, i64)> = HashMap::new();

    for venta in ventas {
        if venta.estado_pago == EstadoPago::Pagado {
            continue;
        }
        let Some(cliente_id) = venta.cliente_id else {
            continue;
        };
        let entrada = por_cliente.entry(cliente_id).or_insert((Decimal::ZERO, 0));
        entrada.0 += venta.monto_pendiente;
        entrada.1 += 1;
    }

    let mut resultado: Vec<(Uuid, Decimal, i64)> = por_cliente
        .into_iter()
        .map(|(cliente_id, (total, cuenta))| (cliente_id, total, cuenta))
        .collect();
    // Orden estable para el consumidor; el servicio reordena por nombre.
    resultado.sort_by_key(|(cliente_id, _, _)| *cliente_id);
    resultado
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn venta(cliente_id: Option<Uuid>, estado: EstadoPago, pendiente: &str) -> Venta {
        Venta {
            id: Uuid::new_v4(),
            cliente_id,
            total: dec("100"),
            estado_pago: estado,
            monto_pendiente: dec(pendiente),
            fecha: Utc::now(),
        }
    }

    #[test]
    fn suma_saldos_y_cuenta_ventas_por_cliente() {
        let cliente = Uuid::new_v4();
        let ventas = vec![
            venta(Some(cliente), EstadoPago::Pendiente, "30"),
            venta(Some(cliente), EstadoPago::Parcial, "45"),
        ];

        let deudas = agrupar_deudas(&ventas);
        assert_eq!(deudas.len(), 1);
        assert_eq!(deudas[0].0, cliente);
        assert_eq!(deudas[0].1, dec("75"));
        assert_eq!(deudas[0].2, 2);
    }

    #[test]
    fn separa_a_cada_cliente() {
        let ana = Uuid::new_v4();
        let beto = Uuid::new_v4();
        let ventas = vec![
            venta(Some(ana), EstadoPago::Pendiente, "20"),
            venta(Some(beto), EstadoPago::Parcial, "15"),
            venta(Some(ana), EstadoPago::Parcial, "5"),
        ];

        let deudas = agrupar_deudas(&ventas);
        assert_eq!(deudas.len(), 2);

        let de_ana = deudas.iter().find(|(id, _, _)| *id == ana).unwrap();
        let de_beto = deudas.iter().find(|(id, _, _)| *id == beto).unwrap();
        assert_eq!(de_ana.1, dec("25"));
        assert_eq!(de_ana.2, 2);
        assert_eq!(de_beto.1, dec("15"));
        assert_eq!(de_beto.2, 1);
    }

    #[test]
    fn ignora_ventas_pagadas_y_anonimas() {
        let cliente = Uuid::new_v4();
        let ventas = vec![
            venta(Some(cliente), EstadoPago::Pagado, "0"),
            venta(None, EstadoPago::Pagado, "0"),
            venta(Some(cliente), EstadoPago::Pendiente, "10"),
        ];

        let deudas = agrupar_deudas(&ventas);
        assert_eq!(deudas.len(), 1);
        assert_eq!(deudas[0].1, dec("10"));
        assert_eq!(deudas[0].2, 1);
    }

    #[test]
    fn sin_ventas_impagas_no_hay_deudores() {
        assert!(agrupar_deudas(&[]).is_empty());
        let ventas = vec![venta(Some(Uuid::new_v4()), EstadoPago::Pagado, "0")];
        assert!(agrupar_deudas(&ventas).is_empty());
    }
}
