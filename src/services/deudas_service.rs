// src/services/deudas_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        eventos::{BusEventos, EventoDeuda, EventoVenta},
    },
    db::{DeudaRepository, VentaRepository},
    models::{
        deuda::{DeudaCliente, PagoAplicado, agrupar_deudas},
        venta::{VentaConNombres, liquidar},
    },
    services::nombres::ResolutorNombres,
};

// Único mutador de `monto_pendiente` / `estado_pago`; todo lo demás aquí
// son agregaciones derivadas del conjunto vivo de ventas impagas.
#[derive(Clone)]
pub struct DeudasService {
    deuda_repo: DeudaRepository,
    venta_repo: VentaRepository,
    nombres: ResolutorNombres,
    bus: BusEventos,
}

impl DeudasService {
    pub fn new(
        deuda_repo: DeudaRepository,
        venta_repo: VentaRepository,
        nombres: ResolutorNombres,
        bus: BusEventos,
    ) -> Self {
        Self { deuda_repo, venta_repo, nombres, bus }
    }

    /// Deuda agregada por cliente: suma de saldos y cuenta de ventas sobre
    /// las ventas en Pendiente o Parcial, con nombres resueltos.
    pub async fn listar_clientes_con_deudas<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<DeudaCliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ventas = self.deuda_repo.listar_ventas_impagas(executor).await?;

        let mut deudores = Vec::new();
        for (cliente_id, total_deuda, ventas_pendientes) in agrupar_deudas(&ventas) {
            deudores.push(DeudaCliente {
                cliente_id,
                nombre: self.nombres.resolver_cliente(Some(cliente_id)).await?,
                total_deuda,
                ventas_pendientes,
            });
        }
        deudores.sort_by(|a, b| a.nombre.cmp(&b.nombre));

        Ok(deudores)
    }

    /// Estado de cuenta de un cliente: sus ventas impagas con líneas y
    /// nombres de producto resueltos.
    pub async fn ventas_de_cliente<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
    ) -> Result<Vec<VentaConNombres>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let ventas = self
            .deuda_repo
            .listar_impagas_de_cliente(&mut *tx, cliente_id)
            .await?;
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

    /// Abona `monto_pagado` al saldo de una venta.
    ///
    /// El saldo baja de forma monótona bajo bloqueo de fila; el sobrepago se
    /// recorta a cero sin error y el sobrante viaja en el resultado para que
    /// la capa que llama decida (devolverlo, avisar, etc.).
    pub async fn pagar_deuda<'e, E>(
        &self,
        executor: E,
        venta_id: Uuid,
        monto_pagado: Decimal,
    ) -> Result<PagoAplicado, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if monto_pagado <= Decimal::ZERO {
            return Err(AppError::MontoPagoInvalido);
        }

        let mut tx = executor.begin().await?;

        let venta = self
            .deuda_repo
            .obtener_con_bloqueo(&mut *tx, venta_id)
            .await?
            .ok_or(AppError::NotFound("Venta", venta_id))?;

        let liquidacion = liquidar(venta.monto_pendiente, monto_pagado);

        self.deuda_repo
            .aplicar_pago(
                &mut *tx,
                venta_id,
                liquidacion.nuevo_pendiente,
                liquidacion.nuevo_estado,
            )
            .await?;

        tx.commit().await?;

        self.bus.publicar_venta(EventoVenta::PagoAplicado { id: venta_id });
        if let Some(cliente_id) = venta.cliente_id {
            self.bus.publicar_deuda(EventoDeuda::Actualizada { cliente_id });
        }

        tracing::info!(
            venta_id = %venta_id,
            abonado = %(monto_pagado - liquidacion.excedente),
            pendiente = %liquidacion.nuevo_pendiente,
            estado = ?liquidacion.nuevo_estado,
            "Pago aplicado"
        );

        Ok(PagoAplicado {
            venta_id,
            estado_pago: liquidacion.nuevo_estado,
            monto_pendiente: liquidacion.nuevo_pendiente,
            monto_abonado: monto_pagado - liquidacion.excedente,
            excedente: liquidacion.excedente,
        })
    }
}
