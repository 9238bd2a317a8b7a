// src/db/deuda_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::venta::{EstadoPago, Venta},
};

// El libro de deudas no tiene tabla propia: lee y muta las ventas impagas.
// Es el único escritor de `monto_pendiente` y `estado_pago`.
#[derive(Clone)]
pub struct DeudaRepository {
    pool: PgPool,
}

impl DeudaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Snapshot vivo de todas las ventas con saldo.
    pub async fn listar_ventas_impagas<'e, E>(&self, executor: E) -> Result<Vec<Venta>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ventas = sqlx::query_as::<_, Venta>(
            r#"
            SELECT * FROM ventas
            WHERE estado_pago IN ('PENDIENTE', 'PARCIAL')
            ORDER BY fecha ASC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(ventas)
    }

    pub async fn listar_impagas_de_cliente<'e, E>(
        &self,
        executor: E,
        cliente_id: Uuid,
    ) -> Result<Vec<Venta>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ventas = sqlx::query_as::<_, Venta>(
            r#"
            SELECT * FROM ventas
            WHERE cliente_id = $1 AND estado_pago IN ('PENDIENTE', 'PARCIAL')
            ORDER BY fecha ASC
            "#,
        )
        .bind(cliente_id)
        .fetch_all(executor)
        .await?;
        Ok(ventas)
    }

    /// Carga la venta bloqueando su fila: los abonos sobre una misma venta
    /// se serializan y el saldo solo puede bajar.
    pub async fn obtener_con_bloqueo<'e, E>(
        &self,
        executor: E,
        venta_id: Uuid,
    ) -> Result<Option<Venta>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let venta = sqlx::query_as::<_, Venta>(
            "SELECT * FROM ventas WHERE id = $1 FOR UPDATE",
        )
        .bind(venta_id)
        .fetch_optional(executor)
        .await?;
        Ok(venta)
    }

    pub async fn aplicar_pago<'e, E>(
        &self,
        executor: E,
        venta_id: Uuid,
        nuevo_pendiente: Decimal,
        nuevo_estado: EstadoPago,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            "UPDATE ventas SET monto_pendiente = $2, estado_pago = $3 WHERE id = $1",
        )
        .bind(venta_id)
        .bind(nuevo_pendiente)
        .bind(nuevo_estado)
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }
}
