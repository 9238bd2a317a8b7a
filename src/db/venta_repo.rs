// src/db/venta_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::venta::{EstadoPago, ResumenDia, Venta, VentaDetalle},
};

#[derive(Clone)]
pub struct VentaRepository {
    pool: PgPool,
}

impl VentaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escrituras (siempre dentro de la transacción del servicio)
    // ---

    /// Inserta la cabecera y devuelve la venta con su id asignado.
    pub async fn insertar_cabecera<'e, E>(
        &self,
        executor: E,
        cliente_id: Option<Uuid>,
        total: Decimal,
        estado_pago: EstadoPago,
        monto_pendiente: Decimal,
        fecha: DateTime<Utc>,
    ) -> Result<Venta, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let venta = sqlx::query_as::<_, Venta>(
            r#"
            INSERT INTO ventas (cliente_id, total, estado_pago, monto_pendiente, fecha)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(cliente_id)
        .bind(total)
        .bind(estado_pago)
        .bind(monto_pendiente)
        .bind(fecha)
        .fetch_one(executor)
        .await?;

        Ok(venta)
    }

    pub async fn insertar_detalle<'e, E>(
        &self,
        executor: E,
        venta_id: Uuid,
        producto_id: Uuid,
        cantidad: Decimal,
        precio_unitario: Decimal,
        subtotal: Decimal,
        posicion: i32,
    ) -> Result<VentaDetalle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let detalle = sqlx::query_as::<_, VentaDetalle>(
            r#"
            INSERT INTO venta_detalles (venta_id, producto_id, cantidad, precio_unitario, subtotal, posicion)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(venta_id)
        .bind(producto_id)
        .bind(cantidad)
        .bind(precio_unitario)
        .bind(subtotal)
        .bind(posicion)
        .fetch_one(executor)
        .await?;

        Ok(detalle)
    }

    /// Borra la venta; los detalles caen por cascada. Nota: no repone stock,
    /// el historial de descuentos queda como está.
    pub async fn eliminar<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM ventas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }

    // ---
    // Lecturas
    // ---

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Venta>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ventas = sqlx::query_as::<_, Venta>(
            "SELECT * FROM ventas ORDER BY fecha DESC",
        )
        .fetch_all(executor)
        .await?;
        Ok(ventas)
    }

    pub async fn obtener<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Venta>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let venta = sqlx::query_as::<_, Venta>("SELECT * FROM ventas WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(venta)
    }

    pub async fn listar_detalles<'e, E>(
        &self,
        executor: E,
        venta_id: Uuid,
    ) -> Result<Vec<VentaDetalle>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let detalles = sqlx::query_as::<_, VentaDetalle>(
            "SELECT * FROM venta_detalles WHERE venta_id = $1 ORDER BY posicion ASC",
        )
        .bind(venta_id)
        .fetch_all(executor)
        .await?;
        Ok(detalles)
    }

    /// Totales de un día en un snapshot consistente (una sola transacción).
    pub async fn resumen_del_dia<'e, E>(
        &self,
        executor: E,
        fecha: NaiveDate,
    ) -> Result<ResumenDia, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let total_vendido: Decimal = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total), 0) FROM ventas WHERE fecha::date = $1",
        )
        .bind(fecha)
        .fetch_one(&mut *tx)
        .await?;

        let numero_ventas: i64 = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ventas WHERE fecha::date = $1",
        )
        .bind(fecha)
        .fetch_one(&mut *tx)
        .await?;

        let total_fiado: Decimal = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(monto_pendiente), 0)
            FROM ventas
            WHERE fecha::date = $1 AND estado_pago IN ('PENDIENTE', 'PARCIAL')
            "#,
        )
        .bind(fecha)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ResumenDia {
            fecha,
            total_vendido,
            numero_ventas,
            total_fiado,
        })
    }
}
