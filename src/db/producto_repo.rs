// src/db/producto_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::producto::Producto};

#[derive(Clone)]
pub struct ProductoRepository {
    pool: PgPool,
}

impl ProductoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Lecturas
    // ---

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Producto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let productos = sqlx::query_as::<_, Producto>(
            "SELECT * FROM productos ORDER BY nombre ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(productos)
    }

    pub async fn obtener<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Producto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let producto = sqlx::query_as::<_, Producto>(
            "SELECT * FROM productos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(producto)
    }

    /// Lectura puntual para la caché de nombres.
    pub async fn obtener_nombre<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let nombre = sqlx::query_scalar::<_, String>(
            "SELECT nombre FROM productos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(nombre)
    }

    // ---
    // Escrituras
    // ---

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        precio: Decimal,
        categoria: &str,
        stock: Option<i32>,
        marca: Option<&str>,
        fecha_vencimiento: Option<NaiveDate>,
    ) -> Result<Producto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let producto = sqlx::query_as::<_, Producto>(
            r#"
            INSERT INTO productos (nombre, precio, categoria, stock, marca, fecha_vencimiento)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(precio)
        .bind(categoria)
        .bind(stock)
        .bind(marca)
        .bind(fecha_vencimiento)
        .fetch_one(executor)
        .await?;

        Ok(producto)
    }

    /// Guarda el producto completo (el servicio ya mezcló el parche).
    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        producto: &Producto,
    ) -> Result<Producto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let actualizado = sqlx::query_as::<_, Producto>(
            r#"
            UPDATE productos SET
                nombre = $2,
                precio = $3,
                categoria = $4,
                stock = $5,
                marca = $6,
                fecha_vencimiento = $7,
                fecha_actualizacion = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(producto.id)
        .bind(&producto.nombre)
        .bind(producto.precio)
        .bind(&producto.categoria)
        .bind(producto.stock)
        .bind(&producto.marca)
        .bind(producto.fecha_vencimiento)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Producto", producto.id))?;

        Ok(actualizado)
    }

    pub async fn eliminar<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }

    /// Descuento condicional de stock: el chequeo ES el decremento.
    ///
    /// Cero filas afectadas significa que el stock no alcanzaba (o que el
    /// producto no existe; quien llama ya lo leyó dentro de la misma
    /// transacción). Así no hay ventana entre "leer" y "descontar" en la
    /// que otra venta pueda colarse.
    pub async fn descontar_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        cantidad: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query(
            r#"
            UPDATE productos
            SET stock = stock - $2, fecha_actualizacion = NOW()
            WHERE id = $1 AND stock >= $2
            "#,
        )
        .bind(id)
        .bind(cantidad)
        .execute(executor)
        .await?;

        Ok(resultado.rows_affected())
    }
}
