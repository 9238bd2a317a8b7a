// src/db/proveedor_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::proveedor::Proveedor};

#[derive(Clone)]
pub struct ProveedorRepository {
    pool: PgPool,
}

impl ProveedorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Proveedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proveedores = sqlx::query_as::<_, Proveedor>(
            "SELECT * FROM proveedores ORDER BY nombre ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(proveedores)
    }

    pub async fn obtener<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Proveedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proveedor = sqlx::query_as::<_, Proveedor>("SELECT * FROM proveedores WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(proveedor)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        ruc: Option<&str>,
        telefono: Option<&str>,
    ) -> Result<Proveedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proveedor = sqlx::query_as::<_, Proveedor>(
            r#"
            INSERT INTO proveedores (nombre, ruc, telefono)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(ruc)
        .bind(telefono)
        .fetch_one(executor)
        .await?;

        Ok(proveedor)
    }

    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre: Option<&str>,
        ruc: Option<&str>,
        telefono: Option<&str>,
    ) -> Result<Proveedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proveedor = sqlx::query_as::<_, Proveedor>(
            r#"
            UPDATE proveedores SET
                nombre = COALESCE($2, nombre),
                ruc = COALESCE($3, ruc),
                telefono = COALESCE($4, telefono)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(ruc)
        .bind(telefono)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Proveedor", id))?;

        Ok(proveedor)
    }

    pub async fn eliminar<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM proveedores WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }
}
