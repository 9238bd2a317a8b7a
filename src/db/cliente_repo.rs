// src/db/cliente_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::cliente::Cliente};

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clientes = sqlx::query_as::<_, Cliente>(
            "SELECT * FROM clientes ORDER BY nombre ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(clientes)
    }

    pub async fn obtener<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(cliente)
    }

    pub async fn obtener_nombre<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let nombre = sqlx::query_scalar::<_, String>("SELECT nombre FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(nombre)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        correo: Option<&str>,
        telefono: Option<&str>,
    ) -> Result<Cliente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (nombre, correo, telefono)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(nombre)
        .bind(correo)
        .bind(telefono)
        .fetch_one(executor)
        .await?;

        Ok(cliente)
    }

    // Un campo en NULL conserva el valor vigente.
    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre: Option<&str>,
        correo: Option<&str>,
        telefono: Option<&str>,
    ) -> Result<Cliente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes SET
                nombre = COALESCE($2, nombre),
                correo = COALESCE($3, correo),
                telefono = COALESCE($4, telefono)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre)
        .bind(correo)
        .bind(telefono)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Cliente", id))?;

        Ok(cliente)
    }

    pub async fn eliminar<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let resultado = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(resultado.rows_affected())
    }
}
