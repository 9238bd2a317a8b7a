// src/services/proveedores_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, db::ProveedorRepository, models::proveedor::Proveedor};

#[derive(Clone)]
pub struct ProveedoresService {
    proveedor_repo: ProveedorRepository,
}

impl ProveedoresService {
    pub fn new(proveedor_repo: ProveedorRepository) -> Self {
        Self { proveedor_repo }
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Proveedor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.proveedor_repo.listar(executor).await
    }

    pub async fn obtener<'e, E>(&self, executor: E, id: Uuid) -> Result<Proveedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.proveedor_repo
            .obtener(executor, id)
            .await?
            .ok_or(AppError::NotFound("Proveedor", id))
    }

    pub async fn crear_proveedor<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        ruc: Option<&str>,
        telefono: Option<&str>,
    ) -> Result<Proveedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let proveedor = self.proveedor_repo.crear(executor, nombre, ruc, telefono).await?;
        tracing::info!(id = %proveedor.id, "Proveedor creado");
        Ok(proveedor)
    }

    pub async fn editar_proveedor<'e, E>(
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
        self.proveedor_repo
            .actualizar(executor, id, nombre, ruc, telefono)
            .await
    }

    pub async fn eliminar_proveedor<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas = self.proveedor_repo.eliminar(executor, id).await?;
        if filas == 0 {
            return Err(AppError::NotFound("Proveedor", id));
        }
        Ok(())
    }
}
