// src/services/clientes_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClienteRepository,
    models::cliente::Cliente,
    services::nombres::ResolutorNombres,
};

#[derive(Clone)]
pub struct ClientesService {
    cliente_repo: ClienteRepository,
    nombres: ResolutorNombres,
}

impl ClientesService {
    pub fn new(cliente_repo: ClienteRepository, nombres: ResolutorNombres) -> Self {
        Self { cliente_repo, nombres }
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.cliente_repo.listar(executor).await
    }

    pub async fn obtener<'e, E>(&self, executor: E, id: Uuid) -> Result<Cliente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.cliente_repo
            .obtener(executor, id)
            .await?
            .ok_or(AppError::NotFound("Cliente", id))
    }

    pub async fn crear_cliente<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        correo: Option<&str>,
        telefono: Option<&str>,
    ) -> Result<Cliente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = self.cliente_repo.crear(executor, nombre, correo, telefono).await?;
        self.nombres.guardar_cliente(cliente.id, &cliente.nombre);
        tracing::info!(id = %cliente.id, "Cliente creado");
        Ok(cliente)
    }

    pub async fn editar_cliente<'e, E>(
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
        let cliente = self
            .cliente_repo
            .actualizar(executor, id, nombre, correo, telefono)
            .await?;
        // El nombre pudo cambiar: la próxima proyección lo vuelve a leer.
        self.nombres.invalidar_cliente(id);
        Ok(cliente)
    }

    /// Elimina el registro. Sus ventas quedan: la proyección resuelve el id
    /// colgando al nombre anónimo por defecto.
    pub async fn eliminar_cliente<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas = self.cliente_repo.eliminar(executor, id).await?;
        if filas == 0 {
            return Err(AppError::NotFound("Cliente", id));
        }
        self.nombres.invalidar_cliente(id);
        tracing::info!(id = %id, "Cliente eliminado");
        Ok(())
    }
}
