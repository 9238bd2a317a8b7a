// src/services/catalogo_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        eventos::{BusEventos, EventoProducto},
    },
    db::ProductoRepository,
    models::producto::{CambiosProducto, Producto, es_categoria_especial, normalizar_stock},
    services::nombres::ResolutorNombres,
};

#[derive(Clone)]
pub struct CatalogoService {
    producto_repo: ProductoRepository,
    nombres: ResolutorNombres,
    bus: BusEventos,
}

impl CatalogoService {
    pub fn new(
        producto_repo: ProductoRepository,
        nombres: ResolutorNombres,
        bus: BusEventos,
    ) -> Self {
        Self { producto_repo, nombres, bus }
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Producto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.producto_repo.listar(executor).await
    }

    pub async fn obtener<'e, E>(&self, executor: E, id: Uuid) -> Result<Producto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.producto_repo
            .obtener(executor, id)
            .await?
            .ok_or(AppError::NotFound("Producto", id))
    }

    // La categoría manda: especial ⇒ sin control de unidades; normal ⇒
    // stock obligatorio.
    pub async fn crear_producto<'e, E>(
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
        let stock = normalizar_stock(categoria, stock);
        if !es_categoria_especial(categoria) && stock.is_none() {
            return Err(AppError::StockRequerido(categoria.to_string()));
        }

        let producto = self
            .producto_repo
            .crear(executor, nombre, precio, categoria, stock, marca, fecha_vencimiento)
            .await?;

        self.nombres.guardar_producto(producto.id, &producto.nombre);
        self.bus.publicar_producto(EventoProducto::Creado { id: producto.id });
        tracing::info!(id = %producto.id, nombre = %producto.nombre, "Producto creado");

        Ok(producto)
    }

    pub async fn editar_producto<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        cambios: CambiosProducto,
    ) -> Result<Producto, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let actual = self
            .producto_repo
            .obtener(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Producto", id))?;

        let nuevo = actual.con_cambios(&cambios);
        if !nuevo.es_especial() && nuevo.stock.is_none() {
            return Err(AppError::StockRequerido(nuevo.categoria));
        }

        let actualizado = self.producto_repo.actualizar(&mut *tx, &nuevo).await?;
        tx.commit().await?;

        self.nombres.invalidar_producto(id);
        self.bus.publicar_producto(EventoProducto::Actualizado { id });

        Ok(actualizado)
    }

    /// Elimina el producto del catálogo. Las ventas que lo referencian no se
    /// tocan: sus líneas quedan con el id colgando y la proyección de
    /// lectura lo muestra como "Producto no encontrado".
    pub async fn eliminar_producto<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas = self.producto_repo.eliminar(executor, id).await?;
        if filas == 0 {
            return Err(AppError::NotFound("Producto", id));
        }

        self.nombres.invalidar_producto(id);
        self.bus.publicar_producto(EventoProducto::Eliminado { id });
        tracing::info!(id = %id, "Producto eliminado");

        Ok(())
    }
}
