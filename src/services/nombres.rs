// src/services/nombres.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClienteRepository, ProductoRepository},
    models::venta::{DetalleConNombre, Venta, VentaConNombres, VentaDetalle},
};

/// Nombre que muestra una venta sin cliente (o cuyo cliente ya no existe).
pub const NOMBRE_CONSUMIDOR_FINAL: &str = "Consumidor Final";
/// Nombre de respaldo cuando el producto de una línea fue eliminado.
pub const NOMBRE_PRODUCTO_ELIMINADO: &str = "Producto no encontrado";

// ---
// Caché de nombres (mapa puro, sin I/O)
// ---
// Resuelto una vez por id dentro de la sesión; se invalida explícitamente
// cuando la entidad subyacente se edita o elimina.
#[derive(Clone, Default)]
pub struct CacheNombres {
    productos: Arc<Mutex<HashMap<Uuid, String>>>,
    clientes: Arc<Mutex<HashMap<Uuid, String>>>,
}

impl CacheNombres {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn producto(&self, id: Uuid) -> Option<String> {
        self.productos.lock().expect("caché de productos").get(&id).cloned()
    }

    pub fn guardar_producto(&self, id: Uuid, nombre: &str) {
        self.productos
            .lock()
            .expect("caché de productos")
            .insert(id, nombre.to_string());
    }

    pub fn invalidar_producto(&self, id: Uuid) {
        self.productos.lock().expect("caché de productos").remove(&id);
    }

    pub fn cliente(&self, id: Uuid) -> Option<String> {
        self.clientes.lock().expect("caché de clientes").get(&id).cloned()
    }

    pub fn guardar_cliente(&self, id: Uuid, nombre: &str) {
        self.clientes
            .lock()
            .expect("caché de clientes")
            .insert(id, nombre.to_string());
    }

    pub fn invalidar_cliente(&self, id: Uuid) {
        self.clientes.lock().expect("caché de clientes").remove(&id);
    }
}

// ---
// Resolutor (caché + tienda)
// ---
// Propiedad de la capa de lectura: las proyecciones denormalizadas piden
// nombres aquí y solo tocan la base en un fallo de caché.
#[derive(Clone)]
pub struct ResolutorNombres {
    cache: CacheNombres,
    producto_repo: ProductoRepository,
    cliente_repo: ClienteRepository,
    pool: PgPool,
}

impl ResolutorNombres {
    pub fn new(
        cache: CacheNombres,
        producto_repo: ProductoRepository,
        cliente_repo: ClienteRepository,
        pool: PgPool,
    ) -> Self {
        Self { cache, producto_repo, cliente_repo, pool }
    }

    pub async fn resolver_producto(&self, id: Uuid) -> Result<String, AppError> {
        if let Some(nombre) = self.cache.producto(id) {
            return Ok(nombre);
        }
        match self.producto_repo.obtener_nombre(&self.pool, id).await? {
            Some(nombre) => {
                self.cache.guardar_producto(id, &nombre);
                Ok(nombre)
            }
            // El producto fue eliminado del catálogo; la línea de venta
            // conserva el id y se muestra con el nombre de respaldo.
            None => Ok(NOMBRE_PRODUCTO_ELIMINADO.to_string()),
        }
    }

    pub async fn resolver_cliente(&self, id: Option<Uuid>) -> Result<String, AppError> {
        let Some(id) = id else {
            return Ok(NOMBRE_CONSUMIDOR_FINAL.to_string());
        };
        if let Some(nombre) = self.cache.cliente(id) {
            return Ok(nombre);
        }
        match self.cliente_repo.obtener_nombre(&self.pool, id).await? {
            Some(nombre) => {
                self.cache.guardar_cliente(id, &nombre);
                Ok(nombre)
            }
            None => Ok(NOMBRE_CONSUMIDOR_FINAL.to_string()),
        }
    }

    /// Proyección denormalizada de una venta: ids → nombres visibles.
    pub async fn proyectar_venta(
        &self,
        venta: &Venta,
        detalles: &[VentaDetalle],
    ) -> Result<VentaConNombres, AppError> {
        let cliente_nombre = self.resolver_cliente(venta.cliente_id).await?;

        let mut con_nombres = Vec::with_capacity(detalles.len());
        for detalle in detalles {
            con_nombres.push(DetalleConNombre {
                producto_id: detalle.producto_id,
                producto_nombre: self.resolver_producto(detalle.producto_id).await?,
                cantidad: detalle.cantidad,
                precio_unitario: detalle.precio_unitario,
                subtotal: detalle.subtotal,
            });
        }

        Ok(VentaConNombres {
            id: venta.id,
            cliente_id: venta.cliente_id,
            cliente_nombre,
            total: venta.total,
            estado_pago: venta.estado_pago,
            monto_pendiente: venta.monto_pendiente,
            fecha: venta.fecha,
            detalles: con_nombres,
        })
    }

    // Atajos de invalidación para los servicios que escriben.

    pub fn guardar_producto(&self, id: Uuid, nombre: &str) {
        self.cache.guardar_producto(id, nombre);
    }

    pub fn invalidar_producto(&self, id: Uuid) {
        self.cache.invalidar_producto(id);
    }

    pub fn guardar_cliente(&self, id: Uuid, nombre: &str) {
        self.cache.guardar_cliente(id, nombre);
    }

    pub fn invalidar_cliente(&self, id: Uuid) {
        self.cache.invalidar_cliente(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarda_y_recupera_nombres() {
        let cache = CacheNombres::new();
        let id = Uuid::new_v4();

        assert_eq!(cache.producto(id), None);
        cache.guardar_producto(id, "Arroz 1kg");
        assert_eq!(cache.producto(id), Some("Arroz 1kg".to_string()));
    }

    #[test]
    fn invalidar_borra_la_entrada() {
        let cache = CacheNombres::new();
        let id = Uuid::new_v4();

        cache.guardar_cliente(id, "María");
        cache.invalidar_cliente(id);
        assert_eq!(cache.cliente(id), None);
    }

    #[test]
    fn los_clones_comparten_estado() {
        // El servicio de catálogo invalida y el de ventas debe verlo.
        let cache = CacheNombres::new();
        let copia = cache.clone();
        let id = Uuid::new_v4();

        cache.guardar_producto(id, "Lentejas");
        assert_eq!(copia.producto(id), Some("Lentejas".to_string()));

        copia.invalidar_producto(id);
        assert_eq!(cache.producto(id), None);
    }

    #[test]
    fn productos_y_clientes_no_se_mezclan() {
        let cache = CacheNombres::new();
        let id = Uuid::new_v4();

        cache.guardar_producto(id, "Azúcar");
        assert_eq!(cache.cliente(id), None);
    }
}
