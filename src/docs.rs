// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo ---
        handlers::catalogo::crear_producto,
        handlers::catalogo::listar_productos,
        handlers::catalogo::obtener_producto,
        handlers::catalogo::editar_producto,
        handlers::catalogo::eliminar_producto,

        // --- Clientes ---
        handlers::clientes::crear_cliente,
        handlers::clientes::listar_clientes,
        handlers::clientes::obtener_cliente,
        handlers::clientes::editar_cliente,
        handlers::clientes::eliminar_cliente,

        // --- Proveedores ---
        handlers::proveedores::crear_proveedor,
        handlers::proveedores::listar_proveedores,
        handlers::proveedores::obtener_proveedor,
        handlers::proveedores::editar_proveedor,
        handlers::proveedores::eliminar_proveedor,

        // --- Ventas ---
        handlers::ventas::registrar_venta,
        handlers::ventas::listar_ventas,
        handlers::ventas::resumen_del_dia,
        handlers::ventas::obtener_venta,
        handlers::ventas::eliminar_venta,

        // --- Deudas ---
        handlers::deudas::listar_clientes_con_deudas,
        handlers::deudas::ventas_de_cliente,
        handlers::deudas::pagar_deuda,

        // --- Eventos ---
        handlers::eventos::suscribir,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::producto::Producto,
            handlers::catalogo::CrearProductoPayload,
            handlers::catalogo::EditarProductoPayload,

            // --- Clientes / Proveedores ---
            models::cliente::Cliente,
            models::proveedor::Proveedor,
            handlers::clientes::CrearClientePayload,
            handlers::clientes::EditarClientePayload,
            handlers::proveedores::CrearProveedorPayload,
            handlers::proveedores::EditarProveedorPayload,

            // --- Ventas ---
            models::venta::EstadoPago,
            models::venta::Venta,
            models::venta::VentaDetalle,
            models::venta::VentaConNombres,
            models::venta::DetalleConNombre,
            models::venta::ResumenDia,
            handlers::ventas::ItemVentaPayload,
            handlers::ventas::RegistrarVentaPayload,

            // --- Deudas ---
            models::deuda::DeudaCliente,
            models::deuda::PagoAplicado,
            handlers::deudas::PagarDeudaPayload,
        )
    ),
    tags(
        (name = "Catálogo", description = "Productos de la bodega"),
        (name = "Clientes", description = "Registro de clientes"),
        (name = "Proveedores", description = "Registro de proveedores"),
        (name = "Ventas", description = "Motor de ventas (descuento de stock atómico)"),
        (name = "Deudas", description = "Libro de deudas y abonos"),
        (name = "Eventos", description = "Avisos de cambio por agregado (SSE)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
