pub mod catalogo_service;
pub use catalogo_service::CatalogoService;
pub mod clientes_service;
pub use clientes_service::ClientesService;
pub mod proveedores_service;
pub use proveedores_service::ProveedoresService;
pub mod ventas_service;
pub use ventas_service::VentasService;
pub mod deudas_service;
pub use deudas_service::DeudasService;
pub mod nombres;
pub use nombres::{CacheNombres, ResolutorNombres};
