// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    common::eventos::BusEventos,
    db::{
        ClienteRepository, DeudaRepository, ProductoRepository, ProveedorRepository,
        VentaRepository,
    },
    services::{
        CacheNombres, CatalogoService, ClientesService, DeudasService, ProveedoresService,
        ResolutorNombres, VentasService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub bus: BusEventos,
    pub catalogo_service: CatalogoService,
    pub clientes_service: ClientesService,
    pub proveedores_service: ProveedoresService,
    pub ventas_service: VentasService,
    pub deudas_service: DeudasService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        // Secreto compartido con el proveedor de identidad externo; aquí
        // solo se validan sus tokens.
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida!");

        // --- Arma el grafo de dependencias ---
        let producto_repo = ProductoRepository::new(db_pool.clone());
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let proveedor_repo = ProveedorRepository::new(db_pool.clone());
        let venta_repo = VentaRepository::new(db_pool.clone());
        let deuda_repo = DeudaRepository::new(db_pool.clone());

        let bus = BusEventos::new();
        let nombres = ResolutorNombres::new(
            CacheNombres::new(),
            producto_repo.clone(),
            cliente_repo.clone(),
            db_pool.clone(),
        );

        let catalogo_service =
            CatalogoService::new(producto_repo.clone(), nombres.clone(), bus.clone());
        let clientes_service = ClientesService::new(cliente_repo, nombres.clone());
        let proveedores_service = ProveedoresService::new(proveedor_repo);
        let ventas_service =
            VentasService::new(venta_repo.clone(), producto_repo, nombres.clone(), bus.clone());
        let deudas_service = DeudasService::new(deuda_repo, venta_repo, nombres, bus.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            bus,
            catalogo_service,
            clientes_service,
            proveedores_service,
            ventas_service,
            deudas_service,
        })
    }
}
