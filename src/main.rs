//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaración de nuestros módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

// Importaciones principales
use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa el logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien aquí: si la configuración falla, la aplicación no
    // debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    // Corre las migraciones de SQLx al arrancar
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al correr las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas con éxito!");

    // Catálogo de productos
    let catalogo_routes = Router::new()
        .route(
            "/productos",
            post(handlers::catalogo::crear_producto).get(handlers::catalogo::listar_productos),
        )
        .route(
            "/productos/{id}",
            get(handlers::catalogo::obtener_producto)
                .put(handlers::catalogo::editar_producto)
                .delete(handlers::catalogo::eliminar_producto),
        );

    // Registros de partes (clientes y proveedores)
    let clientes_routes = Router::new()
        .route(
            "/",
            post(handlers::clientes::crear_cliente).get(handlers::clientes::listar_clientes),
        )
        .route(
            "/{id}",
            get(handlers::clientes::obtener_cliente)
                .put(handlers::clientes::editar_cliente)
                .delete(handlers::clientes::eliminar_cliente),
        );

    let proveedores_routes = Router::new()
        .route(
            "/",
            post(handlers::proveedores::crear_proveedor)
                .get(handlers::proveedores::listar_proveedores),
        )
        .route(
            "/{id}",
            get(handlers::proveedores::obtener_proveedor)
                .put(handlers::proveedores::editar_proveedor)
                .delete(handlers::proveedores::eliminar_proveedor),
        );

    // Motor de ventas. Ojo: /resumen va antes que /{id} en la lectura,
    // pero axum enruta por literal primero, así que el orden no importa.
    let ventas_routes = Router::new()
        .route(
            "/",
            post(handlers::ventas::registrar_venta).get(handlers::ventas::listar_ventas),
        )
        .route("/resumen", get(handlers::ventas::resumen_del_dia))
        .route(
            "/{id}",
            get(handlers::ventas::obtener_venta).delete(handlers::ventas::eliminar_venta),
        );

    // Libro de deudas
    let deudas_routes = Router::new()
        .route("/", get(handlers::deudas::listar_clientes_con_deudas))
        .route("/clientes/{clienteId}", get(handlers::deudas::ventas_de_cliente))
        .route("/ventas/{ventaId}/pagos", post(handlers::deudas::pagar_deuda));

    // Avisos de cambio por agregado (SSE)
    let eventos_routes = Router::new().route("/{agregado}", get(handlers::eventos::suscribir));

    // Combina todo en el router principal; todo menos /api/health pasa por
    // el guard de autenticación.
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest(
            "/api/catalogo",
            catalogo_routes.layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        )
        .nest(
            "/api/clientes",
            clientes_routes.layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        )
        .nest(
            "/api/proveedores",
            proveedores_routes.layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        )
        .nest(
            "/api/ventas",
            ventas_routes.layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        )
        .nest(
            "/api/deudas",
            deudas_routes.layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        )
        .nest(
            "/api/eventos",
            eventos_routes.layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Arranca el servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Error en el servidor Axum");
}
