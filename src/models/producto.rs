// src/models/producto.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Categorías vendidas por peso o por referencia: no llevan control de
// unidades y su stock queda sin especificar.
pub const CATEGORIAS_ESPECIALES: [&str; 4] = [
    "Préstamo",
    "Frutas y Verduras",
    "Alimentos a Granel",
    "Nutrición Animal",
];

pub fn es_categoria_especial(categoria: &str) -> bool {
    CATEGORIAS_ESPECIALES.contains(&categoria)
}

/// Fuerza el sentinela "sin stock" cuando la categoría resultante es especial.
pub fn normalizar_stock(categoria: &str, stock: Option<i32>) -> Option<i32> {
    if es_categoria_especial(categoria) { None } else { stock }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: Uuid,

    #[schema(example = "Arroz 1kg")]
    pub nombre: String,

    #[schema(example = "12.50")]
    pub precio: Decimal,

    #[schema(example = "Abarrotes")]
    pub categoria: String,

    /// `None` = sin control de unidades (categoría especial).
    pub stock: Option<i32>,

    pub marca: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2026-12-31")]
    pub fecha_vencimiento: Option<NaiveDate>,

    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

impl Producto {
    pub fn es_especial(&self) -> bool {
        es_categoria_especial(&self.categoria)
    }

    /// Mezcla un parche parcial sobre el producto actual. Un campo en `None`
    /// conserva el valor vigente; el stock se renormaliza contra la
    /// categoría resultante.
    pub fn con_cambios(&self, cambios: &CambiosProducto) -> Producto {
        let categoria = cambios
            .categoria
            .clone()
            .unwrap_or_else(|| self.categoria.clone());
        let stock = normalizar_stock(&categoria, cambios.stock.or(self.stock));

        Producto {
            id: self.id,
            nombre: cambios.nombre.clone().unwrap_or_else(|| self.nombre.clone()),
            precio: cambios.precio.unwrap_or(self.precio),
            categoria,
            stock,
            marca: cambios.marca.clone().or_else(|| self.marca.clone()),
            fecha_vencimiento: cambios.fecha_vencimiento.or(self.fecha_vencimiento),
            fecha_creacion: self.fecha_creacion,
            fecha_actualizacion: self.fecha_actualizacion,
        }
    }
}

/// Parche de edición: solo viajan los campos que cambian.
#[derive(Debug, Clone, Default)]
pub struct CambiosProducto {
    pub nombre: Option<String>,
    pub precio: Option<Decimal>,
    pub categoria: Option<String>,
    pub stock: Option<i32>,
    pub marca: Option<String>,
    pub fecha_vencimiento: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn producto_base() -> Producto {
        Producto {
            id: Uuid::new_v4(),
            nombre: "Arroz 1kg".to_string(),
            precio: dec("12.50"),
            categoria: "Abarrotes".to_string(),
            stock: Some(10),
            marca: Some("Costeño".to_string()),
            fecha_vencimiento: None,
            fecha_creacion: Utc::now(),
            fecha_actualizacion: Utc::now(),
        }
    }

    #[test]
    fn reconoce_las_categorias_especiales() {
        assert!(es_categoria_especial("Frutas y Verduras"));
        assert!(es_categoria_especial("Préstamo"));
        assert!(es_categoria_especial("Alimentos a Granel"));
        assert!(es_categoria_especial("Nutrición Animal"));
        assert!(!es_categoria_especial("Abarrotes"));
        assert!(!es_categoria_especial("Bebidas"));
    }

    #[test]
    fn normalizar_stock_fuerza_el_sentinela_en_especiales() {
        assert_eq!(normalizar_stock("Frutas y Verduras", Some(8)), None);
        assert_eq!(normalizar_stock("Abarrotes", Some(8)), Some(8));
        assert_eq!(normalizar_stock("Abarrotes", None), None);
    }

    #[test]
    fn con_cambios_conserva_lo_no_parchado() {
        let actual = producto_base();
        let cambios = CambiosProducto {
            precio: Some(dec("13.00")),
            ..Default::default()
        };

        let nuevo = actual.con_cambios(&cambios);
        assert_eq!(nuevo.precio, dec("13.00"));
        assert_eq!(nuevo.nombre, actual.nombre);
        assert_eq!(nuevo.stock, Some(10));
        assert_eq!(nuevo.id, actual.id);
    }

    #[test]
    fn cambiar_a_categoria_especial_descarta_el_stock() {
        let actual = producto_base();
        let cambios = CambiosProducto {
            categoria: Some("Alimentos a Granel".to_string()),
            ..Default::default()
        };

        let nuevo = actual.con_cambios(&cambios);
        assert_eq!(nuevo.stock, None);
    }

    #[test]
    fn cambiar_desde_especial_acepta_stock_nuevo() {
        let mut actual = producto_base();
        actual.categoria = "Frutas y Verduras".to_string();
        actual.stock = None;

        let cambios = CambiosProducto {
            categoria: Some("Abarrotes".to_string()),
            stock: Some(5),
            ..Default::default()
        };

        let nuevo = actual.con_cambios(&cambios);
        assert_eq!(nuevo.stock, Some(5));
    }
}
