// src/handlers/validacion.rs

use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validadores personalizados compartidos por los payloads
// ---

pub fn validar_no_negativo(valor: &Decimal) -> Result<(), ValidationError> {
    if valor.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validar_positivo(valor: &Decimal) -> Result<(), ValidationError> {
    if *valor <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("El valor debe ser mayor que cero.".into());
        return Err(err);
    }
    Ok(())
}

/// Arma un `ValidationErrors` de un solo campo, para los chequeos de
/// consistencia manuales de los payloads.
pub fn error_de_campo(campo: &'static str, error: ValidationError) -> validator::ValidationErrors {
    let mut errores = validator::ValidationErrors::new();
    errores.add(campo, error);
    errores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn no_negativo_acepta_cero() {
        assert!(validar_no_negativo(&Decimal::ZERO).is_ok());
        assert!(validar_no_negativo(&dec("10.5")).is_ok());
        assert!(validar_no_negativo(&dec("-0.01")).is_err());
    }

    #[test]
    fn positivo_rechaza_cero() {
        assert!(validar_positivo(&dec("0.01")).is_ok());
        assert!(validar_positivo(&Decimal::ZERO).is_err());
        assert!(validar_positivo(&dec("-3")).is_err());
    }
}
