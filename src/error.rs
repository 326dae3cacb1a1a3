use thiserror::Error;

/// Erreurs structurées du générateur de fractales.
///
/// `InvalidConfiguration` et `InvalidExpression` sont rejetées avant tout
/// calcul. `DivergentEvaluation` est un signal par point : le moteur le
/// rattrape localement et enregistre le point comme divergent (magnitude =
/// seuil), il ne remonte jamais jusqu'à l'appelant de `generate`.
#[derive(Debug, Error)]
pub enum FractalError {
    #[error("configuration invalide: {0}")]
    InvalidConfiguration(String),

    #[error("expression invalide à la position {position}: {message}")]
    InvalidExpression { message: String, position: usize },

    #[error("évaluation divergente: résultat non fini ({re}, {im})")]
    DivergentEvaluation { re: f64, im: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = FractalError::InvalidConfiguration("n doit être >= 1".into());
        assert!(e.to_string().contains("configuration invalide"));

        let e = FractalError::InvalidExpression {
            message: "caractère inattendu '#'".into(),
            position: 3,
        };
        let msg = e.to_string();
        assert!(msg.contains("position 3"));
        assert!(msg.contains("caractère inattendu"));

        let e = FractalError::DivergentEvaluation {
            re: f64::INFINITY,
            im: 0.0,
        };
        assert!(e.to_string().contains("non fini"));
    }
}
