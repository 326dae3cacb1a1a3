use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::FractalError;

/// Familles de fractales prises en charge.
///
/// Julia : fonction génératrice fixe appliquée à un point initial variable.
/// Mandelbrot : récurrence fixe `z <- z² + c` avec graine `z = 0`, la
/// constante `c` variant sur le plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractalKind {
    Julia,
    Mandelbrot,
}

impl FractalKind {
    pub fn name(self) -> &'static str {
        match self {
            FractalKind::Julia => "Julia",
            FractalKind::Mandelbrot => "Mandelbrot",
        }
    }

    /// Analyse un nom venant de la ligne de commande.
    /// Un nom inconnu est refusé explicitement, jamais ignoré en silence.
    pub fn from_cli_name(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "julia" => Some(FractalKind::Julia),
            "mandelbrot" => Some(FractalKind::Mandelbrot),
            _ => None,
        }
    }
}

/// Bornes de ressources par requête : une seule génération ne doit pas
/// pouvoir monopoliser le calcul.
pub const MAX_GRID_SIZE: usize = 8192;
pub const MAX_ITERATIONS: u32 = 100_000;

/// Paramètres d'une génération escape-time.
///
/// `n` est le côté de la grille carrée, `xlim`/`ylim` le rectangle
/// échantillonné du plan complexe, `thr` le seuil de divergence et
/// `max_iter` le plafond d'itérations par point.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub n: usize,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub thr: f64,
    pub max_iter: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            n: 256,
            xlim: (-2.0, 2.0),
            ylim: (-2.0, 2.0),
            thr: 2.0,
            max_iter: 10,
        }
    }
}

impl GenerationConfig {
    /// Valide les paramètres avant tout calcul.
    pub fn validate(&self) -> Result<(), FractalError> {
        if self.n == 0 {
            return Err(FractalError::InvalidConfiguration(
                "n doit être >= 1".into(),
            ));
        }
        if self.n > MAX_GRID_SIZE {
            return Err(FractalError::InvalidConfiguration(format!(
                "n = {} dépasse la taille maximale de grille ({})",
                self.n, MAX_GRID_SIZE
            )));
        }
        if self.max_iter == 0 {
            return Err(FractalError::InvalidConfiguration(
                "max_iter doit être >= 1".into(),
            ));
        }
        if self.max_iter > MAX_ITERATIONS {
            return Err(FractalError::InvalidConfiguration(format!(
                "max_iter = {} dépasse le plafond d'itérations ({})",
                self.max_iter, MAX_ITERATIONS
            )));
        }
        if !self.thr.is_finite() || self.thr <= 0.0 {
            return Err(FractalError::InvalidConfiguration(format!(
                "thr doit être fini et > 0 (reçu {})",
                self.thr
            )));
        }
        for (axis, (lo, hi)) in [("xlim", self.xlim), ("ylim", self.ylim)] {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(FractalError::InvalidConfiguration(format!(
                    "{axis} doit être fini (reçu ({lo}, {hi}))"
                )));
            }
            if lo >= hi {
                return Err(FractalError::InvalidConfiguration(format!(
                    "{axis} doit être ordonné (reçu ({lo}, {hi}))"
                )));
            }
        }
        Ok(())
    }
}

/// Fonction génératrice pour la famille Julia : une application pure
/// `z -> f(z)` sur le plan complexe, partageable entre threads.
pub type GeneratingFn<'a> = dyn Fn(Complex64) -> Complex64 + Sync + 'a;

/// Champ fractal produit par une génération : grille carrée n×n de
/// magnitudes, chaque entrée dans [0, thr]. Immutable une fois produit.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalField {
    n: usize,
    data: Vec<f64>,
}

impl FractalField {
    pub(crate) fn from_raw(n: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), n * n);
        FractalField { n, data }
    }

    /// Côté de la grille carrée.
    pub fn side(&self) -> usize {
        self.n
    }

    /// Magnitude à la position (ligne, colonne).
    #[allow(dead_code)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Lignes successives du champ, du haut vers le bas.
    #[allow(dead_code)]
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.n)
    }

    /// Vue brute (ligne par ligne) pour le collaborateur de rendu.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_cli_name() {
        assert_eq!(FractalKind::from_cli_name("julia"), Some(FractalKind::Julia));
        assert_eq!(
            FractalKind::from_cli_name(" Mandelbrot "),
            Some(FractalKind::Mandelbrot)
        );
        assert_eq!(FractalKind::from_cli_name("burning-ship"), None);
        assert_eq!(FractalKind::from_cli_name(""), None);
    }

    #[test]
    fn test_default_config_values() {
        let config = GenerationConfig::default();
        assert_eq!(config.n, 256);
        assert_eq!(config.xlim, (-2.0, 2.0));
        assert_eq!(config.ylim, (-2.0, 2.0));
        assert_eq!(config.thr, 2.0);
        assert_eq!(config.max_iter, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_malformed_configs() {
        let base = GenerationConfig::default();

        let mut c = base.clone();
        c.n = 0;
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));

        let mut c = base.clone();
        c.max_iter = 0;
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));

        let mut c = base.clone();
        c.thr = 0.0;
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));

        let mut c = base.clone();
        c.thr = f64::NAN;
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));

        // Bornes inversées
        let mut c = base.clone();
        c.xlim = (2.0, -2.0);
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));

        let mut c = base.clone();
        c.ylim = (1.0, 1.0);
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));

        let mut c = base.clone();
        c.xlim = (f64::NEG_INFINITY, 0.0);
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_enforces_work_bounds() {
        let mut c = GenerationConfig::default();
        c.n = MAX_GRID_SIZE + 1;
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));

        let mut c = GenerationConfig::default();
        c.max_iter = MAX_ITERATIONS + 1;
        assert!(matches!(
            c.validate(),
            Err(FractalError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_field_indexing() {
        let field = FractalField::from_raw(2, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(field.side(), 2);
        assert_eq!(field.get(0, 1), 1.0);
        assert_eq!(field.get(1, 0), 2.0);
        let rows: Vec<&[f64]> = field.rows().collect();
        assert_eq!(rows, vec![&[0.0, 1.0][..], &[2.0, 3.0][..]]);
    }
}
