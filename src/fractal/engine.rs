use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use num_complex::Complex64;
use rayon::prelude::*;

use crate::error::FractalError;
use crate::fractal::grid::sample_axes;
use crate::fractal::{FractalField, FractalKind, GenerationConfig, GeneratingFn};

/// Calcule le champ fractal pour la famille et la configuration données.
///
/// `function` est exigée pour la famille Julia et ignorée pour Mandelbrot.
/// Le calcul est parallélisé par lignes avec rayon ; les cellules sont
/// indépendantes, le résultat est identique au parcours séquentiel.
pub fn generate(
    kind: FractalKind,
    config: &GenerationConfig,
    function: Option<&GeneratingFn<'_>>,
) -> Result<FractalField, FractalError> {
    config.validate()?;
    // Some ssi Julia ; pour Mandelbrot une fonction fournie est ignorée.
    let julia_fn = match kind {
        FractalKind::Julia => Some(require_function(function)?),
        FractalKind::Mandelbrot => None,
    };

    let (xs, ys) = sample_axes(config);
    let n = config.n;
    let mut data = vec![0.0f64; n * n];

    match julia_fn {
        Some(f) => {
            // La ligne ix balaye l'axe x, la colonne iy l'axe y.
            data.par_chunks_mut(n).enumerate().for_each(|(ix, row)| {
                let x = xs[ix];
                for (iy, cell) in row.iter_mut().enumerate() {
                    let z0 = Complex64::new(x, ys[iy]);
                    *cell = iterate_julia(f, z0, config.thr, config.max_iter)
                        .unwrap_or(config.thr);
                }
            });
        }
        None => {
            // Convention d'orientation transposée : la ligne iy balaye
            // l'axe y, la colonne ix l'axe x.
            data.par_chunks_mut(n).enumerate().for_each(|(iy, row)| {
                let y = ys[iy];
                for (ix, cell) in row.iter_mut().enumerate() {
                    let c = Complex64::new(xs[ix], y);
                    *cell = iterate_mandelbrot(c, config.thr, config.max_iter);
                }
            });
        }
    }

    Ok(FractalField::from_raw(n, data))
}

/// Version annulable de `generate`.
/// Retourne `Ok(None)` si le drapeau est levé, `Ok(Some(champ))` sinon.
/// L'annulation est vérifiée toutes les 16 lignes.
#[allow(dead_code)]
pub fn generate_cancellable(
    kind: FractalKind,
    config: &GenerationConfig,
    function: Option<&GeneratingFn<'_>>,
    cancel: &Arc<AtomicBool>,
) -> Result<Option<FractalField>, FractalError> {
    config.validate()?;
    // Some ssi Julia ; pour Mandelbrot une fonction fournie est ignorée.
    let julia_fn = match kind {
        FractalKind::Julia => Some(require_function(function)?),
        FractalKind::Mandelbrot => None,
    };

    // Vérifier l'annulation avant de commencer
    if cancel.load(Ordering::Relaxed) {
        return Ok(None);
    }

    let (xs, ys) = sample_axes(config);
    let n = config.n;
    let mut data = vec![0.0f64; n * n];

    // Drapeau interne pour propager l'annulation aux threads rayon
    let cancelled = AtomicBool::new(false);

    match julia_fn {
        Some(f) => {
            data.par_chunks_mut(n).enumerate().for_each(|(ix, row)| {
                if ix % 16 == 0 && cancel.load(Ordering::Relaxed) {
                    cancelled.store(true, Ordering::Relaxed);
                    return;
                }
                if cancelled.load(Ordering::Relaxed) {
                    return;
                }
                let x = xs[ix];
                for (iy, cell) in row.iter_mut().enumerate() {
                    let z0 = Complex64::new(x, ys[iy]);
                    *cell = iterate_julia(f, z0, config.thr, config.max_iter)
                        .unwrap_or(config.thr);
                }
            });
        }
        None => {
            data.par_chunks_mut(n).enumerate().for_each(|(iy, row)| {
                if iy % 16 == 0 && cancel.load(Ordering::Relaxed) {
                    cancelled.store(true, Ordering::Relaxed);
                    return;
                }
                if cancelled.load(Ordering::Relaxed) {
                    return;
                }
                let y = ys[iy];
                for (ix, cell) in row.iter_mut().enumerate() {
                    let c = Complex64::new(xs[ix], y);
                    *cell = iterate_mandelbrot(c, config.thr, config.max_iter);
                }
            });
        }
    }

    if cancelled.load(Ordering::Relaxed) {
        Ok(None)
    } else {
        Ok(Some(FractalField::from_raw(n, data)))
    }
}

/// La famille Julia exige une fonction génératrice explicite : jamais de
/// repli silencieux sur une fonction par défaut.
fn require_function<'a>(
    function: Option<&'a GeneratingFn<'a>>,
) -> Result<&'a GeneratingFn<'a>, FractalError> {
    function.ok_or_else(|| {
        FractalError::InvalidConfiguration(
            "la famille Julia exige une fonction génératrice explicite".into(),
        )
    })
}

/// Itère la fonction génératrice depuis `z0` et retourne la magnitude
/// finale, écrêtée à `thr` dès que l'orbite s'échappe.
///
/// Le test de divergence court après chaque application : un point qui part
/// au-delà du seuil consomme quand même une itération. Un résultat non fini
/// est signalé comme `DivergentEvaluation` ; l'appelant le rattrape point
/// par point.
fn iterate_julia(
    f: &GeneratingFn<'_>,
    z0: Complex64,
    thr: f64,
    max_iter: u32,
) -> Result<f64, FractalError> {
    let mut z = z0;
    for _ in 0..max_iter {
        z = f(z);
        if !z.re.is_finite() || !z.im.is_finite() {
            return Err(FractalError::DivergentEvaluation { re: z.re, im: z.im });
        }
        if z.norm() >= thr {
            // Substitution par la valeur réelle du seuil, arrêt anticipé.
            return Ok(thr);
        }
    }
    Ok(z.norm())
}

/// Itère `z <- z² + c` depuis la graine 0 et retourne la magnitude finale,
/// écrêtée à `thr`. Un débordement f64 (seuils énormes) compte comme une
/// divergence immédiate.
fn iterate_mandelbrot(c: Complex64, thr: f64, max_iter: u32) -> f64 {
    let mut z = Complex64::new(0.0, 0.0);
    for _ in 0..max_iter {
        z = z * z + c;
        if !z.re.is_finite() || !z.im.is_finite() {
            return thr;
        }
        if z.norm() >= thr {
            return thr;
        }
    }
    z.norm()
}
