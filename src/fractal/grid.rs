use crate::fractal::GenerationConfig;

/// Échantillonne `n` réels régulièrement espacés sur `[start, stop]`,
/// bornes incluses.
///
/// Le dernier élément est épinglé exactement à `stop` pour que les bornes
/// soient restituées sans erreur d'arrondi. Les entrées sont pré-validées
/// par l'appelant (`GenerationConfig::validate`), pas de mode d'échec ici.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    values[n - 1] = stop;
    values
}

/// Construit les deux axes d'échantillonnage de la grille : la coordonnée
/// complexe de l'indice (ix, iy) est `x_space[ix] + i*y_space[iy]`.
pub fn sample_axes(config: &GenerationConfig) -> (Vec<f64>, Vec<f64>) {
    let (x0, x1) = config.xlim;
    let (y0, y1) = config.ylim;
    (linspace(x0, x1, config.n), linspace(y0, y1, config.n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_and_length() {
        let xs = linspace(-2.0, 2.0, 5);
        assert_eq!(xs.len(), 5);
        assert_eq!(xs[0], -2.0);
        assert_eq!(xs[4], 2.0);
        assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_linspace_strictly_increasing() {
        let xs = linspace(-1.5, 0.75, 97);
        assert_eq!(xs[0], -1.5);
        assert_eq!(xs[96], 0.75);
        for w in xs.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn test_linspace_single_point() {
        assert_eq!(linspace(-2.0, 2.0, 1), vec![-2.0]);
    }

    #[test]
    fn test_sample_axes_follows_config() {
        let config = GenerationConfig {
            n: 3,
            xlim: (-2.0, 2.0),
            ylim: (0.0, 1.0),
            ..GenerationConfig::default()
        };
        let (xs, ys) = sample_axes(&config);
        assert_eq!(xs, vec![-2.0, 0.0, 2.0]);
        assert_eq!(ys, vec![0.0, 0.5, 1.0]);
    }
}
