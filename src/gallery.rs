use crate::fractal::FractalKind;

/// Expression génératrice proposée par défaut.
pub const DEFAULT_EXPRESSION: &str = "sin(z**4 + 1.41)";

/// Entrée de la galerie d'exemples : une famille et son expression
/// génératrice.
#[derive(Clone, Copy, Debug)]
pub struct GalleryEntry {
    pub kind: FractalKind,
    pub expression: &'static str,
}

/// Galerie d'expressions génératrices d'exemple, utilisables telles
/// quelles depuis la ligne de commande.
pub const EXAMPLES: &[GalleryEntry] = &[
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "sin(z**12 + cos(0.7*z**12) + 1.41)",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "sin(z**6 + cos(0.7*z**6) + tan(z**3) + 1.41)",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "sin(z**7 + cos(z**5) + tanh(z**3) + 0.61)",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "sin(arcsin(z**7) + arccos(z**5) + arctan(z**3) + 0.61)",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "sin(arccos(z**3 - z**2 + z)+ 0.61)",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "log(arccos(z**3 - z**2 + z)+ 0.61)",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "sin(z**4 + 3.41)*exp(2.5*1J)",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "cos(cosh(z**3) - sinh(z**2) + tanh(z**4))**2",
    },
    GalleryEntry {
        kind: FractalKind::Julia,
        expression: "sin(z**5 + cos(z**5 + sin(z**5 + cos(z**5))) + 1.41)",
    },
];
