use serde::{Deserialize, Serialize};

/// Colormaps proposés pour le rendu : `orrd`, `inferno_r`, `hot_r`,
/// `jet_r`, `purples`, `agsunset_r`. Le suffixe `_r` marque un gradient
/// renversé ; les bornes ci-dessous sont déjà dans l'ordre renversé.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colormap {
    OrRd,
    InfernoR,
    HotR,
    JetR,
    Purples,
    AgsunsetR,
}

impl Colormap {
    pub fn all() -> &'static [Colormap] {
        &[
            Colormap::OrRd,
            Colormap::InfernoR,
            Colormap::HotR,
            Colormap::JetR,
            Colormap::Purples,
            Colormap::AgsunsetR,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Colormap::OrRd => "orrd",
            Colormap::InfernoR => "inferno_r",
            Colormap::HotR => "hot_r",
            Colormap::JetR => "jet_r",
            Colormap::Purples => "purples",
            Colormap::AgsunsetR => "agsunset_r",
        }
    }

    pub fn from_cli_name(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "orrd" => Some(Colormap::OrRd),
            "inferno_r" | "inferno" => Some(Colormap::InfernoR),
            "hot_r" | "hot" => Some(Colormap::HotR),
            "jet_r" | "jet" => Some(Colormap::JetR),
            "purples" => Some(Colormap::Purples),
            "agsunset_r" | "agsunset" => Some(Colormap::AgsunsetR),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct GradientStop {
    position: f64, // [0.0, 1.0]
    r: u8,
    g: u8,
    b: u8,
}

const ORRD_STOPS: [GradientStop; 5] = [
    GradientStop { position: 0.00, r: 255, g: 247, b: 236 }, // White/Cream
    GradientStop { position: 0.25, r: 253, g: 212, b: 158 }, // Pale Orange
    GradientStop { position: 0.50, r: 252, g: 141, b: 89 },  // Orange
    GradientStop { position: 0.75, r: 215, g: 48, b: 31 },   // Red
    GradientStop { position: 1.00, r: 127, g: 0, b: 0 },     // Dark Red
];

const INFERNO_R_STOPS: [GradientStop; 5] = [
    GradientStop { position: 0.00, r: 252, g: 255, b: 164 }, // Pale Yellow
    GradientStop { position: 0.25, r: 249, g: 142, b: 9 },   // Orange
    GradientStop { position: 0.50, r: 188, g: 55, b: 84 },   // Red/Magenta
    GradientStop { position: 0.75, r: 87, g: 16, b: 110 },   // Violet
    GradientStop { position: 1.00, r: 0, g: 0, b: 4 },       // Near Black
];

const HOT_R_STOPS: [GradientStop; 4] = [
    GradientStop { position: 0.00, r: 255, g: 255, b: 255 }, // White
    GradientStop { position: 0.25, r: 255, g: 255, b: 0 },   // Yellow
    GradientStop { position: 0.65, r: 255, g: 0, b: 0 },     // Red
    GradientStop { position: 1.00, r: 0, g: 0, b: 0 },       // Black
];

const JET_R_STOPS: [GradientStop; 6] = [
    GradientStop { position: 0.000, r: 128, g: 0, b: 0 },    // Dark Red
    GradientStop { position: 0.125, r: 255, g: 0, b: 0 },    // Red
    GradientStop { position: 0.375, r: 255, g: 255, b: 0 },  // Yellow
    GradientStop { position: 0.625, r: 0, g: 255, b: 255 },  // Cyan
    GradientStop { position: 0.875, r: 0, g: 0, b: 255 },    // Blue
    GradientStop { position: 1.000, r: 0, g: 0, b: 128 },    // Dark Blue
];

const PURPLES_STOPS: [GradientStop; 5] = [
    GradientStop { position: 0.00, r: 252, g: 251, b: 253 }, // White
    GradientStop { position: 0.25, r: 218, g: 218, b: 235 }, // Pale Lavender
    GradientStop { position: 0.50, r: 158, g: 154, b: 200 }, // Lavender
    GradientStop { position: 0.75, r: 106, g: 81, b: 163 },  // Purple
    GradientStop { position: 1.00, r: 63, g: 0, b: 125 },    // Dark Purple
];

const AGSUNSET_R_STOPS: [GradientStop; 7] = [
    GradientStop { position: 0.000, r: 237, g: 217, b: 163 }, // Sand
    GradientStop { position: 0.167, r: 246, g: 169, b: 122 }, // Peach
    GradientStop { position: 0.333, r: 250, g: 120, b: 118 }, // Salmon
    GradientStop { position: 0.500, r: 234, g: 79, b: 136 },  // Pink
    GradientStop { position: 0.667, r: 192, g: 54, b: 157 },  // Magenta
    GradientStop { position: 0.833, r: 135, g: 44, b: 162 },  // Violet
    GradientStop { position: 1.000, r: 75, g: 41, b: 145 },   // Deep Violet
];

fn stops_for(map: Colormap) -> &'static [GradientStop] {
    match map {
        Colormap::OrRd => &ORRD_STOPS,
        Colormap::InfernoR => &INFERNO_R_STOPS,
        Colormap::HotR => &HOT_R_STOPS,
        Colormap::JetR => &JET_R_STOPS,
        Colormap::Purples => &PURPLES_STOPS,
        Colormap::AgsunsetR => &AGSUNSET_R_STOPS,
    }
}

fn gradient_interpolate(stops: &[GradientStop], mut t: f64) -> (u8, u8, u8) {
    if !t.is_finite() || t < 0.0 {
        t = 0.0;
    }
    if t > 1.0 {
        t = 1.0;
    }

    let first = stops[0];
    if t <= first.position {
        return (first.r, first.g, first.b);
    }
    let last = stops[stops.len() - 1];
    if t >= last.position {
        return (last.r, last.g, last.b);
    }

    // Trouver le segment contenant t
    for w in stops.windows(2) {
        let a = w[0];
        let b = w[1];
        if t >= a.position && t < b.position {
            let factor = (t - a.position) / (b.position - a.position);
            let lerp = |u: u8, v: u8| -> u8 {
                let val = u as f64 + factor * (v as f64 - u as f64);
                val.clamp(0.0, 255.0).round() as u8
            };
            return (lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b));
        }
    }

    (last.r, last.g, last.b)
}

/// Couleur d'une cellule du champ : la magnitude dans [0, thr] est
/// normalisée en [0, 1] puis interpolée linéairement dans le gradient.
pub fn color_for_magnitude(mag: f64, thr: f64, map: Colormap) -> (u8, u8, u8) {
    gradient_interpolate(stops_for(map), mag / thr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cli_name_roundtrips() {
        for map in Colormap::all() {
            assert_eq!(Colormap::from_cli_name(map.name()), Some(*map));
        }
        assert_eq!(Colormap::from_cli_name("jet"), Some(Colormap::JetR));
        assert_eq!(Colormap::from_cli_name("viridis"), None);
    }

    #[test]
    fn test_gradient_endpoints() {
        for map in Colormap::all() {
            let stops = stops_for(*map);
            let first = stops[0];
            let last = stops[stops.len() - 1];
            assert_eq!(
                color_for_magnitude(0.0, 2.0, *map),
                (first.r, first.g, first.b)
            );
            assert_eq!(
                color_for_magnitude(2.0, 2.0, *map),
                (last.r, last.g, last.b)
            );
        }
    }

    #[test]
    fn test_interpolation_is_monotone_on_orrd_red_channel() {
        // OrRd fonce continûment : le canal bleu décroît de bout en bout.
        let mut prev = color_for_magnitude(0.0, 1.0, Colormap::OrRd).2;
        for i in 1..=20 {
            let t = i as f64 / 20.0;
            let b = color_for_magnitude(t, 1.0, Colormap::OrRd).2;
            assert!(b <= prev, "canal bleu croissant à t={t}");
            prev = b;
        }
    }

    #[test]
    fn test_out_of_range_magnitudes_are_clamped() {
        let lo = color_for_magnitude(-1.0, 2.0, Colormap::JetR);
        assert_eq!(lo, color_for_magnitude(0.0, 2.0, Colormap::JetR));
        let hi = color_for_magnitude(5.0, 2.0, Colormap::JetR);
        assert_eq!(hi, color_for_magnitude(2.0, 2.0, Colormap::JetR));
        let nan = color_for_magnitude(f64::NAN, 2.0, Colormap::JetR);
        assert_eq!(nan, lo);
    }
}
