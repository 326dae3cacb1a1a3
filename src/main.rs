use std::path::PathBuf;

use clap::Parser;
use rand::seq::SliceRandom;

mod color;
mod error;
mod expr;
mod fractal;
mod gallery;
mod io;

use color::Colormap;
use fractal::{generate, FractalKind, GeneratingFn, GenerationConfig};
use gallery::{DEFAULT_EXPRESSION, EXAMPLES};
use io::png::save_png;

/// Utilitaire CLI de génération de fractales escape-time : choix de la
/// famille, expression génératrice en `z`, galerie d'exemples, colormap et
/// rendu heatmap PNG.
///
/// Exemple d'utilisation :
///   fractalgen-cli --kind julia --function "sin(z**4 + 1.41)" --output julia.png
#[derive(Parser, Debug)]
#[command(
    name = "fractalgen-cli",
    about = "Générateur de fractales escape-time (Julia, Mandelbrot) en ligne de commande",
    version
)]
struct Cli {
    /// Famille de fractale (julia ou mandelbrot)
    #[arg(long, default_value = "julia")]
    kind: String,

    /// Expression génératrice en la variable complexe z (famille Julia).
    /// Grammaire restreinte : + - * / **, littéraux réels et imaginaires
    /// (1J), fonctions sin cos tan exp log sinh cosh tanh arcsin arccos
    /// arctan.
    #[arg(long, default_value = DEFAULT_EXPRESSION)]
    function: String,

    /// Utiliser l'entrée numéro N de la galerie d'exemples (voir
    /// --list-examples) à la place de --kind/--function
    #[arg(long, value_name = "N")]
    example: Option<usize>,

    /// Afficher la galerie d'exemples puis quitter
    #[arg(long)]
    list_examples: bool,

    /// Côté de la grille carrée (le champ fait n×n points)
    #[arg(long, default_value_t = 500)]
    n: usize,

    /// Coordonnée minimale X du plan complexe
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    xmin: f64,

    /// Coordonnée maximale X du plan complexe
    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    xmax: f64,

    /// Coordonnée minimale Y du plan complexe
    #[arg(long, default_value_t = -2.0, allow_hyphen_values = true)]
    ymin: f64,

    /// Coordonnée maximale Y du plan complexe
    #[arg(long, default_value_t = 2.0, allow_hyphen_values = true)]
    ymax: f64,

    /// Seuil de divergence
    #[arg(long, default_value_t = 2.0)]
    thr: f64,

    /// Nombre maximal d'itérations par point
    #[arg(long, default_value_t = 10)]
    max_iter: u32,

    /// Colormap (orrd, inferno_r, hot_r, jet_r, purples, agsunset_r ou
    /// random)
    #[arg(long, default_value = "random")]
    palette: String,

    /// Fichier de sortie PNG
    #[arg(long, value_name = "FICHIER", required_unless_present = "list_examples")]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if cli.list_examples {
        println!("Galerie d'exemples :");
        for (i, entry) in EXAMPLES.iter().enumerate() {
            println!("  {:>2}  [{}]  {}", i + 1, entry.kind.name(), entry.expression);
        }
        return;
    }

    // --example N remplace le couple kind/function.
    let (kind, function_src) = match cli.example {
        Some(index) => {
            if index == 0 || index > EXAMPLES.len() {
                eprintln!(
                    "Exemple invalide: {} (attendu entre 1 et {})",
                    index,
                    EXAMPLES.len()
                );
                std::process::exit(1);
            }
            let entry = &EXAMPLES[index - 1];
            (entry.kind, entry.expression.to_string())
        }
        None => {
            let kind = match FractalKind::from_cli_name(&cli.kind) {
                Some(k) => k,
                None => {
                    eprintln!(
                        "Famille de fractale invalide: '{}' (attendu julia ou mandelbrot)",
                        cli.kind
                    );
                    std::process::exit(1);
                }
            };
            (kind, cli.function.clone())
        }
    };

    let config = GenerationConfig {
        n: cli.n,
        xlim: (cli.xmin, cli.xmax),
        ylim: (cli.ymin, cli.ymax),
        thr: cli.thr,
        max_iter: cli.max_iter,
    };

    // Compilation de l'expression (famille Julia uniquement).
    let compiled = match kind {
        FractalKind::Julia => match expr::parse(&function_src) {
            Ok(f) => Some(f),
            Err(e) => {
                eprintln!("Erreur dans l'expression génératrice: {e}");
                std::process::exit(1);
            }
        },
        FractalKind::Mandelbrot => None,
    };

    let generating_fn = compiled.as_ref().map(|c| c.as_fn());
    let function: Option<&GeneratingFn<'_>> = match &generating_fn {
        Some(f) => Some(f),
        None => None,
    };
    let field = match generate(kind, &config, function) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Erreur de génération: {e}");
            std::process::exit(1);
        }
    };

    // Colormap : choix explicite ou tirage aléatoire. L'aléa reste
    // confiné au rendu, jamais dans le calcul du champ.
    let map = if cli.palette.trim().eq_ignore_ascii_case("random") {
        let mut rng = rand::thread_rng();
        match Colormap::all().choose(&mut rng) {
            Some(m) => *m,
            None => Colormap::OrRd,
        }
    } else {
        match Colormap::from_cli_name(&cli.palette) {
            Some(m) => m,
            None => {
                eprintln!(
                    "Colormap invalide: '{}'. Options: orrd, inferno_r, hot_r, jet_r, purples, agsunset_r, random",
                    cli.palette
                );
                std::process::exit(1);
            }
        }
    };

    let output = match &cli.output {
        Some(path) => path,
        None => {
            // clap garantit la présence hors --list-examples
            eprintln!("--output est requis");
            std::process::exit(1);
        }
    };

    if let Err(e) = save_png(&field, config.thr, map, output) {
        eprintln!("Erreur lors de l'écriture du PNG: {e}");
        std::process::exit(1);
    }
    println!(
        "{} {}×{} rendu avec le colormap '{}' dans {}",
        kind.name(),
        config.n,
        config.n,
        map.name(),
        output.display()
    );
}
