//! Built-in recipes.

use crate::foundation::core::{Fid, Rgba8, Vec2, palette};
use crate::fractal::hull::HullOpts;
use crate::recipe::colour::ColourDef;
use crate::recipe::model::{
    ColourSpecDef, DefinitionDef, FadeOutDef, FidDef, GeneratorDef, IterationDef, LayerDef,
    MatrixDef, MetricDef, PieceDef, PlotDef, PropertyDef, Recipe, SortDef, Vec2Def, VectorDef,
};
use crate::strategy::generator::grid;
use crate::strategy::plot::{DotOpts, PathOpts, Wobble};
use crate::transform::matrix::Matrix2;

pub const NAMES: [&str; 5] = [
    "sierpinski",
    "dragon",
    "faded_carpet",
    "variable_dragon",
    "showcase",
];

/// Leave a small gap around the canvas edge.
const MARGIN: f64 = 0.98;

pub fn by_name(name: &str) -> Option<Recipe> {
    let recipe = match name {
        "sierpinski" => sierpinski(),
        "dragon" => dragon(),
        "faded_carpet" => faded_carpet(),
        "variable_dragon" => variable_dragon(),
        "showcase" => showcase(),
        _ => return None,
    };
    Some(recipe)
}

fn colours(list: &[Rgba8]) -> Vec<ColourDef> {
    list.iter().copied().map(ColourDef).collect()
}

fn points(list: &[(f64, f64)]) -> Option<Vec<Vec2>> {
    Some(list.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
}

fn child(fid: Fid, vector: Vec2, matrix: impl Into<MatrixDef>) -> PieceDef {
    PieceDef::new(FidDef::One(fid), vector, matrix)
}

/// One piece filling the whole drawing.
fn whole_canvas(fid: Fid, drawing_size: f64, margin: f64) -> PieceDef {
    let half = 0.5 * drawing_size;
    child(fid, Vec2::new(half, half), MatrixDef::Scale { scale: half * margin })
}

fn base(name: &str) -> Recipe {
    Recipe {
        name: Some(name.to_owned()),
        hulls: Some(HullOpts {
            rounds: 10,
            accuracy: 0.1,
            ..HullOpts::default()
        }),
        ..Recipe::default()
    }
}

fn sierpinski_defn(fid: Fid) -> DefinitionDef {
    let g = grid(2, 2);
    DefinitionDef {
        note: Some("Sierpinski sieve".to_owned()),
        children: vec![
            child(fid, g.at(0.0, 0.0), Matrix2::scale(0.5)),
            child(fid, g.at(0.05, 1.0), Matrix2::scale(0.5)),
            child(fid, g.at(1.0, 0.05), MatrixDef::Dihedral { sides: 4, index: 1, scale: 0.5 }),
        ],
        diameter: Some(2.0),
        layers: vec![
            LayerDef {
                plot: PlotDef::Path(PathOpts {
                    width: 5.0,
                    fill: true,
                    shrink: true,
                    ..PathOpts::default()
                }),
                colour: Some(ColourSpecDef::Property {
                    property: PropertyDef::XMinusY,
                    min: -150.0,
                    max: 150.0,
                    colours: colours(&[palette::RED, palette::BLUE]),
                    alpha: 0.5,
                    snap: false,
                }),
            },
            LayerDef {
                plot: PlotDef::Path(PathOpts {
                    width: 3.0,
                    closed: true,
                    ..PathOpts::default()
                }),
                colour: Some(ColourSpecDef::Fixed {
                    colour: ColourDef(palette::BLACK),
                    alpha: 0.75,
                }),
            },
        ],
        ..DefinitionDef::default()
    }
}

fn dragon_defn(fid: Fid) -> DefinitionDef {
    let sc = 0.5f64.sqrt();
    DefinitionDef {
        note: Some("Dragon curve".to_owned()),
        children: vec![
            child(fid, Vec2::new(-0.5, 0.5), MatrixDef::Rotate { degrees: 45.0, scale: sc }),
            child(fid, Vec2::new(0.5, 0.5), MatrixDef::Rotate { degrees: 135.0, scale: sc }),
        ],
        layers: vec![LayerDef {
            plot: PlotDef::Path(PathOpts {
                width: 3.0,
                points: points(&[(-1.0, 0.0), (1.0, 0.0)]),
                ..PathOpts::default()
            }),
            colour: Some(ColourSpecDef::Property {
                property: PropertyDef::Angle,
                min: -90.0,
                max: 270.0,
                colours: colours(&[palette::RED, palette::YELLOW, palette::GREEN, palette::BLUE]),
                alpha: 1.0,
                snap: false,
            }),
        }],
        ..DefinitionDef::default()
    }
}

fn faded_carpet_defn(fid: Fid) -> DefinitionDef {
    DefinitionDef {
        note: Some("Random carpet fading out away from a point".to_owned()),
        generator: Some(GeneratorDef::FadeOut(FadeOutDef {
            fid,
            n: 3,
            centre: Vec2Def::new(750.0, 750.0),
            cutoff_diameter: 50.0,
            d1: 75.0,
            d2: 225.0,
            p1: 1.0,
            p2: 0.0,
        })),
        layers: vec![LayerDef {
            plot: PlotDef::Path(PathOpts {
                fill: true,
                width: 3.0,
                expand_factor: 0.6,
                points: points(&[(-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0), (1.0, 0.0), (0.0, 0.0)]),
                ..PathOpts::default()
            }),
            colour: Some(ColourSpecDef::Property {
                property: PropertyDef::DistanceFrom {
                    point: Vec2Def::new(650.0, 650.0),
                },
                min: 50.0,
                max: 350.0,
                colours: colours(&[palette::MAGENTA, palette::YELLOW, palette::CYAN]),
                alpha: 1.0,
                snap: false,
            }),
        }],
        ..DefinitionDef::default()
    }
}

fn variable_dragon_defn(fid: Fid) -> DefinitionDef {
    DefinitionDef {
        note: Some("Dragon whose fold flattens along the curve".to_owned()),
        generator: Some(GeneratorDef::VariableDragon { fid }),
        iteration: Some(IterationDef::Standard {
            min_diameter: 20.0,
            max_iterations: 20,
        }),
        layers: vec![LayerDef {
            plot: PlotDef::Path(PathOpts {
                width: 2.0,
                points: points(&[(-1.0, 0.0), (1.0, 0.0)]),
                ..PathOpts::default()
            }),
            colour: Some(ColourSpecDef::Progress {
                colours: colours(&[palette::BLUE, palette::RED, palette::ORANGE]),
                alpha: 1.0,
                snap: false,
            }),
        }],
        ..DefinitionDef::default()
    }
}

/// Sierpinski sieve drawn as translucent spiral fills with dark outlines.
pub fn sierpinski() -> Recipe {
    let mut r = base("sierpinski");
    r.iteration = IterationDef::Standard {
        min_diameter: 10.0,
        max_iterations: 6,
    };
    r.definitions = vec![sierpinski_defn(0)];
    r.initial = vec![whole_canvas(0, r.drawing_size, MARGIN)];
    r
}

/// Heighway dragon, coloured by segment direction.
pub fn dragon() -> Recipe {
    let mut r = base("dragon");
    r.max_pieces = 20_000;
    r.iteration = IterationDef::Standard {
        min_diameter: 8.0,
        max_iterations: 20,
    };
    r.definitions = vec![dragon_defn(0)];
    r.initial = vec![child(0, Vec2::new(450.0, 420.0), MatrixDef::Scale { scale: 300.0 })];
    r
}

/// Random Sierpinski carpet that thins out with distance from the top-right quadrant.
pub fn faded_carpet() -> Recipe {
    let mut r = base("faded_carpet");
    r.seed = 8;
    r.max_pieces = 100_000;
    r.iteration = IterationDef::Standard {
        min_diameter: 30.0,
        max_iterations: 20,
    };
    r.sort = Some(SortDef::Random);
    r.definitions = vec![faded_carpet_defn(0)];
    r.initial = vec![whole_canvas(0, r.drawing_size, MARGIN)];
    r
}

/// Dragon variant whose fractal dimension varies from one end to the other.
pub fn variable_dragon() -> Recipe {
    let mut r = base("variable_dragon");
    r.max_pieces = 50_000;
    r.definitions = vec![variable_dragon_defn(0)];
    r.initial = vec![child(0, Vec2::new(500.0, 350.0), MatrixDef::Scale { scale: 400.0 })];
    r
}

/// Ten linked definitions shown side by side through a wrapper definition.
pub fn showcase() -> Recipe {
    let mut r = base("showcase");
    r.seed = 2;
    r.max_pieces = 100_000;
    r.iteration = IterationDef::Standard {
        min_diameter: 30.0,
        max_iterations: 20,
    };
    let centre = Vec2::new(0.5, 0.5) * r.drawing_size;
    r.sort = Some(SortDef::Distance {
        from: centre.into(),
        power: 4.0,
        scale: 100.0,
        jitter: 1.0,
    });

    let empty = DefinitionDef {
        note: Some("Empty; iterates to nothing".to_owned()),
        draws: false,
        ..DefinitionDef::default()
    };
    let identity = DefinitionDef {
        note: Some("Identity; never expands".to_owned()),
        children: vec![child(1, Vec2::ZERO, MatrixDef::Identity)],
        iteration: Some(IterationDef::Stop),
        draws: false,
        ..DefinitionDef::default()
    };

    let (scv, scm) = (0.5, 0.45);
    let wrap = |fid: Fid, x: f64, y: f64, m: Matrix2| child(fid, Vec2::new(x, y) * scv, m).reset();
    let wrapper = DefinitionDef {
        note: Some("Wrapper placing the other definitions".to_owned()),
        children: vec![
            wrap(3, -1.0, -1.0, Matrix2::scale(scm)),
            wrap(4, 1.0, -1.0, Matrix2::scale(scm)),
            wrap(5, -0.8, 1.0, Matrix2::scale(scm * 0.8)),
            wrap(6, -0.4, -0.6, Matrix2::scale(0.45 * scm)),
            wrap(7, -1.5, 1.6, Matrix2::rotate(60.0, 0.35 * scm)),
            wrap(8, 1.0, 1.0, Matrix2::scale(scm)),
            wrap(9, -1.0, 0.2, Matrix2::rotate(-20.0, scm * 1.15) * Matrix2::reflect_y(1.0)),
        ],
        ..DefinitionDef::default()
    };

    let mut sieve = sierpinski_defn(3);
    sieve.iteration = Some(IterationDef::Standard {
        min_diameter: 60.0,
        max_iterations: 4,
    });

    let g = grid(2, 2);
    let random_squares = DefinitionDef {
        note: Some("Random square symmetries".to_owned()),
        children: vec![
            child(4, g.at(0.0, 0.0), Matrix2::scale(0.5)),
            child(4, g.at(1.0, 0.0), Matrix2::scale(0.5)),
            child(4, g.at(0.0, 1.0), MatrixDef::RandomDihedral {
                sides: 4,
                scale: 0.5f64.powf(1.3),
                reflect: true,
            }),
            child(4, g.at(1.0, 1.0), MatrixDef::RandomDihedral {
                sides: 4,
                scale: 0.5f64.powf(1.7),
                reflect: true,
            }),
        ],
        layers: vec![LayerDef {
            plot: PlotDef::Path(PathOpts {
                closed: true,
                width: 2.0,
                expand_factor: 1.1,
                wobble: Some(Wobble { pixels: 3.0 }),
                points: points(&[(-1.0, 0.0), (-1.0, -1.0), (1.0, -1.0), (1.0, 0.0), (0.0, 1.0)]),
                curved: true,
                ..PathOpts::default()
            }),
            colour: Some(ColourSpecDef::Log2Size {
                min: 2.0,
                max: 4.0,
                colours: colours(&[palette::GREEN, palette::BLUE]),
                metric: MetricDef::default(),
                alpha: 1.0,
                snap: false,
            }),
        }],
        ..DefinitionDef::default()
    };

    let h = 3f64.sqrt();
    let hex_fid = FidDef::AnyOf(vec![1, 5, 5, 5, 5]);
    let hex_mx = MatrixDef::RandomCircle {
        scale: 1.0 / 3.0,
        reflect: false,
    };
    let hexagons = DefinitionDef {
        note: Some("Random hexagon flake".to_owned()),
        children: [(2.0, 0.0), (1.0, h), (-1.0, h), (-2.0, 0.0), (-1.0, -h), (1.0, -h), (0.0, 0.0)]
            .into_iter()
            .map(|(x, y)| PieceDef::new(hex_fid.clone(), Vec2::new(x, y) / 3.0, hex_mx.clone()))
            .collect(),
        layers: vec![LayerDef {
            plot: PlotDef::Path(PathOpts {
                expand_factor: 0.5,
                fill: true,
                ..PathOpts::default()
            }),
            colour: Some(ColourSpecDef::Progress {
                colours: colours(&[
                    palette::BLACK,
                    palette::PINK,
                    palette::LIGHT_BLUE,
                    palette::GREEN,
                    palette::YELLOW,
                    palette::BLACK,
                ]),
                alpha: 1.0,
                snap: false,
            }),
        }],
        ..DefinitionDef::default()
    };

    let shifted = DefinitionDef {
        note: Some("Random vector shift".to_owned()),
        children: vec![
            child(6, Vec2::new(-0.5, -0.5), Matrix2::scale(0.5)),
            child(6, Vec2::new(0.5, -0.5), Matrix2::diag(0.5, 0.5)),
            PieceDef::new(
                FidDef::One(6),
                VectorDef::Random {
                    x_range: [-0.5, 0.5],
                    y_range: [0.5, 0.5],
                },
                Matrix2::scale(0.5),
            ),
        ],
        layers: vec![LayerDef {
            plot: PlotDef::Dot(DotOpts {
                expand_factor: 1.5,
                wobble: Some(Wobble { pixels: 5.0 }),
                ..DotOpts::default()
            }),
            colour: Some(ColourSpecDef::Property {
                property: PropertyDef::DistanceFrom {
                    point: Vec2Def::default(),
                },
                min: 500.0,
                max: 580.0,
                colours: colours(&[palette::PURPLE, palette::YELLOW, palette::PINK]),
                alpha: 1.0,
                snap: false,
            }),
        }],
        ..DefinitionDef::default()
    };

    r.definitions = vec![
        empty,
        identity,
        wrapper,
        sieve,
        random_squares,
        hexagons,
        shifted,
        dragon_defn(7),
        faded_carpet_defn(8),
        variable_dragon_defn(9),
    ];
    r.initial = vec![whole_canvas(2, r.drawing_size, MARGIN)];
    r
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/presets.rs"]
mod tests;
