use super::*;

fn minimal() -> Recipe {
    Recipe {
        definitions: vec![DefinitionDef {
            children: vec![PieceDef::new(
                0usize,
                Vec2::new(0.5, 0.0),
                MatrixDef::Scale { scale: 0.5 },
            )],
            ..DefinitionDef::default()
        }],
        initial: vec![PieceDef::new(
            0usize,
            Vec2::new(500.0, 500.0),
            MatrixDef::Scale { scale: 400.0 },
        )],
        ..Recipe::default()
    }
}

#[test]
fn minimal_json_uses_defaults() {
    let r = Recipe::from_json(
        r#"{
            "definitions": [
                { "children": [ { "fid": 0, "vector": [0.5, 0], "matrix": { "kind": "scale", "scale": 0.5 } } ] }
            ],
            "initial": [ { "fid": 0, "vector": { "x": 500, "y": 500 }, "matrix": { "kind": "scale", "scale": 400 } } ]
        }"#,
    )
    .unwrap();
    assert_eq!(r, minimal());
    assert_eq!(r.max_pieces, DEFAULT_MAX_PIECES);
    assert!(r.definitions[0].draws);
    r.validate().unwrap();
}

#[test]
fn tagged_variants_parse() {
    let def: DefinitionDef = serde_json::from_str(
        r##"{
            "children": [
                { "fid": [0, 1], "vector": { "x_range": [-1, 1], "y_range": [0, 0] },
                  "matrix": { "kind": "random_dihedral", "sides": 3, "scale": 0.5 }, "reverse_progress": true },
                { "fid": 1, "matrix": { "kind": "rotate", "degrees": 90 } }
            ],
            "iteration": { "kind": "depth", "max_iterations": 3 },
            "metric": { "kind": "rms" },
            "layers": [
                { "plot": { "kind": "dot", "expand_factor": 0.5 } },
                { "plot": { "kind": "path", "width": 2, "fill": true },
                  "colour": { "kind": "progress", "colours": ["red", "#0000ff"] } }
            ]
        }"##,
    )
    .unwrap();
    assert_eq!(def.children[0].fid, FidDef::AnyOf(vec![0, 1]));
    assert!(def.children[0].reverse_progress);
    assert_eq!(
        def.children[0].vector,
        VectorDef::Random {
            x_range: [-1.0, 1.0],
            y_range: [0.0, 0.0]
        }
    );
    assert_eq!(def.children[1].vector, VectorDef::default());
    assert_eq!(def.children[1].matrix, MatrixDef::Rotate { degrees: 90.0, scale: 1.0 });
    assert_eq!(def.metric, Some(MetricDef::Rms));
    assert!(matches!(&def.layers[0].plot, PlotDef::Dot(d) if d.expand_factor == 0.5));
    assert!(matches!(&def.layers[1].plot, PlotDef::Path(p) if p.fill && p.width == 2.0));
    assert!(matches!(
        &def.layers[1].colour,
        Some(ColourSpecDef::Progress { colours, alpha, .. }) if colours.len() == 2 && *alpha == 1.0
    ));
}

#[test]
fn rejects_out_of_range_fids() {
    let mut r = minimal();
    r.definitions[0].children.push(PieceDef::new(3usize, Vec2::ZERO, MatrixDef::Identity));
    let err = r.validate().unwrap_err().to_string();
    assert!(err.contains("definition 0 child 1") && err.contains("fid 3"), "{err}");

    let mut r = minimal();
    r.initial[0].fid = FidDef::AnyOf(vec![0, 9]);
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.initial[0].fid = FidDef::AnyOf(vec![]);
    assert!(r.validate().unwrap_err().to_string().contains("empty"));

    let mut r = minimal();
    r.definitions[0].generator = Some(GeneratorDef::VariableDragon { fid: 4 });
    r.definitions[0].children.clear();
    assert!(r.validate().is_err());
}

#[test]
fn rejects_bad_dihedral_arguments() {
    let mut r = minimal();
    r.definitions[0].children[0].matrix = MatrixDef::Dihedral {
        sides: 4,
        index: 9,
        scale: 1.0,
    };
    assert!(r.validate().unwrap_err().to_string().contains("dihedral"));

    r.definitions[0].children[0].matrix = MatrixDef::RandomDihedral {
        sides: 1,
        scale: 1.0,
        reflect: false,
    };
    assert!(r.validate().is_err());
}

#[test]
fn validates_the_largest_dihedral_groups() {
    let mut r = minimal();
    r.definitions[0].children[0].matrix = serde_json::from_str(
        r#"{ "kind": "random_dihedral", "sides": 4294967295, "scale": 0.5 }"#,
    )
    .unwrap();
    assert!(r.validate().is_ok());

    r.definitions[0].children[0].matrix = MatrixDef::Dihedral {
        sides: u32::MAX,
        index: u32::MAX,
        scale: 1.0,
    };
    assert!(r.validate().is_ok());
}

#[test]
fn rejects_empty_colour_lists_and_non_finite_numbers() {
    let mut r = minimal();
    r.definitions[0].layers.push(LayerDef {
        plot: PlotDef::Dot(DotOpts::default()),
        colour: Some(ColourSpecDef::Progress {
            colours: vec![],
            alpha: 1.0,
            snap: false,
        }),
    });
    assert!(r.validate().unwrap_err().to_string().contains("colour list is empty"));

    let mut r = minimal();
    r.definitions[0].children[0].vector = VectorDef::Fixed(Vec2Def::new(f64::NAN, 0.0));
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.drawing_size = f64::INFINITY;
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.definitions[0].children[0].vector = VectorDef::Random {
        x_range: [1.0, -1.0],
        y_range: [0.0, 0.0],
    };
    assert!(r.validate().is_err());
}

#[test]
fn rejects_structural_problems() {
    let mut r = minimal();
    r.definitions.clear();
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.max_pieces = 0;
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.definitions[0].generator = Some(GeneratorDef::SmallSquares { fid: 0, m: 2, n: 2 });
    assert!(r.validate().unwrap_err().to_string().contains("not both"));

    let mut r = minimal();
    r.definitions[0].children.clear();
    r.definitions[0].generator = Some(GeneratorDef::SmallSquares { fid: 0, m: 5, n: 2 });
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.definitions[0].diameter = Some(0.0);
    assert!(r.validate().is_err());
}

#[test]
fn json_round_trip_preserves_recipe() {
    let mut r = minimal();
    r.sort = Some(SortDef::Distance {
        from: Vec2Def::new(1.0, 2.0),
        power: 4.0,
        scale: 100.0,
        jitter: 1.0,
    });
    let back = Recipe::from_json(&r.to_json().unwrap()).unwrap();
    assert_eq!(back, r);
}

#[test]
fn json_round_trip_keeps_floats_bit_exact() {
    let mut r = minimal();
    r.definitions[0].children[0].vector = VectorDef::Fixed(Vec2Def::new(-0.45, 0.1 + 0.2));
    r.definitions[0].children[0].matrix = MatrixDef::Scale {
        scale: 0.5f64.powf(1.3),
    };
    let back = Recipe::from_json(&r.to_json().unwrap()).unwrap();
    assert_eq!(back.definitions[0].children[0].vector, r.definitions[0].children[0].vector);
    assert_eq!(back.definitions[0].children[0].matrix, r.definitions[0].children[0].matrix);
}
