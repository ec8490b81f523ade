use flint_engine::{EngineError, Solver};
use serde_json::Value;

const SCENE: &str = r##"[
  {
    "id": "crate-1",
    "name": "Wooden Crate",
    "transform": { "position": [0, 5, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] },
    "meshType": "BOX",
    "physics": { "type": "RIGID", "mass": 2, "friction": 0.5, "restitution": 0.3, "customFlag": true },
    "material": { "color": "#8b5a2b", "roughness": 0.7 },
    "audio": null
  },
  {
    "id": "floor",
    "name": "Floor",
    "isStatic": true,
    "transform": { "position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [20, 0.1, 20] },
    "meshType": "PLANE",
    "physics": { "type": "NONE" }
  },
  {
    "id": "sparks",
    "transform": { "position": [1, 1, 1, 0.5], "rotation": [0, 0, 0], "scale": [1, 1, 1] },
    "meshType": "PARTICLE_SYSTEM",
    "physics": { "type": "NONE" },
    "particleConfig": { "count": 16, "colorStart": "#ffffff", "colorEnd": "#000000", "wSpread": 0.5 }
  }
]"##;

const FRAME: &str = r#"{ "dt": 0.016, "isSimulating": true, "dimension": "3D" }"#;

fn entity<'a>(entities: &'a Value, id: &str) -> &'a Value {
    entities
        .as_array()
        .and_then(|list| list.iter().find(|e| e["id"] == id))
        .unwrap()
}

#[test]
fn hand_back_keeps_unknown_fields() {
    let mut solver = Solver::new();
    let out = solver.step_entities(SCENE, FRAME).unwrap();
    let entities: Value = serde_json::from_str(&out).unwrap();

    let crate_1 = entity(&entities, "crate-1");
    assert_eq!(crate_1["name"], "Wooden Crate");
    assert_eq!(crate_1["material"]["roughness"], 0.7);
    assert_eq!(crate_1["physics"]["customFlag"], true);
    assert!(crate_1["audio"].is_null());

    let y = crate_1["transform"]["position"][1].as_f64().unwrap();
    assert!(y < 5.0);

    // 3D entities stay 3-component, 4D ones keep their W
    assert_eq!(crate_1["transform"]["position"].as_array().unwrap().len(), 3);
    assert_eq!(entity(&entities, "sparks")["transform"]["position"][3], 0.5);
    assert_eq!(entity(&entities, "sparks")["particleConfig"]["colorStart"], "#ffffff");

    let floor = entity(&entities, "floor");
    assert_eq!(floor["transform"]["position"][1], 0.0);
}

#[test]
fn solver_outputs_follow_the_scene() {
    let mut solver = Solver::new();
    solver.step_entities(SCENE, FRAME).unwrap();

    let core = solver.core();
    assert_eq!(core.render_states().len(), 2);
    assert_eq!(core.particle_system("sparks").map(|p| p.count()), Some(16));
    assert!(core.velocity("crate-1").y < 0.0);
    assert_eq!(core.velocity("floor").y, 0.0);

    let mut near = solver.neighbor_ids(0.0, 0.0, 0.0);
    near.sort_unstable();
    assert_eq!(near, vec!["floor", "sparks"]);
}

#[test]
fn rejects_malformed_entities() {
    let mut solver = Solver::new();

    let short_vector = r#"[{ "id": "a", "transform": { "position": [0, 1], "rotation": [0, 0, 0], "scale": [1, 1, 1] }, "physics": { "type": "RIGID" } }]"#;
    assert!(matches!(
        solver.step_entities(short_vector, FRAME),
        Err(EngineError::Json { context: "entities", .. })
    ));

    let unknown_type = r#"[{ "id": "a", "transform": { "position": [0, 1, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] }, "physics": { "type": "AERO" } }]"#;
    assert!(solver.step_entities(unknown_type, FRAME).is_err());
    // Editor-only types are rejected wholesale, not skipped
    for kind in ["QUANTUM", "VEHICLE", "RAGDOLL"] {
        let entities = unknown_type.replace("AERO", kind);
        assert!(
            matches!(
                solver.step_entities(&entities, FRAME),
                Err(EngineError::Json { context: "entities", .. })
            ),
            "{kind} accepted"
        );
    }

    let bad_color = r##"[{ "id": "fx", "transform": { "position": [0, 1, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] }, "meshType": "PARTICLE_SYSTEM", "physics": { "type": "NONE" }, "particleConfig": { "colorStart": "orange" } }]"##;
    assert!(solver.step_entities(bad_color, FRAME).is_err());

    assert!(solver.step_entities("[]", "{}").is_err());
    assert_eq!(solver.core().frame(), 0);
}

#[test]
fn failed_step_keeps_the_previous_scene() {
    let mut solver = Solver::new();
    let ok = r#"[{ "id": "a", "transform": { "position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] }, "physics": { "type": "NONE" } }]"#;
    solver.step_entities(ok, FRAME).unwrap();
    assert_eq!(solver.neighbor_ids(0.0, 0.0, 0.0), vec!["a"]);

    let broken = r#"[{ "id": "zzz", "transform": { "position": [50, 50, 50], "rotation": [0, 0, 0], "scale": [1, 1, 1] }, "meshType": "CUSTOM_MESH", "customGeometry": { "vertices": [0, 0, 0, 0, 0], "stride": 4 }, "physics": { "type": "NONE" } }]"#;
    assert!(matches!(
        solver.step_entities(broken, FRAME),
        Err(EngineError::InvalidGeometry { .. })
    ));

    assert_eq!(solver.neighbor_ids(0.0, 0.0, 0.0), vec!["a"]);
    assert_eq!(solver.bodies().len(), 1);
    assert_eq!(solver.core().frame(), 1);
}
