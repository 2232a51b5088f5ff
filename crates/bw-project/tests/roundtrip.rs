use bw_project::schema::*;
use bw_project::{load_json, load_yaml, save_json, save_yaml, validate_project};

pub fn sample_project() -> Project {
    Project {
        version: 1,
        name: "Roundtrip".to_string(),
        airfoils: vec![
            AirfoilDef {
                thickness_pct: 24.1,
                file: "polars/a.txt".to_string(),
            },
            AirfoilDef {
                thickness_pct: 100.0,
                file: "polars/cyl.txt".to_string(),
            },
        ],
        studies: vec![
            StudyDef {
                id: "bem".to_string(),
                name: "Rotor".to_string(),
                kind: StudyKind::Bem(BemStudyDef {
                    blade_file: "bladedat.txt".to_string(),
                    rotor: RotorDef {
                        blades: 3,
                        radius_m: 89.17,
                        hub_height_m: 119.0,
                        shaft_length_m: 7.1,
                        rotor_speed_rpm: 7.229,
                        tilt_deg: -5.0,
                        yaw_deg: 0.0,
                        cone_deg: 0.0,
                    },
                    wind: WindDef {
                        speed_mps: 9.0,
                        air_density_kg_m3: 1.225,
                        wind_shear_enabled: true,
                        shear_exponent: 0.2,
                    },
                    time: TimeDef {
                        dt_s: 0.15,
                        steps: 1200,
                    },
                    models: ModelsDef::default(),
                    pitch: PitchDef {
                        pitch_control_enabled: true,
                        schedule: PitchScheduleDef::Table {
                            points: vec![
                                PitchPointDef {
                                    time_s: 100.0,
                                    pitch_deg: 0.0,
                                },
                                PitchPointDef {
                                    time_s: 110.0,
                                    pitch_deg: 2.0,
                                },
                            ],
                        },
                    },
                }),
            },
            StudyDef {
                id: "spring".to_string(),
                name: "Spring airfoil".to_string(),
                kind: StudyKind::SpringAirfoil(SpringAirfoilStudyDef {
                    airfoil_file: Some("polars/a.txt".to_string()),
                    thickness_pct: 24.1,
                    mass_kg: 1.0,
                    stiffness_n_per_m: 61.7,
                    chord_m: 0.2,
                    span_m: 1.0,
                    wind_speed_mps: 2.0,
                    air_density_kg_m3: 1.225,
                    geometric_aoa_deg: 10.0,
                    dynamic_stall_enabled: true,
                    initial_displacement_m: 0.02,
                    t_end_s: 40.0,
                    points: 1000,
                }),
            },
        ],
    }
}

#[test]
fn roundtrip_yaml_empty_project() {
    let project = Project {
        version: 1,
        name: "Empty Project".to_string(),
        airfoils: vec![],
        studies: vec![],
    };
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("bw_project_roundtrip_empty.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_yaml_with_studies() {
    let project = sample_project();
    let path = std::env::temp_dir().join("bw_project_roundtrip_studies.yaml");
    save_yaml(&path, &project).unwrap();
    assert_eq!(load_yaml(&path).unwrap(), project);
}

#[test]
fn roundtrip_json_with_studies() {
    let project = sample_project();
    let path = std::env::temp_dir().join("bw_project_roundtrip_studies.json");
    save_json(&path, &project).unwrap();
    assert_eq!(load_json(&path).unwrap(), project);
}
