use bw_project::schema::*;
use bw_project::{ValidationError, validate_project};

fn project_with(kind: StudyKind) -> Project {
    Project {
        version: 1,
        name: "Validate".to_string(),
        airfoils: vec![AirfoilDef {
            thickness_pct: 24.1,
            file: "a.txt".to_string(),
        }],
        studies: vec![StudyDef {
            id: "s1".to_string(),
            name: "Study".to_string(),
            kind,
        }],
    }
}

fn bem() -> BemStudyDef {
    serde_yaml::from_str(
        r#"
blade_file: bladedat.txt
rotor: { radius_m: 89.17, hub_height_m: 119.0, rotor_speed_rpm: 7.229 }
wind: { speed_mps: 9.0 }
time: { dt_s: 0.15, steps: 1200 }
"#,
    )
    .unwrap()
}

#[test]
fn accepts_minimal_bem_study() {
    validate_project(&project_with(StudyKind::Bem(bem()))).unwrap();
}

#[test]
fn rejects_unsupported_version() {
    let mut p = project_with(StudyKind::Bem(bem()));
    p.version = 7;
    assert!(matches!(
        validate_project(&p),
        Err(ValidationError::UnsupportedVersion { version: 7 })
    ));
}

#[test]
fn rejects_duplicate_study_ids() {
    let mut p = project_with(StudyKind::Bem(bem()));
    p.studies.push(p.studies[0].clone());
    assert!(matches!(
        validate_project(&p),
        Err(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn rejects_duplicate_airfoil_thickness() {
    let mut p = project_with(StudyKind::Bem(bem()));
    p.airfoils.push(p.airfoils[0].clone());
    assert!(matches!(
        validate_project(&p),
        Err(ValidationError::DuplicateId { .. })
    ));
}

#[test]
fn bem_study_requires_airfoils() {
    let mut p = project_with(StudyKind::Bem(bem()));
    p.airfoils.clear();
    assert!(matches!(
        validate_project(&p),
        Err(ValidationError::MissingReference { .. })
    ));
}

#[test]
fn rejects_non_physical_rotor() {
    let mut b = bem();
    b.rotor.radius_m = 0.0;
    let err = validate_project(&project_with(StudyKind::Bem(b))).unwrap_err();
    assert!(err.to_string().contains("rotor.radius_m"));

    let mut b = bem();
    b.time.steps = 0;
    assert!(validate_project(&project_with(StudyKind::Bem(b))).is_err());
}

#[test]
fn rejects_unsorted_pitch_table() {
    let mut b = bem();
    b.pitch.schedule = PitchScheduleDef::Table {
        points: vec![
            PitchPointDef {
                time_s: 10.0,
                pitch_deg: 0.0,
            },
            PitchPointDef {
                time_s: 5.0,
                pitch_deg: 1.0,
            },
        ],
    };
    let err = validate_project(&project_with(StudyKind::Bem(b))).unwrap_err();
    assert!(err.to_string().contains("strictly increasing"));
}

#[test]
fn rejects_backwards_pitch_window() {
    let mut b = bem();
    b.pitch.schedule = PitchScheduleDef::Window {
        start_s: 150.0,
        end_s: 100.0,
        pitch_deg: 2.0,
    };
    assert!(validate_project(&project_with(StudyKind::Bem(b))).is_err());
}

#[test]
fn spring_study_checks_mass_and_points() {
    let spring: SpringAirfoilStudyDef = serde_yaml::from_str(
        "mass_kg: 1.0\nstiffness_n_per_m: 61.7\nchord_m: 0.2\nwind_speed_mps: 2.0\n",
    )
    .unwrap();
    validate_project(&project_with(StudyKind::SpringAirfoil(spring.clone()))).unwrap();

    let mut bad = spring.clone();
    bad.mass_kg = -1.0;
    assert!(validate_project(&project_with(StudyKind::SpringAirfoil(bad))).is_err());

    let mut bad = spring;
    bad.points = 1;
    assert!(validate_project(&project_with(StudyKind::SpringAirfoil(bad))).is_err());
}
