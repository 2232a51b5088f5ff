#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn demo_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/dtu10mw")
}

pub fn demo_project() -> PathBuf {
    demo_dir().join("project.yaml")
}

pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{}_{}", prefix, nanos));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

/// Writes a small project into a fresh temp dir. The blade table is copied
/// next to the project file, polars are referenced in the demo tree.
pub fn small_project(prefix: &str) -> PathBuf {
    let dir = unique_temp_dir(prefix);
    fs::copy(demo_dir().join("bladedat.txt"), dir.join("bladedat.txt"))
        .expect("failed to copy blade table");

    let polar = |name: &str| {
        let path = demo_dir().join("polars").join(name);
        format!("'{}'", path.display())
    };
    let yaml = format!(
        r#"version: 1
name: small
airfoils:
  - {{ thickness_pct: 24.1, file: {p241} }}
  - {{ thickness_pct: 30.1, file: {p301} }}
  - {{ thickness_pct: 36.0, file: {p360} }}
  - {{ thickness_pct: 48.0, file: {p480} }}
  - {{ thickness_pct: 60.0, file: {p600} }}
  - {{ thickness_pct: 100.0, file: {pcyl} }}
studies:
  - id: bem-short
    name: Short BEM run
    kind:
      type: Bem
      blade_file: bladedat.txt
      rotor: {{ radius_m: 89.17, hub_height_m: 119.0, shaft_length_m: 7.1, rotor_speed_rpm: 7.229 }}
      wind: {{ speed_mps: 9.0, wind_shear_enabled: true }}
      time: {{ dt_s: 0.15, steps: 60 }}
  - id: spring-short
    name: Short spring airfoil run
    kind:
      type: SpringAirfoil
      airfoil_file: {p241}
      mass_kg: 1.0
      stiffness_n_per_m: 61.7
      chord_m: 0.2
      wind_speed_mps: 2.0
      t_end_s: 20.0
      points: 400
"#,
        p241 = polar("synthetic-241.txt"),
        p301 = polar("synthetic-301.txt"),
        p360 = polar("synthetic-360.txt"),
        p480 = polar("synthetic-480.txt"),
        p600 = polar("synthetic-600.txt"),
        pcyl = polar("synthetic-cylinder.txt"),
    );
    let path = dir.join("project.yaml");
    fs::write(&path, yaml).expect("failed to write project");
    path
}
