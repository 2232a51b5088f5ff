use bw_airfoil::*;
use proptest::prelude::*;

fn write_polar(dir: &std::path::Path, name: &str, cl_scale: f64) -> std::path::PathBuf {
    let mut text = String::from("# synthetic polar\n");
    for aoa in (-180..=180).step_by(5) {
        let a = (aoa as f64).to_radians();
        let cl = cl_scale * a.sin();
        let cd = 0.01 + 0.5 * a.sin().powi(2);
        text.push_str(&format!(
            "{aoa:8.2} {cl:10.5} {cd:10.5} {:10.5} {:10.5} {:10.5} {:10.5}\n",
            -0.05, 1.0, cl, 0.0
        ));
    }
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn load_polar_set_from_files() {
    let dir = std::env::temp_dir().join("bw_airfoil_polar_files");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let thin = PolarTable::load(write_polar(&dir, "thin.txt", 2.0)).unwrap();
    let thick = PolarTable::load(write_polar(&dir, "thick.txt", 1.0)).unwrap();
    assert_eq!(thin.len(), 73);

    let set = PolarSet::new(vec![(24.1, thin.clone()), (48.0, thick)]).unwrap();
    let at_thin = set.coefficients(30.0, 24.1);
    assert_eq!(at_thin, thin.lookup(30.0));

    let mid = set.coefficients(30.0, 36.05);
    assert!((mid.cl - 1.5 * 0.5).abs() < 1e-4);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_reports_path() {
    let err = PolarTable::load("/nonexistent/bladewake/polar.txt").unwrap_err();
    assert!(err.to_string().contains("polar.txt"));
}

proptest! {
    #[test]
    fn set_lookup_bounded_by_tables(aoa in -200.0f64..200.0, tc in 10.0f64..60.0) {
        let grid: Vec<f64> = (-18..=18).map(|k| k as f64 * 10.0).collect();
        let table = |scale: f64| {
            let rows = grid
                .iter()
                .map(|a| {
                    let cl = scale * a.to_radians().sin();
                    PolarCoefficients { cl, cd: 0.01, cm: 0.0, f_stat: 1.0, cl_inv: cl, cl_fs: 0.0 }
                })
                .collect();
            PolarTable::new(grid.clone(), rows).unwrap()
        };
        let set = PolarSet::new(vec![(24.1, table(1.5)), (36.0, table(1.0))]).unwrap();
        let c = set.coefficients(aoa, tc);
        prop_assert!(c.cl.abs() <= 1.5 + 1e-12);
        prop_assert!((c.cd - 0.01).abs() < 1e-12);
    }
}
