//! Content-based hashing for run IDs.

use bw_project::schema::{AirfoilDef, StudyDef};
use sha2::{Digest, Sha256};

/// Run id from the study definition, the project airfoil list, a digest of
/// the referenced data files and the solver version.
pub fn compute_run_id(
    study: &StudyDef,
    airfoils: &[AirfoilDef],
    inputs_digest: &str,
    solver_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let study_json = serde_json::to_string(study).unwrap_or_default();
    hasher.update(study_json.as_bytes());

    let airfoils_json = serde_json::to_string(airfoils).unwrap_or_default();
    hasher.update(airfoils_json.as_bytes());

    hasher.update(inputs_digest.as_bytes());
    hasher.update(solver_version.as_bytes());

    format!("{:x}", hasher.finalize())
}

/// SHA-256 over a sequence of byte chunks, each prefixed by its length.
pub fn digest_bytes<'a>(chunks: impl IntoIterator<Item = &'a [u8]>) -> String {
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update((chunk.len() as u64).to_le_bytes());
        hasher.update(chunk);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_project::schema::*;

    fn study(id: &str, speed: f64) -> StudyDef {
        StudyDef {
            id: id.to_string(),
            name: "Spring".to_string(),
            kind: StudyKind::SpringAirfoil(SpringAirfoilStudyDef {
                airfoil_file: None,
                thickness_pct: 24.1,
                mass_kg: 1.0,
                stiffness_n_per_m: 61.7,
                chord_m: 0.2,
                span_m: 1.0,
                wind_speed_mps: speed,
                air_density_kg_m3: 1.225,
                geometric_aoa_deg: 0.0,
                dynamic_stall_enabled: false,
                initial_displacement_m: 0.02,
                t_end_s: 40.0,
                points: 1000,
            }),
        }
    }

    #[test]
    fn hash_stability() {
        let s = study("s1", 2.0);
        let digest = digest_bytes([b"polar".as_slice()]);
        let hash1 = compute_run_id(&s, &[], &digest, "v1");
        let hash2 = compute_run_id(&s, &[], &digest, "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let digest = digest_bytes([b"polar".as_slice()]);
        let base = compute_run_id(&study("s1", 2.0), &[], &digest, "v1");
        assert_ne!(base, compute_run_id(&study("s1", 3.0), &[], &digest, "v1"));
        assert_ne!(base, compute_run_id(&study("s1", 2.0), &[], &digest, "v2"));
        let other = digest_bytes([b"polar2".as_slice()]);
        assert_ne!(base, compute_run_id(&study("s1", 2.0), &[], &other, "v1"));
    }

    #[test]
    fn digest_separates_chunk_boundaries() {
        let a = digest_bytes([b"ab".as_slice(), b"c".as_slice()]);
        let b = digest_bytes([b"a".as_slice(), b"bc".as_slice()]);
        assert_ne!(a, b);
    }
}
