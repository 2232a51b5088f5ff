//! Rigid-body frames of the rotor.
//!
//! Frame 1 is fixed to the ground with x pointing up, frame 2 follows the
//! nacelle (yaw then tilt), frame 3 rotates with the shaft (azimuth) and
//! frame 4 is the coned blade frame whose x axis runs along the blade.
//! `aij` maps coordinates from frame i into frame j.

use nalgebra::{Matrix3, Vector3};

/// Rotation about the ground x axis (yaw).
pub fn yaw(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Rotation about the nacelle y axis (tilt).
pub fn tilt(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Rotation about the shaft z axis (blade azimuth).
pub fn azimuth(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Rotation about the hub y axis (coning).
pub fn cone(theta: f64) -> Matrix3<f64> {
    tilt(theta)
}

/// Rotations and offsets that stay fixed for a whole run.
#[derive(Clone, Debug)]
pub struct RotorFrames {
    a12: Matrix3<f64>,
    a34: Matrix3<f64>,
    /// Hub centre in the ground frame: tower top plus the shaft offset.
    hub: Vector3<f64>,
}

/// Transform pair for one blade at one azimuth.
#[derive(Clone, Copy, Debug)]
pub struct BladeFrame {
    /// Ground frame into blade frame.
    pub a14: Matrix3<f64>,
    /// Blade frame into ground frame.
    pub a41: Matrix3<f64>,
}

impl RotorFrames {
    pub fn new(
        tilt_rad: f64,
        yaw_rad: f64,
        cone_rad: f64,
        hub_height: f64,
        shaft_length: f64,
    ) -> Self {
        // a3 (roll) is the identity for this rotor
        let a12 = tilt(tilt_rad) * yaw(yaw_rad);
        let tower_top = Vector3::new(hub_height, 0.0, 0.0);
        let shaft = a12.transpose() * Vector3::new(0.0, 0.0, -shaft_length);
        Self {
            a12,
            a34: cone(cone_rad),
            hub: tower_top + shaft,
        }
    }

    pub fn blade(&self, azimuth_rad: f64) -> BladeFrame {
        let a14 = self.a34 * azimuth(azimuth_rad) * self.a12;
        BladeFrame {
            a14,
            a41: a14.transpose(),
        }
    }

    /// Ground-frame position of the station at radius `r` on a blade.
    pub fn position(&self, blade: &BladeFrame, r: f64) -> Vector3<f64> {
        self.hub + blade.a41 * Vector3::new(r, 0.0, 0.0)
    }
}
