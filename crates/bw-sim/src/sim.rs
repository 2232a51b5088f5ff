//! Fixed-step runner for `TransientModel`s.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            max_steps: 100_000,
            record_every: 10,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    /// `points` evenly spaced samples on `[0, t_end]`, every step recorded.
    pub fn uniform(t_end: f64, points: usize) -> Self {
        let intervals = points.saturating_sub(1).max(1);
        Self {
            dt: t_end / intervals as f64,
            t_end,
            max_steps: intervals,
            record_every: 1,
            integrator: IntegratorType::RK4,
        }
    }
}

/// Progress callback payload.
#[derive(Clone, Copy, Debug)]
pub struct SimProgress {
    pub step: usize,
    pub total_steps: usize,
    pub t: f64,
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

pub fn run_sim<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    run_sim_with_progress(model, opts, None)
}

/// Run a transient simulation, reporting progress roughly every 1% of the run.
pub fn run_sim_with_progress<M: TransientModel>(
    model: &mut M,
    opts: &SimOptions,
    mut progress: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<SimRecord<M::State>> {
    if !(opts.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if opts.t_end < 0.0 {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_steps == 0 {
        return Err(SimError::InvalidArg {
            what: "max_steps must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }

    let n_steps = ((opts.t_end / opts.dt - 1e-9).ceil().max(0.0) as usize).min(opts.max_steps);
    let report_every = (n_steps / 100).max(1);
    let mut x = model.initial_state();

    let mut t_record = vec![0.0];
    let mut x_record = vec![x.clone()];

    let mut t = 0.0;
    let mut step = 0;
    while step < n_steps {
        x = match opts.integrator {
            IntegratorType::RK4 => RK4.step(model, t, &x, opts.dt)?,
            IntegratorType::ForwardEuler => ForwardEuler.step(model, t, &x, opts.dt)?,
        };
        step += 1;
        t = step as f64 * opts.dt;

        if step % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(x.clone());
        }
        if let Some(cb) = progress.as_mut()
            && step % report_every == 0
        {
            cb(SimProgress {
                step,
                total_steps: n_steps,
                t,
            });
        }
    }

    if step > 0 && step % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(x);
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
