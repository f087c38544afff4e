//! Simulation World
//!
//! Owns the body arena and drives the fixed-timestep pipeline. Each step
//! runs, in order:
//!
//! 1. gravity accumulation (when enabled)
//! 2. velocity integration (forces and torques are consumed here)
//! 3. brute-force all-pairs narrow phase (static/static pairs skipped)
//! 4. constraint row construction (penetration + two friction rows per
//!    contact point)
//! 5. iterative sequential-impulse solve with Coulomb clamping
//! 6. direct positional correction, split by inverse-mass ratio
//! 7. position integration with quaternion renormalization
//! 8. deferred destruction sweep
//!
//! Callers drive the loop with [`Simulation::update`], which converts
//! variable frame times into zero or more fixed steps through an
//! accumulator. Leftover time below one timestep is carried to the next
//! call, so simulated time tracks wall time without per-frame jitter
//! leaking into the integration.
//!
//! # Handles
//!
//! Bodies are addressed by generation-checked [`BodyHandle`]s. Destroying
//! a body is deferred to the end of the current step; the freed slot's
//! generation is bumped, so stale handles fail with
//! [`PhysicsError::InvalidBodyHandle`] instead of aliasing a new body.

use crate::body::RigidBody;
use crate::constraint::{Constraint, ConstraintKind};
use crate::contact_viz::{collect_arrows, ContactArrow};
use crate::error::PhysicsError;
use crate::math::{Quat, Vec3, EPSILON};
use crate::narrow_phase::{collide, ContactManifold};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ============================================================================
// Handles and configuration
// ============================================================================

/// Generation-checked reference to a body in a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Tunable parameters of the pipeline.
#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    /// Fixed step length in seconds
    pub timestep: f64,
    /// Sequential-impulse iterations per step
    pub solver_iterations: u32,
    /// World gravity acceleration
    pub gravity: Vec3,
    /// Fraction of the deepest penetration removed per step (0..=1)
    pub correction_factor: f64,
    /// Approach speed below which restitution is not applied, so resting
    /// contacts do not jitter from the per-step gravity velocity
    pub restitution_threshold: f64,
    /// Cap on fixed steps consumed by a single `update` call, bounding the
    /// work done after a long stall
    pub max_steps_per_update: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0,
            solver_iterations: 10,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            correction_factor: 0.8,
            restitution_threshold: 0.5,
            max_steps_per_update: 8,
        }
    }
}

struct BodySlot {
    body: Option<RigidBody>,
    generation: u32,
}

// ============================================================================
// Simulation
// ============================================================================

/// A world of rigid bodies advanced on a fixed timestep.
pub struct Simulation {
    config: SimulationConfig,
    slots: Vec<BodySlot>,
    free_indices: Vec<u32>,
    accumulator: f64,
    gravity_enabled: bool,
    record_contacts: bool,
    debug_contacts: Vec<ContactArrow>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            free_indices: Vec::new(),
            accumulator: 0.0,
            gravity_enabled: true,
            record_contacts: false,
            debug_contacts: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Toggle gravity for the whole world. Takes effect from the next step.
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    // ------------------------------------------------------------------
    // Body management
    // ------------------------------------------------------------------

    /// Insert a body, reusing a freed slot when one is available.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(BodySlot {
            body: Some(body),
            generation: 0,
        });
        BodyHandle {
            index,
            generation: 0,
        }
    }

    /// Mark a body for destruction. The body keeps participating until the
    /// end of the current step, then its slot is reclaimed and the handle
    /// becomes stale.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.destroyed = true;
        Ok(())
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&RigidBody, PhysicsError> {
        let stale = PhysicsError::InvalidBodyHandle {
            index: handle.index,
            generation: handle.generation,
        };
        let slot = self.slots.get(handle.index as usize).ok_or(stale)?;
        if slot.generation != handle.generation {
            return Err(stale);
        }
        match slot.body.as_ref() {
            Some(body) if !body.destroyed => Ok(body),
            _ => Err(stale),
        }
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        let stale = PhysicsError::InvalidBodyHandle {
            index: handle.index,
            generation: handle.generation,
        };
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .ok_or(stale)?;
        if slot.generation != handle.generation {
            return Err(stale);
        }
        match slot.body.as_mut() {
            Some(body) if !body.destroyed => Ok(body),
            _ => Err(stale),
        }
    }

    /// Current pose of a body.
    pub fn pose(&self, handle: BodyHandle) -> Result<(Vec3, Quat), PhysicsError> {
        let body = self.body(handle)?;
        Ok((body.position, body.rotation))
    }

    /// Accumulate a force on a body at a world-space point.
    pub fn apply_force(
        &mut self,
        handle: BodyHandle,
        force: Vec3,
        point: Vec3,
    ) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.apply_force(force, point);
        Ok(())
    }

    /// Accumulate a force through a body's center of mass.
    pub fn apply_central_force(
        &mut self,
        handle: BodyHandle,
        force: Vec3,
    ) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.apply_central_force(force);
        Ok(())
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(&s.body, Some(b) if !b.destroyed))
            .count()
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Advance by `elapsed` seconds of wall time, running as many fixed
    /// steps as the accumulator covers. Fractional leftover carries over.
    pub fn update(&mut self, elapsed: f64) {
        self.record_contacts = false;
        self.advance(elapsed);
    }

    /// Like [`update`](Self::update), but records every contact found
    /// during the consumed steps and returns them for debug drawing.
    pub fn update_staggered(&mut self, elapsed: f64) -> &[ContactArrow] {
        self.record_contacts = true;
        self.debug_contacts.clear();
        self.advance(elapsed);
        self.record_contacts = false;
        &self.debug_contacts
    }

    fn advance(&mut self, elapsed: f64) {
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= self.config.timestep {
            self.accumulator -= self.config.timestep;
            if steps < self.config.max_steps_per_update {
                self.step();
                steps += 1;
            }
        }
    }

    /// Run exactly one fixed step, ignoring the accumulator.
    pub fn step(&mut self) {
        let dt = self.config.timestep;

        // 1+2: gravity, then velocity integration
        for slot in &mut self.slots {
            if let Some(body) = slot.body.as_mut() {
                if self.gravity_enabled && !body.is_static() {
                    body.velocity += self.config.gravity * dt;
                }
                body.integrate_velocities(dt);
                // Poses may have been edited through `body_mut` since the
                // last step; refresh before detection
                body.update_collider();
            }
        }

        // 3: narrow phase
        let manifolds = self.detect_contacts();
        if self.record_contacts {
            for (_, _, manifold) in &manifolds {
                collect_arrows(manifold, &mut self.debug_contacts);
            }
        }

        // 4+5: constraint rows and iterative solve
        let rows = self.build_rows(&manifolds);
        self.solve_rows(rows);

        // 6: positional correction
        self.correct_positions(&manifolds);

        // 7: position integration
        for slot in &mut self.slots {
            if let Some(body) = slot.body.as_mut() {
                body.integrate_position(dt);
            }
        }

        // 8: destruction sweep
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if matches!(&slot.body, Some(b) if b.destroyed) {
                slot.body = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_indices.push(index as u32);
            }
        }
    }

    // ------------------------------------------------------------------
    // Pipeline internals
    // ------------------------------------------------------------------

    /// All-pairs contact detection. Pair order is (i, j) with `i < j`, so
    /// manifold normals point from the lower-indexed body to the higher.
    fn detect_contacts(&self) -> Vec<(usize, usize, ContactManifold)> {
        let mut pairs = Vec::new();
        for i in 0..self.slots.len() {
            let Some(a) = self.slots[i].body.as_ref() else {
                continue;
            };
            for j in (i + 1)..self.slots.len() {
                let Some(b) = self.slots[j].body.as_ref() else {
                    continue;
                };
                if a.is_static() && b.is_static() {
                    continue;
                }
                if a.collider().is_some() && b.collider().is_some() {
                    pairs.push((i, j));
                }
            }
        }

        let collide_pair = |&(i, j): &(usize, usize)| -> Option<(usize, usize, ContactManifold)> {
            // Presence checked while pairing
            let a = self.slots[i].body.as_ref()?;
            let b = self.slots[j].body.as_ref()?;
            let manifold = collide(a.collider()?, b.collider()?, a.position, b.position)?;
            if manifold.points.is_empty() {
                return None;
            }
            Some((i, j, manifold))
        };

        #[cfg(feature = "parallel")]
        {
            pairs.par_iter().filter_map(collide_pair).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            pairs.iter().filter_map(collide_pair).collect()
        }
    }

    /// One penetration row plus two friction rows per contact point. The
    /// friction rows are placed after their penetration row and reference
    /// it by index for the Coulomb limit.
    fn build_rows(&self, manifolds: &[(usize, usize, ContactManifold)]) -> Vec<Constraint> {
        let mut rows = Vec::with_capacity(manifolds.iter().map(|m| m.2.points.len() * 3).sum());
        for &(i, j, ref manifold) in manifolds {
            let (Some(a), Some(b)) = (self.slots[i].body.as_ref(), self.slots[j].body.as_ref())
            else {
                continue;
            };
            let material = a.material.combined(&b.material);
            for point in &manifold.points {
                let normal_row = rows.len();
                let mut penetration = Constraint::row(
                    i,
                    j,
                    manifold.normal,
                    point.offset_a,
                    point.offset_b,
                    0.0,
                    ConstraintKind::Penetration,
                );
                // Restitution targets a rebound proportional to the
                // pre-solve approach speed; separating or slow contacts
                // get none
                let approach = penetration.relative_velocity(a, b);
                if approach < -self.config.restitution_threshold {
                    penetration.bias = material.restitution * approach;
                }
                rows.push(penetration);

                for tangent in [manifold.tangent1, manifold.tangent2] {
                    rows.push(Constraint::row(
                        i,
                        j,
                        tangent,
                        point.offset_a,
                        point.offset_b,
                        0.0,
                        ConstraintKind::Friction {
                            normal_row,
                            coefficient: material.kinetic_friction,
                        },
                    ));
                }
            }
        }
        rows
    }

    /// Gauss-Seidel over the rows: each pass computes the multiplier
    /// increment from the current velocities, clamps the accumulated
    /// multiplier, and applies the difference immediately.
    fn solve_rows(&mut self, mut rows: Vec<Constraint>) {
        for _ in 0..self.config.solver_iterations {
            for index in 0..rows.len() {
                let row = rows[index];
                let limit = match row.kind {
                    ConstraintKind::Penetration => f64::INFINITY,
                    ConstraintKind::Friction {
                        normal_row,
                        coefficient,
                    } => coefficient * rows[normal_row].lambda,
                };

                let Some((a, b)) = self.pair_mut(row.body_a, row.body_b) else {
                    continue;
                };
                let effective_mass = row.effective_mass(a, b);
                if effective_mass <= EPSILON {
                    continue;
                }
                let delta = -(row.relative_velocity(a, b) + row.bias) / effective_mass;
                let clamped = match row.kind {
                    ConstraintKind::Penetration => (row.lambda + delta).max(0.0),
                    ConstraintKind::Friction { .. } => {
                        (row.lambda + delta).max(-limit).min(limit)
                    }
                };
                row.apply(a, b, clamped - row.lambda);
                rows[index].lambda = clamped;
            }
        }
    }

    /// Remove a fraction of the deepest penetration of each manifold by
    /// translating the bodies apart along the contact normal, split by
    /// their inverse-mass ratio. Independent of the velocity solve, so
    /// resting stacks do not gain energy from the correction.
    fn correct_positions(&mut self, manifolds: &[(usize, usize, ContactManifold)]) {
        let factor = self.config.correction_factor;
        for &(i, j, ref manifold) in manifolds {
            let depth = manifold.max_depth();
            if depth <= 0.0 {
                continue;
            }
            let Some((a, b)) = self.pair_mut(i, j) else {
                continue;
            };
            let inverse_a = a.inertia().inverse_mass();
            let inverse_b = b.inertia().inverse_mass();
            let total = inverse_a + inverse_b;
            if total <= EPSILON {
                continue;
            }
            let correction = manifold.normal * (depth * factor / total);
            a.position -= correction * inverse_a;
            b.position += correction * inverse_b;
            a.update_collider();
            b.update_collider();
        }
    }

    /// Disjoint mutable access to two live bodies, `i < j`.
    fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
        debug_assert!(i < j, "pair indices must be ordered");
        let (head, tail) = self.slots.split_at_mut(j);
        match (head[i].body.as_mut(), tail[0].body.as_mut()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}
