//! Magnetic field sampling and magnet-magnet forces within a specs world.
//!
//! Magnets are added to the world as [Magnet] components. Their charges are stored in world
//! coordinates, so magnet entities need no [Position]. Any entity with a [Position] and a
//! [MagneticFieldSampler] receives the superposed field of every magnet each frame.

extern crate nalgebra;
extern crate specs;
use crate::magnet::Magnet;
use nalgebra::Vector3;
use specs::{
    Component, DispatcherBuilder, Entities, Join, LazyUpdate, Read, ReadStorage, System,
    VecStorage, World, WorldExt, WriteStorage,
};
use std::fmt;

/// Position of an entity in space, with respect to cartesian x,y,z axes.
///
/// SI units (metres)
#[derive(Clone, Copy, Debug, Component)]
#[storage(VecStorage)]
pub struct Position {
    pub pos: Vector3<f64>,
}

/// A component that stores the magnetic field at an entity's location.
#[derive(Copy, Clone, Debug)]
pub struct MagneticFieldSampler {
    /// Sum of the fields of all magnets at the sampler location, or NaN components if the
    /// sampler is singular.
    pub field: Vector3<f64>,

    /// Magnitude of `field`, or NaN if the sampler is singular.
    pub magnitude: f64,

    /// Set when the sampler coincides with a charge.
    pub singular: bool,
}

impl Component for MagneticFieldSampler {
    type Storage = VecStorage<Self>;
}

impl Default for MagneticFieldSampler {
    fn default() -> Self {
        MagneticFieldSampler {
            field: Vector3::new(0.0, 0.0, 0.0),
            magnitude: 0.0,
            singular: false,
        }
    }
}

impl fmt::Display for MagneticFieldSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.singular {
            return write!(f, "(singular)");
        }
        write!(
            f,
            "({:?},{:?},{:?})",
            self.field[0], self.field[1], self.field[2]
        )
    }
}

/// The net force exerted on a magnet entity by every other magnet in the world.
#[derive(Copy, Clone, Debug, Component)]
#[storage(VecStorage)]
pub struct MagnetForce {
    pub force: Vector3<f64>,
    /// Set when a charge of another magnet coincides with one of this magnet's charges.
    pub singular: bool,
}

impl Default for MagnetForce {
    fn default() -> Self {
        MagnetForce {
            force: Vector3::zeros(),
            singular: false,
        }
    }
}

/// System that clears the magnetic field samplers each frame.
pub struct ClearMagneticFieldSamplerSystem;

impl<'a> System<'a> for ClearMagneticFieldSamplerSystem {
    type SystemData = WriteStorage<'a, MagneticFieldSampler>;
    fn run(&mut self, mut sampler: Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        (&mut sampler).par_join().for_each(|sampler| {
            *sampler = MagneticFieldSampler::default();
        });
    }
}

/// Adds the field of every [Magnet] in the world to the magnetic field samplers.
pub struct SampleMagnetFieldSystem;

impl<'a> System<'a> for SampleMagnetFieldSystem {
    type SystemData = (
        WriteStorage<'a, MagneticFieldSampler>,
        ReadStorage<'a, Position>,
        ReadStorage<'a, Magnet>,
    );
    fn run(&mut self, (mut sampler, pos, magnets): Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        for magnet in (&magnets).join() {
            (&pos, &mut sampler)
                .par_join()
                .for_each(|(pos, sampler)| match magnet.field_at(&pos.pos) {
                    Ok(field) => sampler.field += field,
                    Err(_) => sampler.singular = true,
                });
        }
    }
}

/// System that calculates the magnitude of the magnetic field.
///
/// This system runs after all other magnetic field systems.
pub struct CalculateMagneticFieldMagnitudeSystem;

impl<'a> System<'a> for CalculateMagneticFieldMagnitudeSystem {
    type SystemData = WriteStorage<'a, MagneticFieldSampler>;
    fn run(&mut self, mut sampler: Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        (&mut sampler).par_join().for_each(|sampler| {
            if sampler.singular {
                sampler.field = Vector3::repeat(f64::NAN);
                sampler.magnitude = f64::NAN;
            } else {
                sampler.magnitude = sampler.field.norm();
            }
        });
    }
}

/// Attaches a [MagnetForce] to magnets that do not have one.
///
/// The component is inserted lazily, so it is first populated on the frame after the world is
/// next maintained.
pub struct AttachMagnetForceSystem;

impl<'a> System<'a> for AttachMagnetForceSystem {
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, Magnet>,
        ReadStorage<'a, MagnetForce>,
        Read<'a, LazyUpdate>,
    );
    fn run(&mut self, (ent, magnets, forces, updater): Self::SystemData) {
        for (ent, _magnet, _) in (&*ent, &magnets, !&forces).join() {
            updater.insert(ent, MagnetForce::default());
        }
    }
}

/// Calculates the net force on each magnet from all other magnets.
pub struct CalculateMagnetForceSystem;

impl<'a> System<'a> for CalculateMagnetForceSystem {
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, Magnet>,
        WriteStorage<'a, MagnetForce>,
    );
    fn run(&mut self, (ent, magnets, mut forces): Self::SystemData) {
        use rayon::prelude::*;
        use specs::ParJoin;

        (&*ent, &magnets, &mut forces)
            .par_join()
            .for_each(|(target_ent, target, force)| {
                let mut total: Vector3<f64> = Vector3::zeros();
                let mut singular = false;
                for (source_ent, source) in (&*ent, &magnets).join() {
                    if source_ent == target_ent {
                        continue;
                    }
                    match source.force_on(target) {
                        Ok(f) => total += f,
                        Err(_) => singular = true,
                    }
                }
                force.force = total;
                force.singular = singular;
            });
    }
}

/// Adds the systems required by magnetics to the dispatcher.
///
/// #Arguments
///
/// `builder`: the dispatch builder to modify
///
/// `deps`: any dependencies that must be completed before the magnetics systems run.
pub fn add_systems_to_dispatch(builder: &mut DispatcherBuilder<'static, 'static>, deps: &[&str]) {
    builder.add(ClearMagneticFieldSamplerSystem, "magnetics_clear", deps);
    builder.add(
        SampleMagnetFieldSystem,
        "magnetics_magnets",
        &["magnetics_clear"],
    );
    builder.add(
        CalculateMagneticFieldMagnitudeSystem,
        "magnetics_magnitude",
        &["magnetics_magnets"],
    );
    builder.add(AttachMagnetForceSystem, "attach_magnet_forces", deps);
    builder.add(CalculateMagnetForceSystem, "magnet_forces", deps);
}

/// Registers resources required by magnetics to the ecs world.
pub fn register_components(world: &mut World) {
    world.register::<Position>();
    world.register::<Magnet>();
    world.register::<MagneticFieldSampler>();
    world.register::<MagnetForce>();
}

#[cfg(test)]
pub mod tests {

    use super::*;
    use crate::charge::PointCharge;
    use specs::{Builder, Dispatcher, DispatcherBuilder, World};

    fn create_world() -> (World, Dispatcher<'static, 'static>) {
        let mut test_world = World::new();
        register_components(&mut test_world);
        let mut builder = DispatcherBuilder::new();
        add_systems_to_dispatch(&mut builder, &[]);
        let mut dispatcher = builder.build();
        dispatcher.setup(&mut test_world);
        (test_world, dispatcher)
    }

    fn unit_charge(x: f64, y: f64, z: f64, magnitude: f64) -> Magnet {
        Magnet::new(
            vec![PointCharge::new(Vector3::new(x, y, z), magnitude)],
            "b",
        )
    }

    /// Tests that samplers receive the superposed field of all magnets in the world.
    #[test]
    fn test_magnet_field_sampling() {
        let (mut test_world, mut dispatcher) = create_world();

        let a = unit_charge(0.0, 0.0, 0.0, 1.0);
        let b = unit_charge(2.0, 0.0, 0.0, -1.0);
        let target = Vector3::new(1.0, 1.0, 0.0);
        let expected = a.field_at(&target).unwrap() + b.field_at(&target).unwrap();

        test_world.create_entity().with(a).build();
        test_world.create_entity().with(b).build();
        let sampler_entity = test_world
            .create_entity()
            .with(Position { pos: target })
            .with(MagneticFieldSampler::default())
            .build();

        dispatcher.dispatch(&test_world);
        test_world.maintain();

        let samplers = test_world.read_storage::<MagneticFieldSampler>();
        let sampler = samplers.get(sampler_entity).expect("entity not found");
        assert_eq!(sampler.singular, false);
        assert_eq!(sampler.field, expected);
        assert_eq!(sampler.magnitude, expected.norm());
    }

    /// Tests that the field does not accumulate across frames.
    #[test]
    fn test_samplers_are_cleared() {
        let (mut test_world, mut dispatcher) = create_world();
        test_world
            .create_entity()
            .with(unit_charge(0.0, 0.0, 0.0, 1.0))
            .build();
        let sampler_entity = test_world
            .create_entity()
            .with(Position {
                pos: Vector3::new(0.0, 0.0, 1.0),
            })
            .with(MagneticFieldSampler::default())
            .build();

        dispatcher.dispatch(&test_world);
        let first = test_world
            .read_storage::<MagneticFieldSampler>()
            .get(sampler_entity)
            .expect("entity not found")
            .field;
        dispatcher.dispatch(&test_world);
        let second = test_world
            .read_storage::<MagneticFieldSampler>()
            .get(sampler_entity)
            .expect("entity not found")
            .field;
        assert_eq!(first, second);
    }

    #[test]
    fn test_singular_sampler_is_flagged() {
        let (mut test_world, mut dispatcher) = create_world();
        test_world
            .create_entity()
            .with(unit_charge(0.0, 0.0, 0.0, 1.0))
            .build();
        test_world
            .create_entity()
            .with(unit_charge(1.0, 0.0, 0.0, -1.0))
            .build();
        let sampler_entity = test_world
            .create_entity()
            .with(Position {
                pos: Vector3::new(0.0, 0.0, 0.0),
            })
            .with(MagneticFieldSampler::default())
            .build();

        dispatcher.dispatch(&test_world);

        let samplers = test_world.read_storage::<MagneticFieldSampler>();
        let sampler = samplers.get(sampler_entity).expect("entity not found");
        assert!(sampler.singular);
        assert!(sampler.magnitude.is_nan());
        assert!(sampler.field.iter().all(|c| c.is_nan()));
    }

    /// Tests that forces are attached to magnets and equal the pairwise force_on sums.
    #[test]
    fn test_magnet_forces() {
        let (mut test_world, mut dispatcher) = create_world();

        let a = unit_charge(0.0, 0.0, 0.0, 1.0);
        let b = unit_charge(0.0, 0.0, 1.0, 1.0);
        let expected_on_b = a.force_on(&b).unwrap();
        let a_entity = test_world.create_entity().with(a).build();
        let b_entity = test_world.create_entity().with(b).build();

        // forces are attached lazily on the first frame and calculated on the second.
        dispatcher.dispatch(&test_world);
        test_world.maintain();
        dispatcher.dispatch(&test_world);

        let forces = test_world.read_storage::<MagnetForce>();
        let on_a = forces.get(a_entity).expect("entity not found");
        let on_b = forces.get(b_entity).expect("entity not found");
        assert_eq!(on_b.force, expected_on_b);
        assert_eq!(on_a.force, -expected_on_b);
        assert!(on_b.force[2] > 0.0);
        assert!(!on_a.singular && !on_b.singular);
    }
}
