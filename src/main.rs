extern crate magcharge as lib;

use lib::configuration::{
    load_file, Configuration, MagnetConfiguration, RotationConfiguration, ShapeConfiguration,
};
use lib::constant::PI;
use lib::magnetic::{self, MagnetForce, MagneticFieldSampler, Position};
use lib::output::write_charges_csv;
use lib::shapes::Cylinder;
use nalgebra::Vector3;
use specs::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

/// Two opposed cylinder magnets, the upper one tilted a quarter turn about its own centre.
fn default_configuration() -> Configuration {
    let cylinder = |z: f64| Cylinder {
        center: Vector3::new(0.0, 0.0, z),
        radius: 0.005,
        height: 0.01,
        b: 1.2,
        density: 5,
    };
    Configuration {
        n_threads: None,
        magnets: vec![
            MagnetConfiguration {
                shape: ShapeConfiguration::Cylinder(cylinder(0.0)),
                color: "b".to_string(),
                rotations: Vec::new(),
                inverted: false,
            },
            MagnetConfiguration {
                shape: ShapeConfiguration::Cylinder(cylinder(0.03)),
                color: "r".to_string(),
                rotations: vec![RotationConfiguration {
                    point: Vector3::new(0.0, 0.0, 0.025),
                    axis: Vector3::new(1.0, 0.0, 0.0),
                    angle: PI / 2.0,
                }],
                inverted: true,
            },
        ],
    }
}

fn main() {
    let now = Instant::now();

    // Load configuration if one is given.
    let configuration = match std::env::args().nth(1) {
        Some(path) => match load_file(&path) {
            Ok(configuration) => configuration,
            Err(why) => {
                eprintln!("Couldn't load configuration {}: {}", path, why);
                std::process::exit(1);
            }
        },
        None => default_configuration(),
    };

    if let Some(n_threads) = configuration.n_threads {
        if let Err(why) = rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()
        {
            eprintln!("Couldn't configure thread pool: {}", why);
        }
    }

    let magnets = match configuration.build() {
        Ok(magnets) => magnets,
        Err(why) => {
            eprintln!("Couldn't build magnets: {}", why);
            std::process::exit(1);
        }
    };
    for magnet in magnets.iter() {
        println!(
            "magnet '{}': {} charges, net charge {:e}",
            magnet.color(),
            magnet.size(),
            magnet.net_charge()
        );
    }

    match File::create("charges.csv") {
        Ok(file) => {
            if let Err(why) = write_charges_csv(BufWriter::new(file), &magnets) {
                eprintln!("Couldn't write to file: {}", why);
            }
        }
        Err(why) => eprintln!("Couldn't create charges.csv: {}", why),
    }

    // Create the simulation world and dispatcher.
    let mut world = World::new();
    magnetic::register_components(&mut world);
    let mut builder = DispatcherBuilder::new();
    magnetic::add_systems_to_dispatch(&mut builder, &[]);
    let mut dispatcher = builder.build();
    dispatcher.setup(&mut world);

    let magnet_entities: Vec<Entity> = magnets
        .into_iter()
        .map(|magnet| world.create_entity().with(magnet).build())
        .collect();
    let sampler_entities: Vec<Entity> = (1..10)
        .map(|i| {
            world
                .create_entity()
                .with(Position {
                    pos: Vector3::new(0.0, 0.0, 0.003 * i as f64 + 0.0005),
                })
                .with(MagneticFieldSampler::default())
                .build()
        })
        .collect();

    // Forces are attached on the first frame and evaluated on the second.
    dispatcher.dispatch(&world);
    world.maintain();
    dispatcher.dispatch(&world);

    let positions = world.read_storage::<Position>();
    let samplers = world.read_storage::<MagneticFieldSampler>();
    for entity in sampler_entities.iter() {
        if let (Some(position), Some(sampler)) = (positions.get(*entity), samplers.get(*entity)) {
            println!("z = {:.4} m: B = {} T", position.pos[2], sampler);
        }
    }
    let forces = world.read_storage::<MagnetForce>();
    for (i, entity) in magnet_entities.iter().enumerate() {
        if let Some(force) = forces.get(*entity) {
            if force.singular {
                println!("magnet {}: force is singular", i);
            } else {
                println!(
                    "magnet {}: force ({:e}, {:e}, {:e}) N",
                    i, force.force[0], force.force[1], force.force[2]
                );
            }
        }
    }

    println!("Simulation completed in {} ms.", now.elapsed().as_millis());
}
