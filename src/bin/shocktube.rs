use std::path::PathBuf;
use clap::Parser;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use shocktube::setup::{self, RefinementField, Report, ShockTubeConfig, Side};

#[derive(Debug, Parser)]
#[clap(version = "1.0", author = "J. Zrake <jzrake@clemson.edu>")]
#[clap(about = "Build an adaptively refined shock tube mesh and its initial condition")]
struct Opts {
    #[clap(short = 'n', long, default_value = "100")]
    num_points: usize,

    #[clap(short = 'l', long, default_value = "1.0")]
    driver_length: f64,

    #[clap(short = 'g', long, default_value = "1.4")]
    gamma_law_index: f64,

    #[clap(long, default_value = "1.0")]
    driver_density: f64,

    #[clap(long, default_value = "1.0")]
    driver_pressure: f64,

    #[clap(long, default_value = "0.125")]
    driven_density: f64,

    #[clap(long, default_value = "0.1")]
    driven_pressure: f64,

    #[clap(short = 'p', long, default_value = "1")]
    refinement_passes: usize,

    #[clap(short = 'f', long, default_value = "density")]
    refinement_field: RefinementField,

    #[clap(short = 'o', long, default_value = "mesh.cbor")]
    output: PathBuf,

    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Opts {
    fn config(&self) -> ShockTubeConfig {
        ShockTubeConfig {
            num_points: self.num_points,
            driver_length: self.driver_length,
            gamma_law_index: self.gamma_law_index,
            driver: Side {
                mass_density: self.driver_density,
                pressure: self.driver_pressure,
            },
            driven: Side {
                mass_density: self.driven_density,
                pressure: self.driven_pressure,
            },
            refinement_passes: self.refinement_passes,
            refinement_field: self.refinement_field,
        }
    }
}

fn run(opts: &Opts) -> Result<(), Box<dyn std::error::Error>> {
    let config = opts.config();
    let (mesh, states) = setup::refine(&config)?;
    let report = Report::new(config, &mesh, states)?;

    let file = std::fs::File::create(&opts.output)?;
    let mut buffer = std::io::BufWriter::new(file);
    ciborium::ser::into_writer(&report, &mut buffer)?;

    info!("wrote {}", opts.output.display());
    Ok(())
}

fn main() {
    let opts = Opts::parse();

    if let Err(e) = SimpleLogger::new().with_level(opts.log_level).init() {
        eprintln!("failed to install logger: {}", e);
    }

    if let Err(e) = run(&opts) {
        error!("{}", e);
        std::process::exit(1);
    }
}
