use std::env;
use std::error::Error;
use std::process;

use log::{error, info};

use fbmark::bench::{self, ReportLog};
use fbmark::fb::FbDevice;

fn usage(program: &str) {
    println!("usage: {} <fbnum> <logfile>", program);
}

fn run(fb_index: usize, log_path: &str) -> Result<(), Box<dyn Error>> {
    let device = FbDevice::open(fb_index)?;
    let geometry = device.geometry()?;
    info!(
        "{} geometry: {}",
        device.path(),
        serde_json::to_string(&geometry)?
    );

    let mut fb = device.map(&geometry)?;
    let mut log = ReportLog::open(log_path)?;

    bench::run_all(&geometry, &mut fb, &mut log)?;
    Ok(())
}

fn main() {
    env_logger::init();

    println!("fbmark {}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        usage(&args[0]);
        return;
    }

    let fb_index: usize = match args[1].parse() {
        Ok(n) => n,
        Err(_) => {
            usage(&args[0]);
            return;
        }
    };

    if let Err(err) = run(fb_index, &args[2]) {
        error!("{}", err);
        process::exit(1);
    }
}
