use std::{io, process::ExitCode, time::Duration};

use clap::Parser;
use usbtemp::{OneWireError, OneWireResult, Thermometer, UsbTempBuilder};

/// Read a DS18B20 probe on a USB-UART 1-Wire adapter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the serial adapter (e.g., /dev/ttyUSB0)
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    path: String,
    /// Number of readings, 0 to read forever
    #[arg(short, long, default_value_t = 1)]
    count: u32,
    /// Milliseconds between readings
    #[arg(short, long, default_value_t = 1000)]
    interval: u64,
    /// Retries of a transaction that failed on line noise
    #[arg(short, long, default_value_t = 0)]
    retries: u32,
    /// Milliseconds to wait for each echo
    #[arg(short, long, default_value_t = 500)]
    timeout: u64,
    /// Milliseconds allowed for a whole transaction
    #[arg(short, long, default_value_t = 5000)]
    deadline: u64,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error(transparent)]
    Bus(#[from] OneWireError<io::Error>),
    #[error("transaction did not finish within {0:?}")]
    Deadline(Duration),
}

impl Args {
    /// Run `op` under the transaction deadline, retrying transient failures.
    async fn attempt<T, F, Fut>(&self, mut op: F) -> Result<T, CliError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = OneWireResult<T, io::Error>>,
    {
        let deadline = Duration::from_millis(self.deadline);
        let mut tries = 0;
        loop {
            let err = match tokio::time::timeout(deadline, op()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) if err.is_transient() => CliError::Bus(err),
                Ok(Err(err)) => return Err(err.into()),
                Err(_) => CliError::Deadline(deadline),
            };
            if tries >= self.retries {
                return Err(err);
            }
            tries += 1;
            log::warn!("{err}, retrying ({tries}/{})", self.retries);
        }
    }
}

async fn run(args: &Args) -> Result<(), CliError> {
    let builder = UsbTempBuilder::new().with_timeout(Duration::from_millis(args.timeout));
    let therm = Thermometer::open_with(&args.path, builder)
        .await
        .map_err(|source| CliError::Open {
            path: args.path.clone(),
            source,
        })?;
    log::info!("Opened {}", args.path);

    let rom = args.attempt(|| therm.rom()).await?;
    println!("ROM: {rom}");

    let interval = Duration::from_millis(args.interval);
    let mut readings = 0;
    loop {
        let celsius = args.attempt(|| therm.temperature()).await?;
        println!("Temperature: {celsius:.2}");
        readings += 1;
        if args.count != 0 && readings >= args.count {
            break;
        }
        tokio::time::sleep(interval).await;
    }
    therm.close();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
