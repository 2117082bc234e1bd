//! Log output setup.
//!
//! Normal command output goes through `log::info!` and is printed bare;
//! warnings and errors get a level prefix. `RUST_LOG` still overrides the
//! per-module levels chosen here.

use std::io::Write;

use log::{Level, LevelFilter};

pub(crate) fn init(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("modshelf", level)
        .target(env_logger::Target::Stdout)
        .parse_default_env()
        .format(move |buf, record| {
            if verbose {
                writeln!(
                    buf,
                    "[{} {:<5} {}] {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.target(),
                    record.args()
                )
            } else if record.level() == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(
                    buf,
                    "{}: {}",
                    record.level().as_str().to_lowercase(),
                    record.args()
                )
            }
        });

    if let Err(e) = builder.try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
