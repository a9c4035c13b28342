//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use huffpack::compression::compress::compress_file;
use huffpack::compression::decompress::{decompress_file, test_file};
use huffpack::tools::cli::{hufopts_init, Mode};
use huffpack::HuffError;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The cli lowers this.
    // Log to stderr so --stdout output is not mixed with messages.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Could not start the terminal logger.");
    }

    let options = hufopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress_file(&options),
        Mode::Unzip => decompress_file(&options),
        Mode::Test => test_file(&options),
    };

    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}
