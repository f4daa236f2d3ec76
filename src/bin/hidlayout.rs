use hidlayout::hex::HexId;
use hidlayout::Error;
use std::path::PathBuf;
use std::process::ExitCode;

mod cmd {
    pub mod descriptor;
    pub mod layout;
    pub mod scan;
}

#[derive(clap::Parser)]
enum Command {
    /// Synthesize a control layout from a capability JSON file or a binary
    /// report descriptor
    Layout {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[arg(long)]
        manufacturer: Option<String>,

        #[arg(long)]
        product: Option<String>,

        #[arg(long, value_name = "HEX")]
        vendor_id: Option<HexId>,

        #[arg(long, value_name = "HEX")]
        product_id: Option<HexId>,

        /// Synthesis options JSON file
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,
    },

    /// Print a binary report descriptor as capability JSON
    Descriptor {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Synthesize layouts for every HID device known to the kernel
    Scan {
        #[arg(long, value_name = "DIR", default_value = hidlayout::devices::SYSFS_HID_DEVICES)]
        sysfs: PathBuf,

        /// Synthesis options JSON file
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,
    },
}

#[derive(clap::Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    env_logger::init();

    let Args { command } = clap::Parser::parse();

    let result: Result<(), Error> = match command {
        Command::Layout {
            path,
            manufacturer,
            product,
            vendor_id,
            product_id,
            options,
        } => cmd::layout::run(cmd::layout::Input {
            path,
            manufacturer,
            product,
            vendor_id,
            product_id,
            options,
        }),

        Command::Descriptor { path } => cmd::descriptor::run(&path),

        Command::Scan { sysfs, options } => cmd::scan::run(&sysfs, options.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
