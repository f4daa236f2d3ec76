use crate::cmd::layout::load_options;
use hidlayout::devices::for_each_device;
use hidlayout::Error;
use hidlayout::LayoutAssembler;
use std::path::Path;

pub fn run(sysfs: &Path, options: Option<&Path>) -> Result<(), Error> {
    let assembler = LayoutAssembler::new(load_options(options)?);
    let mut layouts = Vec::new();

    for_each_device(sysfs, |device| {
        match assembler.assemble(&device.descriptor, &device.info) {
            Ok(layout) => layouts.push(layout),
            Err(err) => log::warn!("{}: {err}", device.path.display()),
        }
    })?;

    println!("{}", serde_json::to_string_pretty(&layouts)?);

    Ok(())
}
