use hidlayout::Error;
use std::fs;
use std::path::Path;

pub fn run(path: &Path) -> Result<(), Error> {
    let descriptor = hrd::parse(&fs::read(path)?)?;

    println!("{}", descriptor.to_json()?);

    Ok(())
}
