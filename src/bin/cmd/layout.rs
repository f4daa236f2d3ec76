use hidlayout::hex::HexId;
use hidlayout::DeviceInfo;
use hidlayout::Error;
use hidlayout::LayoutAssembler;
use hidlayout::SynthesisOptions;
use hrd::Descriptor;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

pub struct Input {
    pub path: PathBuf,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub vendor_id: Option<HexId>,
    pub product_id: Option<HexId>,
    pub options: Option<PathBuf>,
}

pub fn load_options(path: Option<&Path>) -> Result<SynthesisOptions, Error> {
    match path {
        Some(path) => SynthesisOptions::load(path),
        None => Ok(SynthesisOptions::default()),
    }
}

fn load_descriptor(path: &Path) -> Result<Descriptor, Error> {
    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(Descriptor::from_json(&fs::read_to_string(path)?)?)
    } else {
        Ok(hrd::parse(&fs::read(path)?)?)
    }
}

pub fn run(input: Input) -> Result<(), Error> {
    let mut descriptor = load_descriptor(&input.path)?;
    if let Some(HexId(vendor_id)) = input.vendor_id {
        descriptor.vendor_id = vendor_id;
    }
    if let Some(HexId(product_id)) = input.product_id {
        descriptor.product_id = product_id;
    }

    let info = DeviceInfo {
        manufacturer: input.manufacturer,
        product: input.product,
    };
    let assembler = LayoutAssembler::new(load_options(input.options.as_deref())?);
    let layout = assembler.assemble(&descriptor, &info)?;

    println!("{}", serde_json::to_string_pretty(&layout)?);

    Ok(())
}
