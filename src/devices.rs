//! HID devices as the Linux kernel exposes them under sysfs.

use crate::assembler::DeviceInfo;
use crate::Error;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

pub const SYSFS_HID_DEVICES: &str = "/sys/bus/hid/devices";

/// Directory name of a HID device: `BBBB:VVVV:PPPP.NNNN`, all hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceName {
    pub bus: u16,
    pub vendor_id: u16,
    pub product_id: u16,
    pub instance: u16,
}

fn from_hex(data: &str) -> Option<u16> {
    u16::from_str_radix(data, 16).ok()
}

impl DeviceName {
    pub fn parse(name: &str) -> Option<Self> {
        if name.len() != 19 || !name.is_ascii() {
            return None;
        }
        let (bus, rest) = name.split_once(':')?;
        let (vid, rest) = rest.split_once(':')?;
        let (pid, instance) = rest.split_once('.')?;

        Some(Self {
            bus: from_hex(bus)?,
            vendor_id: from_hex(vid)?,
            product_id: from_hex(pid)?,
            instance: from_hex(instance)?,
        })
    }
}

/// Value of the `HID_NAME` line of a `uevent` file.
pub fn hid_name(uevent: &str) -> Option<&str> {
    uevent
        .lines()
        .find_map(|line| line.strip_prefix("HID_NAME="))
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

#[derive(Debug)]
pub struct HidDevice {
    pub path: PathBuf,
    pub name: DeviceName,
    pub info: DeviceInfo,
    pub descriptor: hrd::Descriptor,
}

impl HidDevice {
    pub fn open(path: &Path, name: DeviceName) -> Result<Self, Error> {
        let report_descriptor = fs::read(path.join("report_descriptor"))?;
        let mut descriptor = hrd::parse(&report_descriptor)?;
        descriptor.vendor_id = name.vendor_id as u32;
        descriptor.product_id = name.product_id as u32;

        let uevent = match fs::read_to_string(path.join("uevent")) {
            Ok(uevent) => uevent,
            Err(err) => {
                log::debug!("{}: no uevent: {err}", path.display());
                String::new()
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            name,
            info: DeviceInfo::new(None, hid_name(&uevent)),
            descriptor,
        })
    }
}

/// Calls `f` for every readable HID device below `root`. Devices that fail to
/// open are logged and skipped.
pub fn for_each_device(root: &Path, mut f: impl FnMut(&HidDevice)) -> Result<(), Error> {
    let mut entries = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str().and_then(DeviceName::parse) else {
            continue;
        };

        match HidDevice::open(&entry.path(), name) {
            Ok(device) => f(&device),
            Err(err) => log::error!("{}: {err}", file_name.to_string_lossy()),
        }
    }

    Ok(())
}
