//! Subset of the HID usage tables (HUT 1.12) needed to name and classify elements.

use std::fmt;

/// HID usage pages. Some values are the start of a reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr, strum::Display)]
#[repr(u32)]
pub enum UsagePage {
    Undefined = 0x00,
    GenericDesktop = 0x01,
    Simulation = 0x02,
    VRControls = 0x03,
    SportControls = 0x04,
    GameControls = 0x05,
    GenericDeviceControls = 0x06,
    Keyboard = 0x07,
    LEDs = 0x08,
    Button = 0x09,
    Ordinal = 0x0A,
    Telephony = 0x0B,
    Consumer = 0x0C,
    Digitizer = 0x0D,
    PID = 0x0F,
    Unicode = 0x10,
    AlphanumericDisplay = 0x14,
    MedicalInstruments = 0x40,
    Monitor = 0x80,
    Power = 0x84,
    BarCodeScanner = 0x8C,
    MagneticStripeReader = 0x8E,
    Camera = 0x90,
    Arcade = 0x91,
    VendorDefined = 0xFF00,
}

pub const VENDOR_DEFINED_START: u32 = 0xFF00;

/// Usages on the Generic Desktop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::FromRepr, strum::Display)]
#[repr(u32)]
pub enum GenericDesktop {
    Undefined = 0x00,
    Pointer = 0x01,
    Mouse = 0x02,
    Joystick = 0x04,
    Gamepad = 0x05,
    Keyboard = 0x06,
    Keypad = 0x07,
    MultiAxisController = 0x08,
    TabletPCControls = 0x09,
    AssistiveControl = 0x0A,
    X = 0x30,
    Y = 0x31,
    Z = 0x32,
    Rx = 0x33,
    Ry = 0x34,
    Rz = 0x35,
    Slider = 0x36,
    Dial = 0x37,
    Wheel = 0x38,
    HatSwitch = 0x39,
    CountedBuffer = 0x3A,
    ByteCount = 0x3B,
    MotionWakeup = 0x3C,
    Start = 0x3D,
    Select = 0x3E,
    Vx = 0x40,
    Vy = 0x41,
    Vz = 0x42,
    Vbrx = 0x43,
    Vbry = 0x44,
    Vbrz = 0x45,
    Vno = 0x46,
    FeatureNotification = 0x47,
    ResolutionMultiplier = 0x48,
    SystemControl = 0x80,
    SystemPowerDown = 0x81,
    SystemSleep = 0x82,
    SystemWakeUp = 0x83,
    SystemContextMenu = 0x84,
    SystemMainMenu = 0x85,
    SystemAppMenu = 0x86,
    SystemMenuHelp = 0x87,
    SystemMenuExit = 0x88,
    SystemMenuSelect = 0x89,
    SystemMenuRight = 0x8A,
    SystemMenuLeft = 0x8B,
    SystemMenuUp = 0x8C,
    SystemMenuDown = 0x8D,
    SystemColdRestart = 0x8E,
    SystemWarmRestart = 0x8F,
    DpadUp = 0x90,
    DpadDown = 0x91,
    DpadRight = 0x92,
    DpadLeft = 0x93,
    SystemDock = 0xA0,
    SystemUndock = 0xA1,
    SystemSetup = 0xA2,
    SystemBreak = 0xA3,
    SystemDebuggerBreak = 0xA4,
    ApplicationBreak = 0xA5,
    ApplicationDebuggerBreak = 0xA6,
    SystemSpeakerMute = 0xA7,
    SystemHibernate = 0xA8,
    SystemDisplayInvert = 0xB0,
    SystemDisplayInternal = 0xB1,
    SystemDisplayExternal = 0xB2,
    SystemDisplayBoth = 0xB3,
    SystemDisplayDual = 0xB4,
    SystemDisplayToggleIntExt = 0xB5,
    SystemDisplaySwapPrimarySecondary = 0xB6,
    SystemDisplayLCDAutoScale = 0xB7,
}

/// Human readable page name. Unknown pages print as their number.
pub struct PageName(pub u32);

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= VENDOR_DEFINED_START {
            return f.write_str("Vendor-Defined");
        }

        match UsagePage::from_repr(self.0) {
            Some(page) => write!(f, "{page}"),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Symbolic name of `usage` when the page is known and the usage is listed.
pub fn usage_name(usage_page: u32, usage: u32) -> Option<String> {
    match UsagePage::from_repr(usage_page)? {
        UsagePage::GenericDesktop => GenericDesktop::from_repr(usage).map(|u| u.to_string()),
        _ => None,
    }
}
