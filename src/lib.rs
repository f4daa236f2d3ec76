pub mod assembler;
pub mod classify;
pub mod devices;
pub mod hat;
pub mod hex;
pub mod layout;
pub mod names;
pub mod options;
pub mod stick;

pub use assembler::synthesize;
pub use assembler::DeviceInfo;
pub use assembler::LayoutAssembler;
pub use classify::ElementClassifier;
pub use hat::Direction;
pub use hat::HatEncoding;
pub use layout::BaseLayout;
pub use layout::ControlLayoutTree;
pub use layout::ControlNode;
pub use layout::DeviceMatchKey;
pub use layout::FormatCode;
pub use layout::LayoutKind;
pub use layout::PrimitiveValue;
pub use layout::SynthesizedLayout;
pub use options::SynthesisOptions;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("descriptor has no usable input elements")]
    NoUsableElements,
    #[error("device has neither a product name nor a vendor id to name its layout by")]
    AmbiguousIdentity,
    #[error("malformed descriptor: {0}")]
    MalformedDescriptor(#[from] Malformed),
    #[error("usage page {usage_page:#x} usage {usage:#x} is not in the supported usages")]
    UnsupportedUsage { usage_page: u32, usage: u32 },

    #[error(transparent)]
    Descriptor(#[from] hrd::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structural problems that make a descriptor unusable as a memory layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("element {index} is zero bits wide")]
    ZeroSizedElement { index: usize },
    #[error("element {index} ends at bit {bit_end}, past the {report_bits} bit report")]
    ElementOutOfBounds {
        index: usize,
        bit_end: u64,
        report_bits: u64,
    },
}
