pub mod builder;
pub mod descriptor;
pub mod element;
pub mod parser;
pub mod usage;

pub use builder::DescriptorBuilder;
pub use descriptor::Descriptor;
pub use element::Collection;
pub use element::CollectionType;
pub use element::Element;
pub use element::ElementFlags;
pub use element::ReportType;
pub use parser::Parser;
pub use usage::GenericDesktop;
pub use usage::UsagePage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected tag `Collection End`")]
    UnexpectedEndCollection,
    #[error("unexpected end of report descriptor")]
    UnexpectedEndOfReportDescriptor,

    #[error("missing `End Collection` tag")]
    MissingEndCollection,
    #[error("missing pop")]
    MissingPop,
    #[error("pop without push")]
    PopWithoutPush,
    #[error("report {report_id} is larger than a HID report can be")]
    ReportTooLarge { report_id: u32 },

    #[error("element with usage page {usage_page:#x} and usage {usage:#x} already exists in this report")]
    DuplicateElement { usage_page: u32, usage: u32 },
    #[error("no element has been added to the descriptor yet")]
    NoElement,

    #[error("bad capability json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a binary HID report descriptor. Vendor and product ids are not part
/// of the report descriptor and are left zero.
pub fn parse(data: &[u8]) -> Result<Descriptor, Error> {
    Parser::default().parse(data)
}
