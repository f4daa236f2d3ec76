use clap::builder::TypedValueParser;
use clap::builder::ValueParserFactory;
use clap::error::ErrorKind;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::fmt;

/// Vendor or product id given on the command line in hex, with or without a
/// `0x` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexId(pub u32);

#[derive(Clone)]
pub struct HexIdParser;

impl TypedValueParser for HexIdParser {
    type Value = HexId;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        TypedValueParser::parse(self, cmd, arg, value.to_owned())
    }

    fn parse(
        &self,
        _cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: OsString,
    ) -> Result<Self::Value, clap::Error> {
        let value = value
            .into_string()
            .map_err(|_| clap::Error::new(ErrorKind::InvalidUtf8))?;

        value.parse().map_err(|_| {
            clap::Error::raw(
                ErrorKind::InvalidValue,
                format!("Incorrect hex id `{value}`\n"),
            )
        })
    }
}

impl ValueParserFactory for HexId {
    type Parser = HexIdParser;

    fn value_parser() -> Self::Parser {
        HexIdParser
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseHexIdError;

impl std::str::FromStr for HexId {
    type Err = ParseHexIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.is_empty() || digits.len() > 8 {
            return Err(ParseHexIdError);
        }

        digits.bytes().try_fold(0u32, |id, digit| {
            let nibble = match digit {
                x @ b'0'..=b'9' => x - b'0',
                x @ b'a'..=b'f' => x - b'a' + 0x0a,
                x @ b'A'..=b'F' => x - b'A' + 0x0a,
                _ => return Err(ParseHexIdError),
            };
            Ok((id << 4) | nibble as u32)
        })
        .map(HexId)
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
