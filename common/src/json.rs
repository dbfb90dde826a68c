//! JSON persistence helpers.
//!
//! [`save_json`] and [`load_json`] are thin wrappers around `serde_json` that add an explicit
//! text [`Encoding`] and a few formatting knobs ([`JsonOptions`]).

use crate::error::Error;
use crate::file_utils::{read, write};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;
use std::fmt::{Display, Formatter as FmtFormatter};
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Character encoding of a JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8", alias = "utf8", alias = "UTF-8")]
    Utf8,
    /// ISO-8859-1, every byte maps to the code point of the same value.
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
    #[serde(rename = "ascii", alias = "us-ascii")]
    Ascii,
}

impl Display for Encoding {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Latin1 => write!(f, "latin-1"),
            Encoding::Ascii => write!(f, "ascii"),
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Encoding::Latin1),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

impl Encoding {
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, Error> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Latin1 => self.encode_with_limit(text, 0xFF),
            Encoding::Ascii => self.encode_with_limit(text, 0x7F),
        }
    }

    fn encode_with_limit(&self, text: &str, limit: u32) -> Result<Vec<u8>, Error> {
        text.chars()
            .map(|c| {
                if c as u32 <= limit {
                    Ok(c as u8)
                } else {
                    Err(Error::Encode {
                        character: c,
                        encoding: *self,
                    })
                }
            })
            .collect()
    }

    /// Decodes `bytes`, `origin` is only used to report errors.
    pub fn decode(&self, bytes: Vec<u8>, origin: &str) -> Result<String, Error> {
        let invalid = |offset| Error::Decode {
            path: origin.to_string(),
            encoding: *self,
            offset,
        };
        match self {
            Encoding::Utf8 => {
                String::from_utf8(bytes).map_err(|e| invalid(e.utf8_error().valid_up_to()))
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|b| *b as char).collect()),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(invalid(offset)),
                // ascii is valid utf-8
                None => {
                    String::from_utf8(bytes).map_err(|e| invalid(e.utf8_error().valid_up_to()))
                }
            },
        }
    }
}

/// Formatting options applied when writing JSON.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct JsonOptions {
    /// Number of spaces per nesting level, single line output when absent.
    pub indent: Option<usize>,
    /// Write object keys in lexicographic order.
    pub sort_keys: bool,
    /// Escape every non ascii character as `\uXXXX`.
    pub ensure_ascii: bool,
    /// Item and key separators. Defaults to `(", ", ": ")` on a single line and to `(",", ": ")`
    /// when indenting.
    pub separators: Option<(String, String)>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            indent: None,
            sort_keys: false,
            ensure_ascii: true,
            separators: None,
        }
    }
}

impl JsonOptions {
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            ..Default::default()
        }
    }

    /// `(item_separator, key_separator)` actually written.
    pub fn separators(&self) -> (&str, &str) {
        match (&self.separators, self.indent) {
            (Some((item, key)), _) => (item.as_str(), key.as_str()),
            (None, Some(_)) => (",", ": "),
            (None, None) => (", ", ": "),
        }
    }
}

/// Writes values with configurable separators, optional indentation and ascii escaping.
struct JsonFormatter<'a> {
    indent: Option<&'a [u8]>,
    item_separator: &'a [u8],
    key_separator: &'a [u8],
    ensure_ascii: bool,
    level: usize,
    has_value: bool,
}

impl<'a> JsonFormatter<'a> {
    fn new(indent: Option<&'a [u8]>, options: &'a JsonOptions) -> Self {
        let (item_separator, key_separator) = options.separators();
        Self {
            indent,
            item_separator: item_separator.as_bytes(),
            key_separator: key_separator.as_bytes(),
            ensure_ascii: options.ensure_ascii,
            level: 0,
            has_value: false,
        }
    }

    fn new_line<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(indent) = self.indent {
            writer.write_all(b"\n")?;
            for _ in 0..self.level {
                writer.write_all(indent)?;
            }
        }
        Ok(())
    }

    fn begin<W: ?Sized + io::Write>(&mut self, writer: &mut W, open: &[u8]) -> io::Result<()> {
        self.level += 1;
        self.has_value = false;
        writer.write_all(open)
    }

    fn end<W: ?Sized + io::Write>(&mut self, writer: &mut W, close: &[u8]) -> io::Result<()> {
        self.level -= 1;
        if self.has_value {
            self.new_line(writer)?;
        }
        writer.write_all(close)
    }

    fn begin_item<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if !first {
            writer.write_all(self.item_separator)?;
        }
        self.new_line(writer)
    }
}

impl<'a> Formatter for JsonFormatter<'a> {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if !self.ensure_ascii {
            return writer.write_all(fragment.as_bytes());
        }
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.begin(writer, b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.end(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.begin(writer, b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.end(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.begin_item(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.key_separator)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }
}

fn format_json<T: Serialize + ?Sized>(data: &T, options: &JsonOptions) -> Result<String, Error> {
    let indent = options.indent.map(|width| vec![b' '; width]);
    let formatter = JsonFormatter::new(indent.as_deref(), options);
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    data.serialize(&mut ser).map_err(Error::Serialize)?;
    // serde_json only ever writes valid utf-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Serializes `data` to a JSON string according to `options`.
///
/// Sorting goes through `serde_json::Value`, which cannot hold integers above `u64::MAX`:
/// with `sort_keys` such `u128` values are a [`Error::Serialize`] error.
pub fn to_json_string<T: Serialize + ?Sized>(
    data: &T,
    options: &JsonOptions,
) -> Result<String, Error> {
    if options.sort_keys {
        // serde_json maps are ordered by key
        let value = serde_json::to_value(data).map_err(Error::Serialize)?;
        format_json(&value, options)
    } else {
        format_json(data, options)
    }
}

pub fn from_json_str<T: DeserializeOwned>(text: &str, origin: &str) -> Result<T, Error> {
    serde_json::from_str(text).map_err(|source| Error::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Serializes `data` into the file at `pathname`, created or truncated.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    data: &T,
    pathname: P,
    encoding: Encoding,
    options: &JsonOptions,
) -> Result<(), Error> {
    let text = to_json_string(data, options)?;
    let bytes = encoding.encode(&text)?;
    write(&pathname, bytes)?;
    debug!(
        "Saved json to {} ({})",
        pathname.as_ref().display(),
        encoding
    );
    Ok(())
}

/// Parses the JSON file at `pathname`.
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(
    pathname: P,
    encoding: Encoding,
) -> Result<T, Error> {
    let origin = pathname.as_ref().to_string_lossy().into_owned();
    let text = encoding.decode(read(&pathname)?, &origin)?;
    debug!("Loaded json from {} ({})", origin, encoding);
    from_json_str(&text, &origin)
}

/// Loads a JSON file as a dynamic value.
pub fn load_json_value<P: AsRef<Path>>(pathname: P, encoding: Encoding) -> Result<Value, Error> {
    load_json(pathname, encoding)
}
