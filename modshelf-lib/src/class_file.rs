//! Minimal JVM class-file reader.
//!
//! Only the constant pool is parsed; everything after it is ignored. That
//! is enough to recover string literals such as the version banner that
//! the game client and server classes embed.

use std::collections::HashMap;

use crate::error::VersionError;

const CLASS_MAGIC: u32 = 0xCAFE_BABE;

// Constant pool tags (JVMS 4.4)
const TAG_UTF8: u8 = 1;
const TAG_INTEGER: u8 = 3;
const TAG_FLOAT: u8 = 4;
const TAG_LONG: u8 = 5;
const TAG_DOUBLE: u8 = 6;
const TAG_CLASS: u8 = 7;
const TAG_STRING: u8 = 8;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_INTERFACE_METHODREF: u8 = 11;
const TAG_NAME_AND_TYPE: u8 = 12;
const TAG_METHOD_HANDLE: u8 = 15;
const TAG_METHOD_TYPE: u8 = 16;
const TAG_DYNAMIC: u8 = 17;
const TAG_INVOKE_DYNAMIC: u8 = 18;
const TAG_MODULE: u8 = 19;
const TAG_PACKAGE: u8 = 20;

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], VersionError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                VersionError::class_format(format!(
                    "unexpected end of data at offset {} (wanted {} bytes)",
                    self.pos, n
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, VersionError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, VersionError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, VersionError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// String literals (`CONSTANT_String`) of a class, in constant pool order.
///
/// Modified UTF-8 is decoded lossily; the version strings we look for are
/// plain ASCII.
pub fn string_constants(bytes: &[u8]) -> Result<Vec<String>, VersionError> {
    let mut r = Reader::new(bytes);

    let magic = r.u32()?;
    if magic != CLASS_MAGIC {
        return Err(VersionError::class_format(format!(
            "bad magic 0x{:08X}",
            magic
        )));
    }
    let _minor = r.u16()?;
    let _major = r.u16()?;

    let count = u32::from(r.u16()?);
    let mut utf8: HashMap<u32, String> = HashMap::new();
    let mut string_refs: Vec<u32> = Vec::new();

    // Slot 0 is unused; long and double take two slots.
    let mut index: u32 = 1;
    while index < count {
        let tag = r.u8()?;
        match tag {
            TAG_UTF8 => {
                let len = r.u16()? as usize;
                let raw = r.take(len)?;
                utf8.insert(index, String::from_utf8_lossy(raw).into_owned());
            }
            TAG_STRING => string_refs.push(u32::from(r.u16()?)),
            TAG_INTEGER | TAG_FLOAT => {
                r.take(4)?;
            }
            TAG_LONG | TAG_DOUBLE => {
                if index + 1 >= count {
                    return Err(VersionError::class_format(format!(
                        "two-slot constant at last pool index {}",
                        index
                    )));
                }
                r.take(8)?;
                index += 1;
            }
            TAG_CLASS | TAG_METHOD_TYPE | TAG_MODULE | TAG_PACKAGE => {
                r.take(2)?;
            }
            TAG_FIELDREF | TAG_METHODREF | TAG_INTERFACE_METHODREF | TAG_NAME_AND_TYPE
            | TAG_DYNAMIC | TAG_INVOKE_DYNAMIC => {
                r.take(4)?;
            }
            TAG_METHOD_HANDLE => {
                r.take(3)?;
            }
            other => {
                return Err(VersionError::class_format(format!(
                    "unknown constant pool tag {} at index {}",
                    other, index
                )));
            }
        }
        index += 1;
    }

    Ok(string_refs
        .into_iter()
        .filter_map(|i| utf8.get(&i).cloned())
        .collect())
}


#[cfg(test)]
mod tests {
    use super::fixtures::class_with_strings;
    use super::*;

    #[test]
    fn reads_string_literals_in_order() {
        let bytes = class_with_strings(&["first", "Minecraft Minecraft 1.12.2", "last"]);
        let strings = string_constants(&bytes).unwrap();
        assert_eq!(strings, vec!["first", "Minecraft Minecraft 1.12.2", "last"]);
    }

    #[test]
    fn rejects_bad_magic() {
        let err = string_constants(&[0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 52, 0, 1]).unwrap_err();
        assert!(matches!(err, VersionError::ClassFormat(_)));
    }

    #[test]
    fn rejects_truncated_pool() {
        let bytes = class_with_strings(&["something long enough"]);
        let err = string_constants(&bytes[..20]).unwrap_err();
        assert!(err.to_string().contains("unexpected end"));
    }

    #[test]
    fn rejects_long_in_last_pool_slot() {
        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52, 0xFF, 0xFF];
        // #1..#65533: integers, #65534: long with no second slot
        for _ in 1..65534 {
            bytes.extend_from_slice(&[3, 0, 0, 0, 0]);
        }
        bytes.push(5);
        bytes.extend_from_slice(&7u64.to_be_bytes());

        let err = string_constants(&bytes).unwrap_err();
        assert!(matches!(err, VersionError::ClassFormat(_)));
        assert!(err.to_string().contains("last pool index 65534"));
    }

    #[test]
    fn rejects_unknown_tag() {
        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52, 0, 2];
        bytes.push(99);
        let err = string_constants(&bytes).unwrap_err();
        assert!(err.to_string().contains("unknown constant pool tag 99"));
    }
}
