use crate::artifacts::index::{SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub marker: String,
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    pub fn empty() -> Self {
        IndexHeader::new(SIGNATURE.to_string(), VERSION, 0)
    }
}

impl Packable for IndexHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut header_bytes = Vec::new();
        header_bytes.write_all(self.marker.as_bytes())?;
        header_bytes.write_u32::<BigEndian>(self.version)?;
        header_bytes.write_u32::<BigEndian>(self.entries_count)?;

        Ok(Bytes::from(header_bytes))
    }
}

impl Unpackable for IndexHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut marker = [0u8; 4];
        reader.read_exact(&mut marker)?;
        let version = reader.read_u32::<BigEndian>()?;
        let entries_count = reader.read_u32::<BigEndian>()?;

        Ok(IndexHeader::new(
            String::from_utf8_lossy(&marker).into_owned(),
            version,
            entries_count,
        ))
    }
}
