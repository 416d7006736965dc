//! Whole-file decoding for static model files.

use std::fmt;

use crate::dump::{DiagnosticSink, NoDiagnostics};
use crate::error::DecodeResult;
use crate::geometry::{GeometryListHeader, GeometryObject};
use crate::material::{Material, MaterialListHeader};
use crate::reader::Reader;
use crate::record::{Record, check_count, decode_list};

/// File header: a declared-length human-readable marker, not otherwise
/// interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub marker: Vec<u8>,
}

impl Record for Header {
    const KIND: &'static str = "header";
    const MIN_SIZE: usize = 4;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            marker: r.read_sized_bytes("header marker")?,
        })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "marker ({} bytes): {}",
            self.marker.len(),
            String::from_utf8_lossy(&self.marker)
        )
    }
}

/// File footer, structurally identical to the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub marker: Vec<u8>,
}

impl Record for Footer {
    const KIND: &'static str = "footer";
    const MIN_SIZE: usize = 4;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            marker: r.read_sized_bytes("footer marker")?,
        })
    }
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "marker ({} bytes): {}",
            self.marker.len(),
            String::from_utf8_lossy(&self.marker)
        )
    }
}

/// A fully decoded model file.
///
/// The file exclusively owns its object graph; nothing inside it references
/// the input buffer or any state outside the decode call that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFile {
    pub header: Header,
    pub material_list: MaterialListHeader,
    pub materials: Vec<Material>,
    pub geometry_list: GeometryListHeader,
    pub geometry_objects: Vec<GeometryObject>,
    pub footer: Footer,
    /// Bytes left after the footer. Diagnostic only; shipped files may
    /// legitimately carry trailing data.
    pub trailing_bytes: usize,
}

impl ModelFile {
    /// Decode a model file from its full contents.
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        Self::decode_with_diagnostics(data, &mut NoDiagnostics)
    }

    /// Decode a model file, reporting each decoded record to `sink`.
    ///
    /// Records decode in strict order: header, material-list header,
    /// materials, geometry-list header, geometry objects, footer. Any
    /// failure aborts the whole decode; no partial file is returned.
    pub fn decode_with_diagnostics(
        data: &[u8],
        sink: &mut dyn DiagnosticSink,
    ) -> DecodeResult<Self> {
        let mut r = Reader::new(data);

        let header = Header::decode(&mut r)?;
        sink.record(Header::KIND, &header);

        let material_list = MaterialListHeader::decode(&mut r)?;
        sink.record(MaterialListHeader::KIND, &material_list);

        let materials = decode_list::<Material>(&mut r, material_list.num_materials as usize)?;
        for material in &materials {
            sink.record(Material::KIND, material);
        }

        let geometry_list = GeometryListHeader::decode(&mut r)?;
        sink.record(GeometryListHeader::KIND, &geometry_list);

        let geometry_objects =
            decode_list::<GeometryObject>(&mut r, geometry_list.count as usize)?;
        for object in &geometry_objects {
            object.validate(materials.len())?;
            sink.record(GeometryObject::KIND, object);
        }

        let footer = Footer::decode(&mut r)?;
        sink.record(Footer::KIND, &footer);

        check_count(
            "materials",
            material_list.num_materials as usize,
            materials.len(),
        )?;
        check_count(
            "geometry objects",
            geometry_list.count as usize,
            geometry_objects.len(),
        )?;

        Ok(Self {
            header,
            material_list,
            materials,
            geometry_list,
            geometry_objects,
            footer,
            trailing_bytes: r.len() - r.position(),
        })
    }
}
