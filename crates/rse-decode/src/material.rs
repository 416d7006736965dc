//! Material list records for model files.

use std::fmt;

use crate::error::DecodeResult;
use crate::reader::Reader;
use crate::record::{NameTag, Record, read_name_tag};

/// Header preceding the material list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialListHeader {
    /// Declared byte size of the whole material list.
    pub list_size: u32,
    /// Unidentified legacy field.
    pub unknown1: u32,
    /// Human-readable marker bytes, kept raw and uninterpreted.
    pub marker: Vec<u8>,
    /// Number of materials that follow.
    pub num_materials: u32,
}

impl Record for MaterialListHeader {
    const KIND: &'static str = "material list header";
    const MIN_SIZE: usize = 16;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            list_size: r.read_u32("material list size")?,
            unknown1: r.read_u32("material list unknown1")?,
            marker: r.read_sized_bytes("material list marker")?,
            num_materials: r.read_u32("material count")?,
        })
    }
}

impl fmt::Display for MaterialListHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "list size: {}", self.list_size)?;
        writeln!(f, "unknown1: {}", self.unknown1)?;
        writeln!(f, "marker: {}", String::from_utf8_lossy(&self.marker))?;
        write!(f, "materials: {}", self.num_materials)
    }
}

/// One material definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Declared byte size of this record.
    pub size: u32,
    pub id: u32,
    /// Present only when the version marker was recognized in the name
    /// field.
    pub version: Option<u32>,
    pub name: String,
    /// Referenced texture file name; resolution against texture search
    /// paths is the consumer's concern.
    pub texture_name: String,
    pub opacity: f32,
    /// Unidentified legacy field (possibly full-lit flag).
    pub unknown2: f32,
    /// Unidentified legacy field (possibly smoothing).
    pub unknown3: u32,
    pub ambient: [u8; 3],
    pub diffuse: [u8; 3],
    pub specular: [u8; 3],
    pub specular_level: f32,
    /// Raw flag byte; any non-zero value means two-sided.
    pub two_sided: u8,
}

impl Material {
    /// Whether faces using this material render from both sides.
    #[must_use]
    pub fn is_two_sided(&self) -> bool {
        self.two_sided != 0
    }

    /// Ambient color normalized to `0.0..=1.0` per channel.
    #[must_use]
    pub fn ambient_rgb(&self) -> [f32; 3] {
        crate::rgb_to_float(self.ambient)
    }

    /// Diffuse color normalized to `0.0..=1.0` per channel.
    #[must_use]
    pub fn diffuse_rgb(&self) -> [f32; 3] {
        crate::rgb_to_float(self.diffuse)
    }

    /// Specular color normalized to `0.0..=1.0` per channel.
    #[must_use]
    pub fn specular_rgb(&self) -> [f32; 3] {
        crate::rgb_to_float(self.specular)
    }
}

impl Record for Material {
    const KIND: &'static str = "material";
    // Eight four-byte fields, three packed colors, the flag byte.
    const MIN_SIZE: usize = 42;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        let size = r.read_u32("material size")?;
        let id = r.read_u32("material id")?;

        let (version, name) = match read_name_tag(r, "material name")? {
            NameTag::Versioned => {
                let version = r.read_u32("material version")?;
                let name = r.read_string("material name")?;
                (Some(version), name)
            }
            NameTag::Name(name) => (None, name),
        };

        Ok(Self {
            size,
            id,
            version,
            name,
            texture_name: r.read_string("texture name")?,
            opacity: r.read_f32("material opacity")?,
            unknown2: r.read_f32("material unknown2")?,
            unknown3: r.read_u32("material unknown3")?,
            ambient: r.read_rgb24("material ambient")?,
            diffuse: r.read_rgb24("material diffuse")?,
            specular: r.read_rgb24("material specular")?,
            specular_level: r.read_f32("material specular level")?,
            two_sided: r.read_u8("material two-sided flag")?,
        })
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size: {}", self.size)?;
        writeln!(f, "id: {}", self.id)?;
        if let Some(version) = self.version {
            writeln!(f, "version: {version}")?;
        }
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "texture: {}", self.texture_name)?;
        writeln!(f, "opacity: {}", self.opacity)?;
        writeln!(
            f,
            "ambient: {:?} diffuse: {:?} specular: {:?}",
            self.ambient, self.diffuse, self.specular
        )?;
        writeln!(f, "specular level: {}", self.specular_level)?;
        write!(f, "two-sided: {}", self.is_two_sided())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;

    fn push_u32(data: &mut Vec<u8>, v: u32) {
        data.extend_from_slice(&v.to_le_bytes());
    }

    fn push_f32(data: &mut Vec<u8>, v: f32) {
        data.extend_from_slice(&v.to_le_bytes());
    }

    fn push_sized(data: &mut Vec<u8>, bytes: &[u8]) {
        push_u32(data, u32::try_from(bytes.len()).unwrap());
        data.extend_from_slice(bytes);
    }

    /// Everything after the name field, in on-disk order.
    fn push_material_tail(data: &mut Vec<u8>) {
        push_sized(data, b"wood.bmp\0");
        push_f32(data, 1.0); // opacity
        push_f32(data, 0.0); // unknown2
        push_u32(data, 3); // unknown3
        data.extend_from_slice(&[10, 20, 30]); // ambient
        data.extend_from_slice(&[40, 50, 60]); // diffuse
        data.extend_from_slice(&[70, 80, 90]); // specular
        push_f32(data, 0.5); // specular level
        data.push(1); // two-sided
    }

    #[test]
    fn test_material_with_version_marker() {
        let mut data = Vec::new();
        push_u32(&mut data, 100); // size
        push_u32(&mut data, 7); // id
        push_sized(&mut data, b"Version\0");
        push_u32(&mut data, 2); // version number
        push_sized(&mut data, b"crate\0");
        push_material_tail(&mut data);

        let mut r = Reader::new(&data);
        let material = Material::decode(&mut r).unwrap();
        assert_eq!(material.id, 7);
        assert_eq!(material.version, Some(2));
        assert_eq!(material.name, "crate");
        assert_eq!(material.texture_name, "wood.bmp");
        assert!(material.is_two_sided());
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_material_without_version() {
        let mut data = Vec::new();
        push_u32(&mut data, 100);
        push_u32(&mut data, 1);
        push_sized(&mut data, b"crate\0");
        push_material_tail(&mut data);

        let mut r = Reader::new(&data);
        let material = Material::decode(&mut r).unwrap();
        assert_eq!(material.version, None);
        assert_eq!(material.name, "crate");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_material_eight_byte_name_fallback() {
        // An 8-byte run that is not the marker is the name itself; no
        // version field follows it.
        let mut data = Vec::new();
        push_u32(&mut data, 100);
        push_u32(&mut data, 1);
        push_sized(&mut data, b"crate01\0");
        push_material_tail(&mut data);

        let mut r = Reader::new(&data);
        let material = Material::decode(&mut r).unwrap();
        assert_eq!(material.version, None);
        assert_eq!(material.name, "crate01");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_material_invalid_utf8_name() {
        let mut data = Vec::new();
        push_u32(&mut data, 100);
        push_u32(&mut data, 1);
        push_sized(&mut data, &[0xFF, 0xFE, 0x00]);

        let mut r = Reader::new(&data);
        assert!(matches!(
            Material::decode(&mut r),
            Err(DecodeError::CorruptString { .. })
        ));
    }

    #[test]
    fn test_material_color_normalization() {
        let mut data = Vec::new();
        push_u32(&mut data, 100);
        push_u32(&mut data, 1);
        push_sized(&mut data, b"m\0");
        push_material_tail(&mut data);

        let mut r = Reader::new(&data);
        let material = Material::decode(&mut r).unwrap();
        let diffuse = material.diffuse_rgb();
        assert!((diffuse[0] - 40.0 / 255.0).abs() < 1e-6);
        assert!((diffuse[1] - 50.0 / 255.0).abs() < 1e-6);
        assert!((diffuse[2] - 60.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_material_list_header() {
        let mut data = Vec::new();
        push_u32(&mut data, 500);
        push_u32(&mut data, 0);
        push_sized(&mut data, b"Materials\0");
        push_u32(&mut data, 4);

        let mut r = Reader::new(&data);
        let header = MaterialListHeader::decode(&mut r).unwrap();
        assert_eq!(header.list_size, 500);
        assert_eq!(header.marker, b"Materials\0");
        assert_eq!(header.num_materials, 4);
    }
}
