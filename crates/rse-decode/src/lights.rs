//! Standalone light-list files, a sibling format in the same family.
//!
//! Light files share the cursor primitives and record pattern with model
//! files but carry their own record schema: a marker header followed by a
//! count-prefixed list of point-light definitions.

use std::fmt;

use glam::Vec3;

use crate::dump::{DiagnosticSink, NoDiagnostics};
use crate::error::DecodeResult;
use crate::reader::Reader;
use crate::record::{Record, check_count, decode_list};

/// One point-light definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub light_type: u32,
    pub position: Vec3,
    /// Row-major 3x3 rotation matrix.
    pub transform: [f32; 9],
    /// Color channels in `0..=255`.
    pub color: [u32; 3],
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub energy: f32,
    pub falloff: f32,
    /// Unidentified legacy field.
    pub unknown7: u32,
}

impl Light {
    /// Color normalized to `0.0..=1.0` per channel.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn color_rgb(&self) -> [f32; 3] {
        self.color.map(|c| c as f32 / 255.0)
    }
}

impl Record for Light {
    const KIND: &'static str = "light";
    // Name length prefix, type, position, transform, color, attenuation
    // triplet, energy, falloff, legacy field.
    const MIN_SIZE: usize = 92;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        let name = r.read_string("light name")?;
        let light_type = r.read_u32("light type")?;
        let position = r.read_vec3("light position")?;

        let transform_values = r.read_vec_f32(9, "light transform")?;
        let mut transform = [0.0f32; 9];
        transform.copy_from_slice(&transform_values);

        let color_values = r.read_vec_u32(3, "light color")?;

        Ok(Self {
            name,
            light_type,
            position,
            transform,
            color: [color_values[0], color_values[1], color_values[2]],
            constant_attenuation: r.read_f32("light constant attenuation")?,
            linear_attenuation: r.read_f32("light linear attenuation")?,
            quadratic_attenuation: r.read_f32("light quadratic attenuation")?,
            energy: r.read_f32("light energy")?,
            falloff: r.read_f32("light falloff")?,
            unknown7: r.read_u32("light unknown7")?,
        })
    }
}

impl fmt::Display for Light {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "type: {}", self.light_type)?;
        writeln!(f, "position: {}", self.position)?;
        writeln!(f, "color: {:?}", self.color)?;
        writeln!(
            f,
            "attenuation: {} / {} / {}",
            self.constant_attenuation, self.linear_attenuation, self.quadratic_attenuation
        )?;
        write!(f, "energy: {} falloff: {}", self.energy, self.falloff)
    }
}

/// A fully decoded light-list file.
#[derive(Debug, Clone, PartialEq)]
pub struct LightFile {
    /// Human-readable marker bytes, kept raw and uninterpreted.
    pub marker: Vec<u8>,
    pub lights: Vec<Light>,
    /// Bytes left after the light list. Diagnostic only.
    pub trailing_bytes: usize,
}

impl LightFile {
    /// Decode a light-list file from its full contents.
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        Self::decode_with_diagnostics(data, &mut NoDiagnostics)
    }

    /// Decode a light-list file, reporting each decoded record to `sink`.
    pub fn decode_with_diagnostics(
        data: &[u8],
        sink: &mut dyn DiagnosticSink,
    ) -> DecodeResult<Self> {
        let mut r = Reader::new(data);

        let marker = r.read_sized_bytes("light file marker")?;
        let count = r.read_u32("light count")? as usize;
        let lights = decode_list::<Light>(&mut r, count)?;
        for light in &lights {
            sink.record(Light::KIND, light);
        }

        check_count("lights", count, lights.len())?;

        Ok(Self {
            marker,
            lights,
            trailing_bytes: r.len() - r.position(),
        })
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

    fn push_light(data: &mut Vec<u8>, name: &[u8]) {
        push_sized(data, name);
        push_u32(data, 0); // type
        for v in [1.0f32, 2.0, 3.0] {
            push_f32(data, v); // position
        }
        for v in [1.0f32, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0] {
            push_f32(data, v); // transform
        }
        for c in [255u32, 128, 0] {
            push_u32(data, c); // color
        }
        for v in [1.0f32, 0.1, 0.01] {
            push_f32(data, v); // attenuation
        }
        push_f32(data, 60.0); // energy
        push_f32(data, 5.0); // falloff
        push_u32(data, 0); // unknown7
    }

    fn light_file(count: u32, present: u32) -> Vec<u8> {
        let mut data = Vec::new();
        push_sized(&mut data, b"Lights\0");
        push_u32(&mut data, count);
        for i in 0..present {
            push_light(&mut data, if i == 0 { b"lamp\0" } else { b"spot\0" });
        }
        data
    }

    #[test]
    fn test_light_file_decodes() {
        let data = light_file(2, 2);
        let file = LightFile::decode(&data).unwrap();

        assert_eq!(file.marker, b"Lights\0");
        assert_eq!(file.lights.len(), 2);
        assert_eq!(file.lights[0].name, "lamp");
        assert_eq!(file.lights[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(file.lights[0].color, [255, 128, 0]);
        assert_eq!(file.trailing_bytes, 0);
    }

    #[test]
    fn test_light_color_normalization() {
        let data = light_file(1, 1);
        let file = LightFile::decode(&data).unwrap();
        let color = file.lights[0].color_rgb();
        assert!((color[0] - 1.0).abs() < 1e-6);
        assert!((color[1] - 128.0 / 255.0).abs() < 1e-6);
        assert!((color[2]).abs() < 1e-6);
    }

    #[test]
    fn test_light_file_truncated() {
        let data = light_file(2, 1);
        assert!(matches!(
            LightFile::decode(&data),
            Err(DecodeError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_light_file_trailing_bytes() {
        let mut data = light_file(1, 1);
        data.extend_from_slice(&[0, 0, 0]);
        let file = LightFile::decode(&data).unwrap();
        assert_eq!(file.trailing_bytes, 3);
    }
}
