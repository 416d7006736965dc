//! Geometry list records for model files: objects, vertex parameter
//! blocks, faces and named sub-meshes.

use std::fmt;

use glam::{Vec2, Vec3, Vec4};

use crate::error::{DecodeError, DecodeResult};
use crate::reader::Reader;
use crate::record::{NameTag, Record, decode_list, read_name_tag};

/// Header preceding the geometry object list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryListHeader {
    /// Declared byte size of the whole geometry list.
    pub list_size: u32,
    pub id: u32,
    /// Human-readable marker bytes, kept raw and uninterpreted.
    pub marker: Vec<u8>,
    /// Number of geometry objects that follow.
    pub count: u32,
}

impl Record for GeometryListHeader {
    const KIND: &'static str = "geometry list header";
    const MIN_SIZE: usize = 16;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            list_size: r.read_u32("geometry list size")?,
            id: r.read_u32("geometry list id")?,
            marker: r.read_sized_bytes("geometry list marker")?,
            count: r.read_u32("geometry object count")?,
        })
    }
}

impl fmt::Display for GeometryListHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "list size: {}", self.list_size)?;
        writeln!(f, "id: {}", self.id)?;
        writeln!(f, "marker: {}", String::from_utf8_lossy(&self.marker))?;
        write!(f, "objects: {}", self.count)
    }
}

/// Version information present only when the version marker was recognized
/// in an object's name field. The two legacy fields exist only on this
/// branch of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryVersion {
    pub number: u32,
    /// Unidentified legacy field.
    pub unknown4: u32,
    /// Unidentified legacy field.
    pub unknown5: u32,
}

/// Per-face vertex parameters: normal, UV, one legacy float and a packed
/// color. Indexed by a face's parameter indices, not by vertex position.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexParams {
    pub normal: Vec3,
    pub uv: Vec2,
    /// Unidentified legacy field.
    pub unknown10: f32,
    pub color: [u8; 3],
}

impl VertexParams {
    /// Color normalized to `0.0..=1.0` per channel.
    #[must_use]
    pub fn color_rgb(&self) -> [f32; 3] {
        crate::rgb_to_float(self.color)
    }
}

impl Record for VertexParams {
    const KIND: &'static str = "vertex parameters";
    // Normal, UV, legacy float, packed color.
    const MIN_SIZE: usize = 27;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            normal: r.read_vec3("vertex normal")?,
            uv: r.read_vec2("vertex uv")?,
            unknown10: r.read_f32("vertex unknown10")?,
            color: r.read_rgb24("vertex color")?,
        })
    }
}

/// One triangle: indices into the owning object's vertex and parameter
/// lists, a face normal with its plane distance component, and an index
/// into the file's material list.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertex_indices: [u32; 3],
    pub param_indices: [u32; 3],
    /// Face normal; the fourth component is the plane distance/sign term.
    pub normal: Vec4,
    pub material_index: u32,
}

impl Record for Face {
    const KIND: &'static str = "face";
    // Fixed layout, no branching.
    const MIN_SIZE: usize = 44;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            vertex_indices: [
                r.read_u32("face vertex index")?,
                r.read_u32("face vertex index")?,
                r.read_u32("face vertex index")?,
            ],
            param_indices: [
                r.read_u32("face param index")?,
                r.read_u32("face param index")?,
                r.read_u32("face param index")?,
            ],
            normal: r.read_vec4("face normal")?,
            material_index: r.read_u32("face material index")?,
        })
    }
}

/// A named sub-selection of an object's vertices and faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    /// Unidentified legacy field.
    pub unknown6: u32,
    pub name: String,
    pub vertex_indices: Vec<u32>,
    pub face_indices: Vec<u32>,
    /// Unidentified legacy field.
    pub unknown7: u32,
    /// Opaque byte run of declared length. Semantics unknown; preserved
    /// verbatim for lossless round-trips by future tooling.
    pub unknown8: Vec<u8>,
    /// Unidentified legacy field.
    pub unknown9: u32,
}

impl Record for Mesh {
    const KIND: &'static str = "mesh";
    // Three legacy fields plus four length/count prefixes.
    const MIN_SIZE: usize = 28;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        let unknown6 = r.read_u32("mesh unknown6")?;
        let name = r.read_string("mesh name")?;

        let vertex_count = r.read_u32("mesh vertex index count")? as usize;
        let vertex_indices = r.read_vec_u32(vertex_count, "mesh vertex indices")?;

        let face_count = r.read_u32("mesh face index count")? as usize;
        let face_indices = r.read_vec_u32(face_count, "mesh face indices")?;

        Ok(Self {
            unknown6,
            name,
            vertex_indices,
            face_indices,
            unknown7: r.read_u32("mesh unknown7")?,
            unknown8: r.read_sized_bytes("mesh unknown8")?,
            unknown9: r.read_u32("mesh unknown9")?,
        })
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mesh {:?}: {} vertex indices, {} face indices, {} opaque bytes",
            self.name,
            self.vertex_indices.len(),
            self.face_indices.len(),
            self.unknown8.len()
        )
    }
}

/// One geometry object with its vertex, parameter, face and mesh lists.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryObject {
    /// Declared byte size of this record.
    pub size: u32,
    pub id: u32,
    /// Present only when the version marker was recognized.
    pub version: Option<GeometryVersion>,
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub vertex_params: Vec<VertexParams>,
    pub faces: Vec<Face>,
    pub meshes: Vec<Mesh>,
}

impl Record for GeometryObject {
    const KIND: &'static str = "geometry object";
    // Size, id, name length and the four list counts.
    const MIN_SIZE: usize = 28;

    fn decode(r: &mut Reader<'_>) -> DecodeResult<Self> {
        let size = r.read_u32("geometry object size")?;
        let id = r.read_u32("geometry object id")?;

        let (version, name) = match read_name_tag(r, "geometry object name")? {
            NameTag::Versioned => {
                let version = GeometryVersion {
                    number: r.read_u32("geometry object version")?,
                    unknown4: r.read_u32("geometry object unknown4")?,
                    unknown5: r.read_u32("geometry object unknown5")?,
                };
                let name = r.read_string("geometry object name")?;
                (Some(version), name)
            }
            NameTag::Name(name) => (None, name),
        };

        let vertex_count = r.read_u32("vertex count")? as usize;
        r.check_list(vertex_count, 12, "vertices")?;
        let mut vertices = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            vertices.push(r.read_vec3("vertex position")?);
        }

        let param_count = r.read_u32("vertex parameter count")? as usize;
        let vertex_params = decode_list::<VertexParams>(r, param_count)?;

        let face_count = r.read_u32("face count")? as usize;
        let faces = decode_list::<Face>(r, face_count)?;

        let mesh_count = r.read_u32("mesh count")? as usize;
        let meshes = decode_list::<Mesh>(r, mesh_count)?;

        Ok(Self {
            size,
            id,
            version,
            name,
            vertices,
            vertex_params,
            faces,
            meshes,
        })
    }
}

impl GeometryObject {
    /// Validate that every face and mesh index lands inside this object's
    /// own lists, and every face material index inside the file's material
    /// list.
    ///
    /// Indices never reference across objects; the orchestrator runs this
    /// as part of the decode pass so consumers can index without checks.
    pub fn validate(&self, material_count: usize) -> DecodeResult<()> {
        for face in &self.faces {
            for &index in &face.vertex_indices {
                check_index(index, self.vertices.len(), "face vertex index")?;
            }
            for &index in &face.param_indices {
                check_index(index, self.vertex_params.len(), "face param index")?;
            }
            check_index(face.material_index, material_count, "face material index")?;
        }
        for mesh in &self.meshes {
            for &index in &mesh.vertex_indices {
                check_index(index, self.vertices.len(), "mesh vertex index")?;
            }
            for &index in &mesh.face_indices {
                check_index(index, self.faces.len(), "mesh face index")?;
            }
        }
        Ok(())
    }
}

fn check_index(index: u32, len: usize, context: &'static str) -> DecodeResult<()> {
    if (index as usize) < len {
        Ok(())
    } else {
        Err(DecodeError::IndexOutOfRange { context, index, len })
    }
}

impl fmt::Display for GeometryObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "size: {}", self.size)?;
        writeln!(f, "id: {}", self.id)?;
        if let Some(version) = self.version {
            writeln!(
                f,
                "version: {} (unknown4: {}, unknown5: {})",
                version.number, version.unknown4, version.unknown5
            )?;
        }
        writeln!(f, "name: {}", self.name)?;
        write!(
            f,
            "{} vertices, {} params, {} faces, {} meshes",
            self.vertices.len(),
            self.vertex_params.len(),
            self.faces.len(),
            self.meshes.len()
        )
    }
}
