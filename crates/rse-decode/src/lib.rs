//! Decoders for legacy Red Storm Entertainment binary asset formats.
//!
//! These formats have no public schema; field presence and meaning were
//! reverse-engineered from shipped game files. Decoding is a single forward
//! pass over an in-memory buffer: a byte cursor ([`reader::Reader`]) feeds a
//! hierarchy of record decoders ([`record::Record`]) that reconstruct the
//! file's object graph, honoring the embedded version markers that change
//! field layout mid-format.
//!
//! # Design principles
//!
//! - **Single pass**: forward-only cursor, no seeking, no I/O
//! - **Owned graphs**: a decoded file exclusively owns every record in it
//! - **Fail fast**: any malformed record aborts the decode; no partial files
//! - **No ambient state**: diagnostics go through an explicitly injected
//!   sink, defaulting to a no-op
//!
//! # Example
//!
//! ```
//! use rse_decode::ModelFile;
//!
//! # fn example(bytes: &[u8]) -> Result<(), rse_decode::DecodeError> {
//! let model = ModelFile::decode(bytes)?;
//! for object in &model.geometry_objects {
//!     println!("{}: {} faces", object.name, object.faces.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod dump;
mod error;
mod geometry;
mod lights;
mod material;
mod model;
mod reader;
mod record;

pub use dump::{DiagnosticSink, NoDiagnostics, WriteDiagnostics};
pub use error::{DecodeError, DecodeResult};
pub use geometry::{Face, GeometryListHeader, GeometryObject, GeometryVersion, Mesh, VertexParams};
pub use lights::{Light, LightFile};
pub use material::{Material, MaterialListHeader};
pub use model::{Footer, Header, ModelFile};
pub use reader::Reader;
pub use record::{Record, decode_list};

/// Normalize a packed 8-bit-per-channel color to `0.0..=1.0` floats.
#[must_use]
pub fn rgb_to_float(color: [u8; 3]) -> [f32; 3] {
    color.map(|c| f32::from(c) / 255.0)
}
