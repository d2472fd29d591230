//! Draw-instance extraction
//!
//! The renderer is external. After each step it needs, per body, the model
//! matrix and the color, packed so the slice can be uploaded as a raw
//! instance buffer.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

use crate::sim::Body;

/// Per-body instance record: column-major model matrix plus RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub model: Mat4,
    pub color: Vec4,
}

impl BodyInstance {
    pub fn from_body(body: &Body) -> Self {
        Self {
            model: body.transform,
            color: body.color,
        }
    }
}

/// One instance per body, in population order
pub fn instances(bodies: &[Body]) -> Vec<BodyInstance> {
    bodies.iter().map(BodyInstance::from_body).collect()
}

/// Raw bytes of an instance slice, ready for upload
pub fn as_bytes(instances: &[BodyInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
