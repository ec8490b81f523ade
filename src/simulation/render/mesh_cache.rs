//! Per-body vertex caches
//!
//! `rest` holds the undeformed vertices exactly as captured, either from an
//! entity's custom geometry or from `register_rest_vertices` for primitive
//! meshes. It is never written after capture. `render` (3 floats per vertex)
//! is rewritten in place every frame from `rest`, wobble and projection.

use std::collections::HashMap;

use log::debug;

use crate::core::{EngineError, Result};
use crate::domain::{Body, CustomGeometry, MeshKind};
use crate::systems::{Projector, Wobble};

pub struct CachedMesh {
    /// Mesh type the cache was built for; `None` until first seen on an entity
    kind: Option<MeshKind>,
    stride: usize,
    rest: Vec<f32>,
    /// Deformed xyzw working copy, only used when projecting a wobbling mesh
    scratch: Vec<f32>,
    render: Vec<f32>,
}

impl CachedMesh {
    pub fn new(id: &str, vertices: Vec<f32>, stride: usize, kind: Option<MeshKind>) -> Result<Self> {
        if !(stride == 3 || stride == 4) || vertices.len() % stride != 0 {
            return Err(EngineError::InvalidGeometry {
                id: id.to_string(),
                len: vertices.len(),
                stride,
            });
        }
        Ok(Self {
            kind,
            stride,
            scratch: Vec::new(),
            render: vertices.chunks_exact(stride).flat_map(|v| [v[0], v[1], v[2]]).collect(),
            rest: vertices,
        })
    }

    pub fn from_geometry(id: &str, geometry: &CustomGeometry) -> Result<Self> {
        Self::new(id, geometry.vertices.clone(), geometry.stride(), Some(MeshKind::CustomMesh))
    }

    pub fn kind(&self) -> Option<MeshKind> {
        self.kind
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn vertex_count(&self) -> usize {
        self.rest.len() / self.stride
    }

    pub fn rest(&self) -> &[f32] {
        &self.rest
    }

    pub fn render(&self) -> &[f32] {
        &self.render
    }

    pub fn render_ptr(&self) -> *const f32 {
        self.render.as_ptr()
    }

    /// Rebuild the render buffer for this frame. Returns the number of
    /// vertices pushed through the 4D projector.
    pub fn refresh(&mut self, wobble: Option<&Wobble>, projector: Option<&Projector>) -> usize {
        let stride = self.stride;

        if let (Some(projector), 4) = (projector, stride) {
            match wobble {
                None => projector.project_vertices(&self.rest, &mut self.render),
                Some(w) => {
                    self.scratch.clear();
                    self.scratch.extend_from_slice(&self.rest);
                    for v in self.scratch.chunks_exact_mut(4) {
                        let off = w.offset(v[1]);
                        v[0] += off;
                        v[2] += off;
                    }
                    projector.project_vertices(&self.scratch, &mut self.render);
                }
            }
            return self.vertex_count();
        }

        for (out, v) in self.render.chunks_exact_mut(3).zip(self.rest.chunks_exact(stride)) {
            let off = wobble.map_or(0.0, |w| w.offset(v[1]));
            out[0] = v[0] + off;
            out[1] = v[1];
            out[2] = v[2] + off;
        }
        0
    }
}

#[derive(Default)]
pub struct MeshCache {
    meshes: HashMap<String, CachedMesh>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&CachedMesh> {
        self.meshes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CachedMesh> {
        self.meshes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
    }

    /// Capture rest vertices for `id`. A mesh that already has a rest shape
    /// keeps it; returns whether a new capture happened.
    pub fn register(&mut self, id: &str, vertices: Vec<f32>, stride: usize) -> Result<bool> {
        if self.meshes.contains_key(id) {
            return Ok(false);
        }
        let mesh = CachedMesh::new(id, vertices, stride, None)?;
        debug!("mesh {id} captured: {} vertices, stride {stride}", mesh.vertex_count());
        self.meshes.insert(id.to_string(), mesh);
        Ok(true)
    }

    /// Match caches to the entity list: drop vanished bodies, rebuild on a
    /// mesh-type change and capture new custom geometry
    pub fn sync(&mut self, bodies: &[Body]) -> Result<()> {
        let live: HashMap<&str, MeshKind> = bodies
            .iter()
            .filter(|b| !b.is_particle_emitter())
            .map(|b| (b.id.as_str(), b.mesh_type))
            .collect();

        self.meshes.retain(|id, mesh| match (live.get(id.as_str()), mesh.kind) {
            (None, _) => {
                debug!("mesh {id} dropped");
                false
            }
            (Some(&now), Some(was)) if now != was => {
                debug!("mesh {id} dropped: type changed {was:?} -> {now:?}");
                false
            }
            _ => true,
        });

        for body in bodies.iter().filter(|b| !b.is_particle_emitter()) {
            match self.meshes.get_mut(&body.id) {
                Some(mesh) => {
                    if mesh.kind.is_none() {
                        mesh.kind = Some(body.mesh_type);
                    }
                }
                None => {
                    if body.mesh_type != MeshKind::CustomMesh {
                        continue;
                    }
                    if let Some(geometry) = &body.custom_geometry {
                        let mesh = CachedMesh::from_geometry(&body.id, geometry)?;
                        debug!(
                            "mesh {} captured: {} vertices, stride {}",
                            body.id,
                            mesh.vertex_count(),
                            mesh.stride()
                        );
                        self.meshes.insert(body.id.clone(), mesh);
                    }
                }
            }
        }
        Ok(())
    }
}
