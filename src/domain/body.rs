//! Body - the simulated counterpart of an editor entity
//!
//! Field names follow the editor's camelCase entity shape. Anything the
//! solver doesn't model is kept in `extra` so the entity array can be
//! handed back to the editor without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{EngineError, Vec3, Vec4};
use super::particles::ParticleConfig;

/// 3- or 4-component vector as stored in an entity transform.
///
/// Serialized as a plain array; `w` is present only for 4D-aware entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<f32>>", into = "Vec<f32>")]
pub struct Coords {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: Option<f32>,
}

impl Coords {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: None }
    }

    pub fn new4(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w: Some(w) }
    }

    pub fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// W coordinate, 0 for 3D entities
    #[inline]
    pub fn w_or_zero(&self) -> f32 {
        self.w.unwrap_or(0.0)
    }

    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_vec4(&self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, self.w_or_zero())
    }
}

impl TryFrom<Vec<Option<f32>>> for Coords {
    type Error = EngineError;

    fn try_from(v: Vec<Option<f32>>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [Some(x), Some(y), Some(z), rest @ ..] => Ok(Coords {
                x: *x,
                y: *y,
                z: *z,
                w: rest.first().copied().flatten(),
            }),
            _ => Err(EngineError::MalformedVector { len: v.len() }),
        }
    }
}

impl From<Coords> for Vec<f32> {
    fn from(c: Coords) -> Self {
        match c.w {
            Some(w) => vec![c.x, c.y, c.z, w],
            None => vec![c.x, c.y, c.z],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Coords,
    pub rotation: Coords,
    pub scale: Coords,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Coords::default(),
            rotation: Coords::default(),
            scale: Coords::one(),
        }
    }
}

/// Closed set of simulated body types.
///
/// Every dispatch over this enum is an exhaustive `match`; an unknown tag
/// coming from the editor is a deserialization error, never a silent default.
/// Editor-only types (`AERO`, `QUANTUM`, `VEHICLE`, `RAGDOLL`) fail the whole
/// step, so the editor must map them to one of these (usually `NONE`) first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhysicsType {
    Rigid,
    Soft,
    Fluid,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeshKind {
    #[default]
    Box,
    Sphere,
    Plane,
    Tesseract,
    Glome,
    Sprite,
    Cylinder,
    Cone,
    Torus,
    CustomMesh,
    ParticleSystem,
}

/// Imported mesh. `stride` 4 means every vertex carries its own W.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomGeometry {
    pub vertices: Vec<f32>,
    #[serde(default)]
    pub indices: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stride: Option<usize>,
}

impl CustomGeometry {
    pub fn stride(&self) -> usize {
        self.stride.unwrap_or(3)
    }
}

fn one() -> f32 {
    1.0
}

/// Physical parameters. Values are not clamped; callers keep them sane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsProps {
    #[serde(rename = "type")]
    pub kind: PhysicsType,
    #[serde(default = "one")]
    pub mass: f32,
    #[serde(default)]
    pub friction: f32,
    #[serde(default)]
    pub restitution: f32,
    #[serde(default)]
    pub angular_damping: f32,
    #[serde(default)]
    pub linear_damping: f32,
    #[serde(default = "one")]
    pub gravity_scale: f32,
    #[serde(default)]
    pub is_trigger: bool,
    /// Per-body override of the solver's sleep threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_threshold: Option<f32>,
    /// Soft-body wobble strength
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elasticity: Option<f32>,
    /// Slows puddle spreading for fluid bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscosity: Option<f32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PhysicsProps {
    pub fn new(kind: PhysicsType) -> Self {
        Self {
            kind,
            mass: 1.0,
            friction: 0.0,
            restitution: 0.0,
            angular_damping: 0.0,
            linear_damping: 0.0,
            gravity_scale: 1.0,
            is_trigger: false,
            sleep_threshold: None,
            elasticity: None,
            viscosity: None,
            extra: Map::new(),
        }
    }
}

/// Player controller movement parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerProps {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub move_speed: f32,
    #[serde(default)]
    pub jump_force: f32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ControllerProps {
    pub fn new(move_speed: f32, jump_force: f32) -> Self {
        Self {
            enabled: true,
            move_speed,
            jump_force,
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub id: String,
    #[serde(default)]
    pub tag: String,
    /// Never integrated. Static bodies stay in the spatial index but do not
    /// generate collision response; the ground plane is the only collider.
    #[serde(default)]
    pub is_static: bool,
    pub transform: Transform,
    #[serde(default)]
    pub mesh_type: MeshKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_geometry: Option<CustomGeometry>,
    pub physics: PhysicsProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerProps>,
    /// Initial velocity; seeds solver state the first time the body is integrated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Coords>,
    #[serde(default)]
    pub is_portal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle_config: Option<ParticleConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Body {
    pub fn new(id: impl Into<String>, kind: PhysicsType) -> Self {
        Self {
            id: id.into(),
            tag: String::new(),
            is_static: false,
            transform: Transform::default(),
            mesh_type: MeshKind::Box,
            custom_geometry: None,
            physics: PhysicsProps::new(kind),
            controller: None,
            velocity: None,
            is_portal: false,
            target_level_id: None,
            particle_config: None,
            extra: Map::new(),
        }
    }

    pub fn with_position(mut self, position: Coords) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_physics(mut self, f: impl FnOnce(&mut PhysicsProps)) -> Self {
        f(&mut self.physics);
        self
    }

    pub fn is_particle_emitter(&self) -> bool {
        self.mesh_type == MeshKind::ParticleSystem
    }

    /// Whether the integrator advances this body at all
    pub fn is_dynamic(&self) -> bool {
        !self.is_static
            && !self.is_particle_emitter()
            && self.physics.kind != PhysicsType::None
    }

    pub fn active_controller(&self) -> Option<&ControllerProps> {
        self.controller.as_ref().filter(|c| c.enabled)
    }
}
