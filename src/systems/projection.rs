//! Dimensional Projector - 4D to 3D slice projection
//!
//! Points are perspective-projected along W from a fixed camera distance
//! behind the slice plane (`w_position`):
//!
//! - `scale = (camera_distance * w_fov / reference_fov) / (camera_distance - (w - w_position))`
//! - points with W-depth at or below `near_cutoff` are behind the camera and
//!   collapse to `degenerate_scale` instead of dividing by ~0 or a negative
//! - whole-body opacity fades as `exp(-(w - w_position)^2 * falloff / w_fov)`

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{Vec3, Vec4};
use crate::domain::ProjectionConfig;

/// Result of projecting a single 4D point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub position: Vec3,
    pub scale: f32,
}

/// Whole-body visibility derived from its W distance to the slice
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub opacity: f32,
    pub visible: bool,
    pub transparent: bool,
    pub depth_write: bool,
}

impl Fade {
    /// Non-4D dimensions render everything fully opaque
    pub const OPAQUE: Fade = Fade {
        opacity: 1.0,
        visible: true,
        transparent: false,
        depth_write: true,
    };
}

#[derive(Clone, Copy, Debug)]
pub struct Projector<'a> {
    w_position: f32,
    w_fov: f32,
    fov_scale: f32,
    config: &'a ProjectionConfig,
}

impl<'a> Projector<'a> {
    pub fn new(w_position: f32, w_fov: f32, config: &'a ProjectionConfig) -> Self {
        Self {
            w_position,
            w_fov,
            fov_scale: w_fov / config.reference_fov,
            config,
        }
    }

    pub fn w_position(&self) -> f32 {
        self.w_position
    }

    /// Perspective factor for a point at `w`
    #[inline]
    pub fn scale_at(&self, w: f32) -> f32 {
        let w_delta = self.config.camera_distance - (w - self.w_position);
        if w_delta > self.config.near_cutoff {
            (self.config.camera_distance * self.fov_scale) / w_delta
        } else {
            self.config.degenerate_scale
        }
    }

    #[inline]
    pub fn project(&self, p: Vec4) -> Projected {
        let scale = self.scale_at(p.w);
        Projected {
            position: p.xyz() * scale,
            scale,
        }
    }

    #[inline]
    pub fn opacity(&self, w: f32) -> f32 {
        let dist = (w - self.w_position).abs();
        (-(dist * dist) * (self.config.opacity_falloff / self.w_fov)).exp()
    }

    pub fn fade(&self, w: f32) -> Fade {
        let opacity = self.opacity(w);
        Fade {
            opacity,
            visible: opacity > self.config.hide_below,
            transparent: true,
            depth_write: opacity > self.config.depth_write_above,
        }
    }

    /// Project packed xyzw vertices into packed xyz render positions.
    ///
    /// Applied per vertex so a mesh crossing the slice warps visibly.
    /// `dst` must hold 3 floats for every 4 in `src`.
    pub fn project_vertices(&self, src: &[f32], dst: &mut [f32]) {
        debug_assert_eq!(src.len() / 4 * 3, dst.len());

        #[cfg(feature = "parallel")]
        {
            dst.par_chunks_exact_mut(3)
                .zip(src.par_chunks_exact(4))
                .for_each(|(out, v)| self.write_vertex(v, out));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (out, v) in dst.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
                self.write_vertex(v, out);
            }
        }
    }

    #[inline(always)]
    fn write_vertex(&self, v: &[f32], out: &mut [f32]) {
        let s = self.scale_at(v[3]);
        out[0] = v[0] * s;
        out[1] = v[1] * s;
        out[2] = v[2] * s;
    }
}
