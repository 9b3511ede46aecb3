use anyhow::{bail, Result};
use wgpu::util::DeviceExt;

use crate::device::DepthTarget;
use crate::geometry::{Mesh, Vertex};
use crate::math::Mat4;
use crate::render::{RenderCtx, RenderTarget};

use std::f32::consts::FRAC_PI_4;

// Fixed camera/model constants. These are part of the demo's look, not
// user-configurable knobs.
const FOV_Y: f32 = FRAC_PI_4;
const NEAR: f32 = 0.1;
const FAR: f32 = 10.0;
const CAMERA_PUSH_Z: f32 = -3.0;
const MODEL_DROP_Y: f32 = -0.2;
const MODEL_SCALE: f32 = 1.6;

/// Minimum binding size of the MVP uniform: one `Mat4`, 64 bytes.
const MVP_BINDING_SIZE: std::num::NonZeroU64 =
    match std::num::NonZeroU64::new(std::mem::size_of::<Mat4>() as u64) {
        Some(n) => n,
        None => panic!("Mat4 has non-zero size"),
    };

/// Builds the per-frame model-view-projection matrix.
///
/// Composition order is load-bearing: the object is scaled, then rotated
/// about Y, then dropped along Y, then pushed back along Z into view, then
/// projected. Reordering changes the on-screen result.
pub fn compose_mvp(angle: f32, aspect: f32) -> Mat4 {
    Mat4::perspective(FOV_Y, aspect, NEAR, FAR)
        * Mat4::translate_z(CAMERA_PUSH_Z)
        * Mat4::translate_y(MODEL_DROP_Y)
        * Mat4::rotation_y(angle)
        * Mat4::scale(MODEL_SCALE)
}

/// Renderer for the solid-shaded pyramid.
///
/// All GPU resources are created once in [`PyramidRenderer::new`] and are
/// write-once except the MVP uniform, which is re-uploaded every frame.
pub struct PyramidRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    mvp_ubo: wgpu::Buffer,
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl PyramidRenderer {
    /// Compiles the shader, builds the pipeline and uploads the mesh.
    ///
    /// Shader compilation, pipeline linkage and buffer creation are one-shot
    /// setup preconditions. They run inside a wgpu validation error scope so
    /// a malformed shader or incompatible stage linkage surfaces its
    /// compiler/linker diagnostic as an error here instead of leaving an
    /// unusable program behind.
    pub fn new(ctx: &RenderCtx<'_>) -> Result<Self> {
        // The guard keeps the validation scope open across all of setup;
        // popping it below collects any diagnostic raised in between.
        let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("giza pyramid shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/pyramid.wgsl").into()),
            });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("giza pyramid bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(MVP_BINDING_SIZE),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("giza pyramid pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("giza pyramid pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        // Opaque output; no blending.
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // The mesh is small and convex-ish; depth testing alone
                    // handles occlusion, so no culling.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTarget::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        let mesh = Mesh::pyramid();

        let vbo = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("giza pyramid vbo"),
                contents: bytemuck::cast_slice(mesh.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let ibo = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("giza pyramid ibo"),
                contents: bytemuck::cast_slice(mesh.indices()),
                usage: wgpu::BufferUsages::INDEX,
            });

        let mvp_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("giza pyramid mvp ubo"),
            size: std::mem::size_of::<Mat4>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("giza pyramid bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mvp_ubo.as_entire_binding(),
            }],
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            bail!("pyramid renderer setup rejected by wgpu: {err}");
        }

        Ok(Self {
            pipeline,
            bind_group,
            mvp_ubo,
            vbo,
            ibo,
            index_count: mesh.index_count(),
        })
    }

    /// Number of indices issued per draw call.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Draws the pyramid at `angle` radians of Y rotation.
    ///
    /// Expects color and depth attachments already cleared this frame; the
    /// pass loads both and draws with depth testing so nearer faces occlude
    /// farther ones.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, angle: f32) {
        let mvp = compose_mvp(angle, ctx.viewport.aspect());
        ctx.queue
            .write_buffer(&self.mvp_ubo, 0, bytemuck::bytes_of(&mvp));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("giza pyramid pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ── uniform contract ──────────────────────────────────────────────────

    #[test]
    fn mvp_binding_is_one_matrix() {
        assert_eq!(MVP_BINDING_SIZE.get(), 64);
        assert_eq!(MVP_BINDING_SIZE.get(), std::mem::size_of::<Mat4>() as u64);
    }

    #[test]
    fn shader_declares_expected_interface() {
        // The WGSL source is a fixed constant; pin the names the pipeline
        // and the uniform contract depend on.
        let src = include_str!("shaders/pyramid.wgsl");
        assert!(src.contains("var<uniform> mvp_matrix: mat4x4<f32>"));
        assert!(src.contains("@group(0) @binding(0)"));
        assert!(src.contains("fn vs_main"));
        assert!(src.contains("fn fs_main"));
    }

    // ── golden MVP ────────────────────────────────────────────────────────

    #[test]
    fn mvp_at_rest_pins_base_corner() {
        // Object-space (-0.5, 0, -0.5) at angle 0, aspect 1:
        //   scale 1.6      -> (-0.8, 0.0, -0.8)
        //   drop y by 0.2  -> (-0.8, -0.2, -0.8)
        //   push z by 3    -> (-0.8, -0.2, -3.8)
        //   project (f = 1/tan(π/8))
        let f = 1.0 / (std::f32::consts::FRAC_PI_8).tan();
        let clip = compose_mvp(0.0, 1.0).transform([-0.5, 0.0, -0.5, 1.0]);

        assert_abs_diff_eq!(clip[0], -0.8 * f, epsilon = 1e-5);
        assert_abs_diff_eq!(clip[1], -0.2 * f, epsilon = 1e-5);
        // z_clip = (far+near)/(near-far) * -3.8 + 2*far*near/(near-far)
        assert_abs_diff_eq!(clip[2], 3.674_747_5, epsilon = 1e-5);
        assert_abs_diff_eq!(clip[3], 3.8, epsilon = 1e-6);
    }

    #[test]
    fn mvp_keeps_apex_on_vertical_axis_for_any_angle() {
        // The apex sits on the rotation axis, so yaw cannot move it.
        for angle in [0.0, 0.4, 2.0, 5.5] {
            let clip = compose_mvp(angle, 1.0).transform([0.0, 0.8, 0.0, 1.0]);
            assert_abs_diff_eq!(clip[0], 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn aspect_only_scales_x() {
        let square = compose_mvp(0.3, 1.0).transform([-0.5, 0.0, -0.5, 1.0]);
        let wide = compose_mvp(0.3, 2.0).transform([-0.5, 0.0, -0.5, 1.0]);
        assert_abs_diff_eq!(wide[0], square[0] / 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(wide[1], square[1], epsilon = 1e-6);
        assert_abs_diff_eq!(wide[2], square[2], epsilon = 1e-6);
        assert_abs_diff_eq!(wide[3], square[3], epsilon = 1e-6);
    }

    #[test]
    fn base_corners_land_inside_clip_volume() {
        // Sanity: the whole base should be visible at rest with aspect 1.
        let mvp = compose_mvp(0.0, 1.0);
        for (x, z) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            let c = mvp.transform([x, 0.0, z, 1.0]);
            let w = c[3];
            assert!(w > 0.0);
            assert!(c[0].abs() <= w && c[1].abs() <= w);
            assert!(c[2] >= -w && c[2] <= w);
        }
    }
}
