//! Forward Pass
//!
//! Single opaque pass drawing every visible mesh with the lit shader.
//! GPU buffers are created lazily per mesh and dropped once the mesh leaves
//! the scene.

use std::borrow::Cow;

use glam::{Mat4, Vec3};
use slotmap::SecondaryMap;
use wgpu::util::DeviceExt;

use crate::renderer::uniforms::{FrameUniforms, ObjectUniforms, Vertex};
use crate::resources::Geometry;
use crate::scene::{Camera, LightKind, MeshKey, Scene};

struct GpuObject {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct ForwardPass {
    pipeline: wgpu::RenderPipeline,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,

    objects: SecondaryMap<MeshKey, GpuObject>,
    draw_list: Vec<MeshKey>,
}

fn uniform_layout_entry(visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl ForwardPass {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Flat Lit Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("shaders/flat_lit.wgsl"))),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame BindGroup Layout"),
            entries: &[uniform_layout_entry(wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object BindGroup Layout"),
            entries: &[uniform_layout_entry(wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT)],
        });

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame BindGroup"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Forward Pipeline Layout"),
            bind_group_layouts: &[Some(&frame_layout), Some(&object_layout)],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Forward Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                ..Default::default()
            },
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            object_layout,
            objects: SecondaryMap::new(),
            draw_list: Vec::new(),
        }
    }

    /// Uploads frame and object uniforms and builds the draw list.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene, camera: &Camera) {
        // 1. Frame uniforms
        let mut frame = FrameUniforms {
            view_projection: *camera.view_projection_matrix(),
            camera_position: camera.position().extend(1.0),
            ..Default::default()
        };
        let mut ambient = Vec3::ZERO;
        for (light, world) in scene.iter_lights() {
            match light.kind {
                LightKind::Ambient => ambient += light.radiance(),
                LightKind::Directional => {
                    if !frame.push_directional(Vec3::from(world.translation), light.radiance()) {
                        log::warn!("Directional light limit reached, extra lights ignored");
                    }
                }
            }
        }
        frame.ambient = ambient.extend(0.0);
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

        // 2. Drop GPU data of meshes that left the scene
        self.objects.retain(|key, _| scene.meshes.contains_key(key));

        // 3. Objects
        self.draw_list.clear();
        for (handle, mesh) in scene.visible_meshes() {
            let (Some(node), Some(geometry), Some(material)) = (
                scene.get_node(handle),
                scene.geometries.get(mesh.geometry),
                scene.materials.get(mesh.material),
            ) else {
                continue;
            };
            let Some(mesh_key) = node.mesh else {
                continue;
            };

            let uniforms = ObjectUniforms::new(Mat4::from(*node.world_matrix()), material);

            if !self.objects.contains_key(mesh_key) {
                let object = self.create_object(device, &mesh.name, geometry, &uniforms);
                self.objects.insert(mesh_key, object);
            } else if let Some(object) = self.objects.get(mesh_key) {
                queue.write_buffer(&object.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            }
            self.draw_list.push(mesh_key);
        }
    }

    /// Records the pass. With `msaa_view` set, drawing goes to the
    /// multisampled target and is resolved into `surface_view`.
    pub fn run(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        msaa_view: Option<&wgpu::TextureView>,
        depth_view: &wgpu::TextureView,
        clear_color: wgpu::Color,
    ) {
        let (view, resolve_target, store) = match msaa_view {
            Some(msaa) => (msaa, Some(surface_view), wgpu::StoreOp::Discard),
            None => (surface_view, None, wgpu::StoreOp::Store),
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Forward Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);

        for key in &self.draw_list {
            let Some(object) = self.objects.get(*key) else {
                continue;
            };
            pass.set_bind_group(1, &object.bind_group, &[]);
            pass.set_vertex_buffer(0, object.vertex_buffer.slice(..));
            pass.set_index_buffer(object.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..object.index_count, 0, 0..1);
        }
    }

    fn create_object(
        &self,
        device: &wgpu::Device,
        name: &str,
        geometry: &Geometry,
        uniforms: &ObjectUniforms,
    ) -> GpuObject {
        let vertices: Vec<Vertex> = geometry
            .positions()
            .iter()
            .zip(geometry.normals())
            .map(|(&position, &normal)| Vertex { position, normal })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(name),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(name),
            contents: bytemuck::cast_slice(geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(name),
            contents: bytemuck::bytes_of(uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(name),
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        GpuObject {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices().len() as u32,
            uniform_buffer,
            bind_group,
        }
    }
}
