/// Depth attachment paired with the surface.
///
/// Recreated on every resize so its extent always matches the swapchain; the
/// pyramid pass relies on depth testing for face occlusion, so the render
/// pipeline's depth format must equal [`DepthTarget::FORMAT`].
pub struct DepthTarget {
    view: wgpu::TextureView,
}

impl DepthTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("giza depth texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        // The view keeps the texture alive; no other code touches it.
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { view }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}
