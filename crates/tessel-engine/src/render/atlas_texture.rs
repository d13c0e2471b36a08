use anyhow::Result;

/// Decoded atlas pixels: tightly packed RGBA8, row-major.
///
/// Decoding an image file into this form is the caller's concern; the engine
/// only needs dimensions and bytes.
#[derive(Debug, Clone)]
pub struct AtlasImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl AtlasImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            width > 0 && height > 0 && pixels.len() == expected,
            "atlas image must be non-empty RGBA8: {}x{} needs {} bytes, got {}",
            width,
            height,
            expected,
            pixels.len()
        );
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// The tile-set atlas on the GPU, with the sampler every strategy binds.
///
/// Nearest filtering and clamp-to-edge wrapping: tiles are pixel art and the
/// per-cell UV inset already keeps samples away from neighboring cells.
pub struct AtlasTexture {
    pub(super) view: wgpu::TextureView,
    pub(super) sampler: wgpu::Sampler,
}

impl AtlasTexture {
    /// One-shot upload of the atlas image.
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &AtlasImage) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessel atlas"),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tessel atlas sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            sampler,
        }
    }
}
