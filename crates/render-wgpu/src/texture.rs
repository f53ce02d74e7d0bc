use crate::gpu::RenderError;
use gallery_assets::{ImageData, mip_level_count};

/// Reject images the device cannot hold in a single 2D texture.
pub(crate) fn check_size(
    label: &str,
    width: u32,
    height: u32,
    max: u32,
) -> Result<(), RenderError> {
    if width > max || height > max {
        return Err(RenderError::TextureTooLarge {
            label: label.to_string(),
            width,
            height,
            max,
        });
    }
    Ok(())
}

/// A sampled 2D texture resident on the GPU.
pub struct GpuTexture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Upload an RGBA8 image and its mip chain as an sRGB texture with
    /// repeat addressing and trilinear filtering.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &ImageData,
        label: &str,
    ) -> Result<Self, RenderError> {
        check_size(
            label,
            image.width,
            image.height,
            device.limits().max_texture_dimension_2d,
        )?;

        let levels = image.mip_chain();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent(image),
            mip_level_count: mip_level_count(image.width, image.height),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level.rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.bytes_per_row()),
                    rows_per_image: Some(level.height),
                },
                extent(level),
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        tracing::debug!(
            label,
            width = image.width,
            height = image.height,
            mips = levels.len(),
            "uploaded texture"
        );
        Ok(Self { view, sampler })
    }

    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

fn extent(image: &ImageData) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: image.width.max(1),
        height: image.height.max(1),
        depth_or_array_layers: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_within_limit_is_accepted() {
        assert!(check_size("floor.jpg", 8192, 8192, 8192).is_ok());
        assert!(check_size("wall.jpg", 1, 4000, 8192).is_ok());
    }

    #[test]
    fn oversized_image_names_the_texture() {
        let err = check_size("floor.jpg", 9000, 9000, 8192).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TextureTooLarge { width: 9000, height: 9000, max: 8192, .. }
        ));
        assert!(err.to_string().contains("floor.jpg"));

        // One axis over the limit is enough.
        assert!(check_size("ceiling.jpg", 100, 8193, 8192).is_err());
    }
}
