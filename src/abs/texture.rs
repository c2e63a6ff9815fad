//! Structs and functions for handling textures.
//!
//! The module provides [`Texture`] for 2D textures and [`CubeTexture`] for cube
//! maps. What gets uploaded and how it is sampled is described by
//! [`TextureParams`], which involves no GL calls and can be inspected on its own.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;

use crate::abs::Image;
use crate::error::ResourceError;

/// `GL_R`, not exported by glow. Accepted as a single channel storage format.
const GL_R: u32 = 0x2002;

/// Number of faces of a cube map.
pub const CUBE_FACES: usize = 6;

/// Upload format for an 8-bit image with the given channel count.
pub fn channel_format(channel_count: u8) -> u32 {
    match channel_count {
        1 => glow::RED,
        2 => glow::RG,
        3 => glow::RGB,
        _ => glow::RGBA,
    }
}

/// Upload format matching a storage format, used when allocating empty textures.
pub fn image_format_for(format: u32) -> u32 {
    match format {
        glow::DEPTH_COMPONENT => glow::DEPTH_COMPONENT,
        glow::RGB | glow::RGB16F | glow::RGB32F => glow::RGB,
        glow::RG | glow::RG16F | glow::RG32F => glow::RG,
        glow::RED | GL_R | glow::R16F | glow::R32F => glow::RED,
        _ => glow::RGBA,
    }
}

/// Everything needed to allocate and configure a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureParams {
    pub internal_format: u32,
    pub format: u32,
    pub pixel_type: u32,
    pub min_filter: u32,
    pub mag_filter: u32,
    pub wrap_s: u32,
    pub wrap_t: u32,
    pub mipmaps: bool,
}

/// Components per texel for an upload format.
fn component_count(format: u32) -> usize {
    match format {
        glow::RED | glow::DEPTH_COMPONENT => 1,
        glow::RG => 2,
        glow::RGB => 3,
        _ => 4,
    }
}

impl TextureParams {
    /// Bytes an upload of `width` by `height` texels reads from the source.
    ///
    /// `None` for pixel types other than `UNSIGNED_BYTE`, which are only used
    /// for empty allocations.
    pub fn upload_len(&self, width: u32, height: u32) -> Option<usize> {
        (self.pixel_type == glow::UNSIGNED_BYTE)
            .then(|| width as usize * height as usize * component_count(self.format))
    }

    /// Checks that `data` holds at least as many bytes as the upload reads.
    pub fn check_data(&self, width: u32, height: u32, data: &[u8]) -> Result<(), ResourceError> {
        let expected = self.upload_len(width, height).ok_or_else(|| {
            ResourceError::Gl(format!(
                "cannot upload pixel type {:#x} from bytes",
                self.pixel_type
            ))
        })?;
        if data.len() < expected {
            return Err(ResourceError::Gl(format!(
                "pixel data is {} bytes, {width}x{height} upload needs {expected}",
                data.len()
            )));
        }
        Ok(())
    }

    /// Parameters for a mipmapped 2D texture holding `image`.
    pub fn for_image(image: &Image) -> Self {
        let format = channel_format(image.channel_count());
        Self {
            internal_format: format,
            format,
            pixel_type: glow::UNSIGNED_BYTE,
            min_filter: glow::LINEAR_MIPMAP_LINEAR,
            mag_filter: glow::LINEAR,
            wrap_s: glow::CLAMP_TO_EDGE,
            wrap_t: glow::CLAMP_TO_EDGE,
            mipmaps: true,
        }
    }

    /// Parameters for an empty texture used as a render target.
    pub fn for_target(format: u32, pixel_type: u32) -> Self {
        Self {
            internal_format: format,
            format: image_format_for(format),
            pixel_type,
            min_filter: glow::LINEAR,
            mag_filter: glow::LINEAR,
            wrap_s: glow::CLAMP_TO_EDGE,
            wrap_t: glow::CLAMP_TO_EDGE,
            mipmaps: false,
        }
    }

    /// Parameters for one cube map face.
    ///
    /// Storage is always RGB while the upload format follows the face's channel
    /// count, so faces that are not RGB lose or misread channels.
    pub fn for_cube_face(image: &Image) -> Self {
        Self {
            internal_format: glow::RGB,
            format: channel_format(image.channel_count()),
            pixel_type: glow::UNSIGNED_BYTE,
            min_filter: glow::LINEAR,
            mag_filter: glow::LINEAR,
            wrap_s: glow::CLAMP_TO_EDGE,
            wrap_t: glow::CLAMP_TO_EDGE,
            mipmaps: false,
        }
    }
}

/// Represents a 2D texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
    format: u32,
    pixel_type: u32,
}

impl Texture {
    /// Allocates an empty texture, typically a framebuffer attachment.
    pub fn create(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        format: u32,
        pixel_type: u32,
    ) -> Result<Self, ResourceError> {
        let params = TextureParams::for_target(format, pixel_type);
        Self::upload(gl, width, height, &params, None)
    }

    /// Creates a mipmapped texture from the given [`Image`].
    pub fn from_image(gl: &Arc<glow::Context>, image: &Image) -> Result<Self, ResourceError> {
        let params = TextureParams::for_image(image);
        Self::upload(gl, image.width(), image.height(), &params, Some(image.data()))
    }

    fn upload(
        gl: &Arc<glow::Context>,
        width: u32,
        height: u32,
        params: &TextureParams,
        data: Option<&[u8]>,
    ) -> Result<Self, ResourceError> {
        if let Some(data) = data {
            params.check_data(width, height, data)?;
        }
        let id = unsafe { gl.create_texture().map_err(ResourceError::Gl)? };
        // Owning the id from here on deletes it on every exit path.
        let texture = Self {
            gl: Arc::clone(gl),
            id,
            width,
            height,
            format: params.internal_format,
            pixel_type: params.pixel_type,
        };

        texture.bind(0);
        texture.set_filter(params.min_filter, params.mag_filter);
        texture.set_wrap(params.wrap_s, params.wrap_t);
        unsafe {
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                params.internal_format as i32,
                width as i32,
                height as i32,
                0,
                params.format,
                params.pixel_type,
                glow::PixelUnpackData::Slice(data),
            );
            if params.mipmaps {
                gl.generate_mipmap(glow::TEXTURE_2D);
            }
        }

        Ok(texture)
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }

    /// Sets the minification and magnification filters. Leaves the texture bound.
    pub fn set_filter(&self, min_filter: u32, mag_filter: u32) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, min_filter as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, mag_filter as i32);
        }
    }

    /// Sets the wrap modes. Leaves the texture bound.
    pub fn set_wrap(&self, wrap_s: u32, wrap_t: u32) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap_s as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap_t as i32);
        }
    }

    /// Sets the color sampled outside the texture with `CLAMP_TO_BORDER` wrapping.
    pub fn set_border_color(&self, color: Vec4) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            self.gl.tex_parameter_f32_slice(
                glow::TEXTURE_2D,
                glow::TEXTURE_BORDER_COLOR,
                &color.to_array(),
            );
        }
    }

    pub fn id(&self) -> glow::Texture {
        self.id
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Storage format.
    pub fn format(&self) -> u32 {
        self.format
    }

    pub fn pixel_type(&self) -> u32 {
        self.pixel_type
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

/// Represents a cube map texture stored on the GPU side.
pub struct CubeTexture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
}

impl CubeTexture {
    /// Creates a cube map from face images ordered +X, -X, +Y, -Y, +Z, -Z.
    ///
    /// Missing faces are left unallocated and faces past the sixth are ignored.
    pub fn from_images(gl: &Arc<glow::Context>, images: &[Image]) -> Result<Self, ResourceError> {
        for image in images.iter().take(CUBE_FACES) {
            let params = TextureParams::for_cube_face(image);
            params.check_data(image.width(), image.height(), image.data())?;
        }
        let id = unsafe { gl.create_texture().map_err(ResourceError::Gl)? };
        let texture = Self {
            gl: Arc::clone(gl),
            id,
        };

        if images.len() > CUBE_FACES {
            log::warn!(
                "cube texture given {} images, only the first {CUBE_FACES} are used",
                images.len()
            );
        }

        texture.bind(0);
        unsafe {
            let target = glow::TEXTURE_CUBE_MAP;
            gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_R, glow::CLAMP_TO_EDGE as i32);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);

            for (i, image) in images.iter().take(CUBE_FACES).enumerate() {
                let params = TextureParams::for_cube_face(image);
                if image.channel_count() != 3 {
                    log::warn!(
                        "cube face {i} has {} channels but is stored as RGB",
                        image.channel_count()
                    );
                }
                gl.tex_image_2d(
                    glow::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32,
                    0,
                    params.internal_format as i32,
                    image.width() as i32,
                    image.height() as i32,
                    0,
                    params.format,
                    params.pixel_type,
                    glow::PixelUnpackData::Slice(Some(image.data())),
                );
            }
        }

        Ok(texture)
    }

    /// Binds the cube map to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(self.id));
        }
    }

    pub fn id(&self) -> glow::Texture {
        self.id
    }
}

impl Drop for CubeTexture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_image_params() {
        let image = Image::new(4, 4, 3).unwrap();
        let params = TextureParams::for_image(&image);
        assert_eq!(params.internal_format, glow::RGB);
        assert_eq!(params.format, glow::RGB);
        assert_eq!(params.pixel_type, glow::UNSIGNED_BYTE);
        assert_eq!(params.min_filter, glow::LINEAR_MIPMAP_LINEAR);
        assert_eq!(params.mag_filter, glow::LINEAR);
        assert_eq!(params.wrap_s, glow::CLAMP_TO_EDGE);
        assert_eq!(params.wrap_t, glow::CLAMP_TO_EDGE);
        assert!(params.mipmaps);
    }

    #[test]
    fn test_channel_format() {
        assert_eq!(channel_format(1), glow::RED);
        assert_eq!(channel_format(2), glow::RG);
        assert_eq!(channel_format(3), glow::RGB);
        assert_eq!(channel_format(4), glow::RGBA);
        assert_eq!(channel_format(7), glow::RGBA);
    }

    #[test]
    fn test_target_params() {
        let params = TextureParams::for_target(glow::RGB16F, glow::FLOAT);
        assert_eq!(params.internal_format, glow::RGB16F);
        assert_eq!(params.format, glow::RGB);
        assert_eq!(params.pixel_type, glow::FLOAT);
        assert_eq!(params.min_filter, glow::LINEAR);
        assert!(!params.mipmaps);

        assert_eq!(image_format_for(glow::DEPTH_COMPONENT), glow::DEPTH_COMPONENT);
        assert_eq!(image_format_for(glow::RG32F), glow::RG);
        assert_eq!(image_format_for(GL_R), glow::RED);
        assert_eq!(image_format_for(glow::R32F), glow::RED);
        assert_eq!(image_format_for(glow::RGBA16F), glow::RGBA);
    }

    #[test]
    fn test_cube_face_storage_is_rgb() {
        let params = TextureParams::for_cube_face(&Image::new(2, 2, 4).unwrap());
        assert_eq!(params.internal_format, glow::RGB);
        assert_eq!(params.format, glow::RGBA);
        assert!(!params.mipmaps);
    }

    #[test]
    fn test_short_data_rejected() {
        let image = Image::new(4, 4, 3).unwrap();
        let params = TextureParams::for_image(&image);
        assert_eq!(params.upload_len(4, 4), Some(48));
        assert!(params.check_data(4, 4, image.data()).is_ok());
        assert!(matches!(params.check_data(4, 4, &[]), Err(ResourceError::Gl(_))));

        let rgba = TextureParams::for_cube_face(&Image::new(4, 4, 4).unwrap());
        assert!(rgba.check_data(4, 4, &[0; 48]).is_err());
    }

    #[test]
    fn test_float_data_not_uploaded_from_bytes() {
        let params = TextureParams::for_target(glow::RGB16F, glow::FLOAT);
        assert_eq!(params.upload_len(2, 2), None);
        assert!(params.check_data(2, 2, &[0; 64]).is_err());
    }
}
