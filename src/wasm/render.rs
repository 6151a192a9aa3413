use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebglLoseContext, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::config::EffectConfig;
use crate::error::{EffectError, Result};
use crate::frame::FrameUniforms;
use crate::layout::BitmapSize;
use crate::viewport::Viewport;

use super::{shader, texture};

// must match the `layout(location)` qualifiers in `shader::VERTEX`
const POSITION_ATTRIB: u32 = 0;
const UV_ATTRIB: u32 = 1;
/// x, y, z, u, v
const VERTEX_FLOATS: i32 = 5;

// Unit quad as a triangle strip, UV origin bottom-left.
#[rustfmt::skip]
const QUAD: [f32; 20] = [
    -0.5, -0.5, 0.0,  0.0, 0.0,
     0.5, -0.5, 0.0,  1.0, 0.0,
    -0.5,  0.5, 0.0,  0.0, 1.0,
     0.5,  0.5, 0.0,  1.0, 1.0,
];

#[derive(Default)]
struct Uniforms {
    projection: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    mouse: Option<WebGlUniformLocation>,
    prev_mouse: Option<WebGlUniformLocation>,
}

/// GL state for one effect: the full-surface quad, the distortion program
/// and the current text texture.
pub struct Renderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    texture: Option<WebGlTexture>,
    texture_size: BitmapSize,
    uniforms: Uniforms,
    viewport: Viewport,
    /// Texture uploads and projection updates since construction.
    pub texture_generations: u32,
    pub projection_updates: u32,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, viewport: Viewport, config: &EffectConfig) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(EffectError::ContextUnavailable("WebGL2"))?
            .dyn_into()
            .map_err(|_| EffectError::ContextUnavailable("WebGL2"))?;

        let (program, vao, buffer) = match create_pipeline(&gl) {
            Ok(parts) => parts,
            Err(err) => {
                lose_context(&gl);
                return Err(err);
            }
        };

        let uniforms = Uniforms {
            projection: gl.get_uniform_location(&program, "u_projection"),
            model: gl.get_uniform_location(&program, "u_model"),
            texture: gl.get_uniform_location(&program, "u_texture"),
            mouse: gl.get_uniform_location(&program, "u_mouse"),
            prev_mouse: gl.get_uniform_location(&program, "u_prevMouse"),
        };

        let mut renderer = Renderer {
            canvas,
            gl,
            program,
            vao,
            buffer,
            texture: None,
            texture_size: viewport.bitmap(),
            uniforms,
            viewport,
            texture_generations: 0,
            projection_updates: 0,
        };
        if let Err(err) = renderer.resize(viewport, config) {
            renderer.release();
            return Err(err);
        }
        Ok(renderer)
    }

    pub fn texture_size(&self) -> BitmapSize {
        self.texture_size
    }

    /// Regenerates the texture and camera for a new surface size.
    pub fn resize(&mut self, viewport: Viewport, config: &EffectConfig) -> Result<()> {
        self.viewport = viewport;
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
        self.gl.viewport(0, 0, viewport.width as i32, viewport.height as i32);
        self.upload_texture(config)?;
        self.update_projection();
        Ok(())
    }

    fn upload_texture(&mut self, config: &EffectConfig) -> Result<()> {
        let size = self.viewport.bitmap();
        let bitmap = texture::rasterize_text(config, size)?;

        let gl = &self.gl;
        let texture = gl.create_texture().ok_or(EffectError::Create("texture"))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
        let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_canvas_element(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            &bitmap,
        );
        if let Err(err) = uploaded {
            gl.delete_texture(Some(&texture));
            return Err(err.into());
        }
        gl.generate_mipmap(GL::TEXTURE_2D);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR_MIPMAP_LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);

        if let Some(stale) = self.texture.replace(texture) {
            gl.delete_texture(Some(&stale));
        }
        self.texture_size = size;
        self.texture_generations += 1;
        Ok(())
    }

    fn update_projection(&mut self) {
        let projection = self.viewport.bounds().projection().to_cols_array();
        let model = self.viewport.model().to_cols_array();
        self.gl.use_program(Some(&self.program));
        self.gl
            .uniform_matrix4fv_with_f32_array(self.uniforms.projection.as_ref(), false, &projection);
        self.gl
            .uniform_matrix4fv_with_f32_array(self.uniforms.model.as_ref(), false, &model);
        self.projection_updates += 1;
    }

    pub fn draw(&self, frame: &FrameUniforms) {
        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, self.texture.as_ref());
        gl.uniform1i(self.uniforms.texture.as_ref(), 0);
        gl.uniform2f(self.uniforms.mouse.as_ref(), frame.mouse[0], frame.mouse[1]);
        gl.uniform2f(
            self.uniforms.prev_mouse.as_ref(),
            frame.prev_mouse[0],
            frame.prev_mouse[1],
        );
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        gl.bind_vertex_array(None);
    }

    /// Frees every GL object and drops the context. The canvas itself is
    /// detached by the owner.
    pub fn release(self) {
        let gl = &self.gl;
        if let Some(texture) = &self.texture {
            gl.delete_texture(Some(texture));
        }
        gl.delete_buffer(Some(&self.buffer));
        gl.delete_vertex_array(Some(&self.vao));
        gl.delete_program(Some(&self.program));
        lose_context(gl);
    }
}

/// Program plus the quad's VAO and vertex buffer. Anything created before
/// a failure is deleted again.
fn create_pipeline(gl: &GL) -> Result<(WebGlProgram, WebGlVertexArrayObject, WebGlBuffer)> {
    let program = shader::link_program(gl, shader::VERTEX, &shader::fragment_source())?;
    let Some(vao) = gl.create_vertex_array() else {
        gl.delete_program(Some(&program));
        return Err(EffectError::Create("vertex array"));
    };
    let Some(buffer) = gl.create_buffer() else {
        gl.delete_vertex_array(Some(&vao));
        gl.delete_program(Some(&program));
        return Err(EffectError::Create("buffer"));
    };

    gl.bind_vertex_array(Some(&vao));
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let data = Float32Array::from(&QUAD[..]);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);
    let stride = VERTEX_FLOATS * 4;
    gl.vertex_attrib_pointer_with_i32(POSITION_ATTRIB, 3, GL::FLOAT, false, stride, 0);
    gl.enable_vertex_attrib_array(POSITION_ATTRIB);
    gl.vertex_attrib_pointer_with_i32(UV_ATTRIB, 2, GL::FLOAT, false, stride, 3 * 4);
    gl.enable_vertex_attrib_array(UV_ATTRIB);
    gl.bind_vertex_array(None);
    Ok((program, vao, buffer))
}

fn lose_context(gl: &GL) {
    if let Ok(Some(ext)) = gl.get_extension("WEBGL_lose_context") {
        ext.unchecked_into::<WebglLoseContext>().lose_context();
    }
}
