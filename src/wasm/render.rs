use glam::Mat4;
use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::config::LandingConfig;
use crate::error::{LandingError, Result};
use crate::field::ParticleField;
use crate::surface::PointRenderer;

const VERTEX_SHADER: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;

uniform mat4 u_view_projection;
uniform mat4 u_model;
uniform float u_point_size;
uniform float u_size_scale;

out vec3 v_color;

void main() {
    gl_Position = u_view_projection * u_model * vec4(a_position, 1.0);
    // Attenuate with distance so far points shrink.
    gl_PointSize = u_point_size * u_size_scale / gl_Position.w;
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec3 v_color;
uniform float u_opacity;

out vec4 out_color;

void main() {
    out_color = vec4(v_color, u_opacity);
}
"#;

struct Uniforms {
    view_projection: WebGlUniformLocation,
    model: WebGlUniformLocation,
    point_size: WebGlUniformLocation,
    size_scale: WebGlUniformLocation,
    opacity: WebGlUniformLocation,
}

/// Point-cloud renderer on a WebGL2 canvas.
pub struct WebGlPoints {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    positions: WebGlBuffer,
    colors: WebGlBuffer,
    uniforms: Uniforms,
    point_size: f32,
    opacity: f32,
    max_pixel_ratio: f64,
    size_scale: f32,
    colors_uploaded: bool,
    released: bool,
}

impl WebGlPoints {
    /// Fails with [`LandingError::RendererUnavailable`] when the browser has
    /// no WebGL2.
    pub fn new(canvas: HtmlCanvasElement, config: &LandingConfig) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|err| LandingError::RendererUnavailable(format!("{err:?}")))?
            .ok_or_else(|| LandingError::RendererUnavailable("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| LandingError::RendererUnavailable("context is not WebGL2".into()))?;

        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));

        let uniforms = Uniforms {
            view_projection: uniform(&gl, &program, "u_view_projection")?,
            model: uniform(&gl, &program, "u_model")?,
            point_size: uniform(&gl, &program, "u_point_size")?,
            size_scale: uniform(&gl, &program, "u_size_scale")?,
            opacity: uniform(&gl, &program, "u_opacity")?,
        };

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| LandingError::RendererUnavailable("no vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));
        let positions = attribute_buffer(&gl, 0)?;
        let colors = attribute_buffer(&gl, 1)?;
        gl.bind_vertex_array(None);

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        log::info!("WebGL2 point renderer ready");
        Ok(Self {
            canvas,
            gl,
            program,
            vao,
            positions,
            colors,
            uniforms,
            point_size: config.point_size,
            opacity: config.point_opacity,
            max_pixel_ratio: config.camera.max_pixel_ratio,
            size_scale: 1.0,
            colors_uploaded: false,
            released: false,
        })
    }
}

impl PointRenderer for WebGlPoints {
    fn resize(&mut self, width: f64, height: f64) {
        let ratio = window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .min(self.max_pixel_ratio);
        let pixel_width = (width * ratio) as u32;
        let pixel_height = (height * ratio) as u32;
        self.canvas.set_width(pixel_width);
        self.canvas.set_height(pixel_height);
        let style = self.canvas.style();
        style.set_property("width", &format!("{width}px")).ok();
        style.set_property("height", &format!("{height}px")).ok();
        self.gl.viewport(0, 0, pixel_width as i32, pixel_height as i32);
        self.size_scale = pixel_height as f32 * 0.5;
    }

    fn draw(&mut self, field: &ParticleField, view_projection: Mat4, model: Mat4) {
        if self.released {
            return;
        }
        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        if !self.colors_uploaded {
            upload(gl, &self.colors, field.colors(), GL::STATIC_DRAW);
            self.colors_uploaded = true;
        }
        upload(gl, &self.positions, field.positions(), GL::DYNAMIC_DRAW);

        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.uniforms.view_projection),
            false,
            &view_projection.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.uniforms.model),
            false,
            &model.to_cols_array(),
        );
        gl.uniform1f(Some(&self.uniforms.point_size), self.point_size);
        gl.uniform1f(Some(&self.uniforms.size_scale), self.size_scale);
        gl.uniform1f(Some(&self.uniforms.opacity), self.opacity);

        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.draw_arrays(GL::POINTS, 0, field.len() as i32);
        gl.bind_vertex_array(None);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.gl.delete_buffer(Some(&self.positions));
        self.gl.delete_buffer(Some(&self.colors));
        self.gl.delete_vertex_array(Some(&self.vao));
        self.gl.delete_program(Some(&self.program));
        self.gl.clear(GL::COLOR_BUFFER_BIT);
        self.released = true;
        log::info!("WebGL2 point renderer released");
    }
}

fn upload(gl: &GL, buffer: &WebGlBuffer, data: &[f32], usage: u32) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    let array = Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, usage);
}

/// Create a buffer feeding the three-float attribute at `location` of the
/// bound vertex array.
fn attribute_buffer(gl: &GL, location: u32) -> Result<WebGlBuffer> {
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| LandingError::RendererUnavailable("no buffer".into()))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, 3, GL::FLOAT, false, 0, 0);
    Ok(buffer)
}

fn uniform(gl: &GL, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| LandingError::Shader(format!("uniform {name} not found")))
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| LandingError::Shader("unable to create shader".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(LandingError::Shader(log))
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| LandingError::Shader("unable to create program".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(LandingError::Shader(log))
    }
}
