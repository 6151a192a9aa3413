use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader};

use crate::distortion::{AMPLITUDE, GRID_SIZE, RADIUS};
use crate::error::{EffectError, Result};

pub const VERTEX: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec2 a_uv;

uniform mat4 u_projection;
uniform mat4 u_model;

out vec2 v_uv;

void main() {
    v_uv = a_uv;
    gl_Position = u_projection * u_model * vec4(a_position, 1.0);
}
"#;

/// Fragment stage with the distortion constants baked in.
pub fn fragment_source() -> String {
    format!(
        r#"#version 300 es
precision highp float;

uniform sampler2D u_texture;
uniform vec2 u_mouse;
uniform vec2 u_prevMouse;

in vec2 v_uv;
out vec4 outColor;

void main() {{
    vec2 grid = floor(v_uv * {grid:.1}) / {grid:.1};
    vec2 center = grid + vec2(1.0 / {grid:.1});
    vec2 moveDir = u_mouse - u_prevMouse;
    float dist = length(center - u_mouse);
    float strength = smoothstep({radius:.3}, 0.0, dist);
    vec2 offset = strength * -moveDir * {amplitude:.3};
    outColor = texture(u_texture, v_uv - offset);
}}
"#,
        grid = GRID_SIZE,
        radius = RADIUS,
        amplitude = AMPLITUDE,
    )
}

pub fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment = match compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(Some(&vertex));
            return Err(err);
        }
    };
    let Some(program) = gl.create_program() else {
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));
        return Err(EffectError::Create("program"));
    };
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    gl.detach_shader(&program, &vertex);
    gl.detach_shader(&program, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));
    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        gl.delete_program(Some(&program));
        Err(EffectError::Link(info))
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or(EffectError::Create("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        gl.delete_shader(Some(&shader));
        Err(EffectError::Shader(info))
    }
}
