//! Full-screen quad geometry and its pass-through vertex shader.
//!
//! Two triangles cover clip space from (-1, -1) to (1, 1). The quad is
//! uploaded once as a static vertex buffer; every frame draws all six
//! vertices with `TRIANGLES`.

/// Name of the vertex attribute carrying clip-space positions.
pub const POSITION_ATTRIBUTE: &str = "position";

/// Components per vertex in [`QUAD_VERTICES`].
pub const COMPONENTS_PER_VERTEX: i32 = 2;

/// Clip-space positions of the two quad triangles, flattened `x, y` pairs.
pub const QUAD_VERTICES: [f32; 12] = [
    -1.0, -1.0, //
    1.0, -1.0, //
    -1.0, 1.0, //
    -1.0, 1.0, //
    1.0, -1.0, //
    1.0, 1.0, //
];

/// Number of vertices issued per draw call.
pub const QUAD_VERTEX_COUNT: i32 = QUAD_VERTICES.len() as i32 / COMPONENTS_PER_VERTEX;

/// GLSL ES 1.00 vertex shader that forwards `position` to `gl_Position`.
pub const QUAD_VERTEX_SHADER: &str = r#"
#ifdef GL_FRAGMENT_PRECISION_HIGH
precision highp float;
#else
precision mediump float;
#endif

attribute vec2 position;

void main(void) {
    gl_Position = vec4(position, 0., 1.);
}
"#;
