/// WGSL shader for the textured mesh: one combined transform, one sampled texture.
pub const TEXTURED_SHADER: &str = r#"
struct Uniforms {
    pvm: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var mesh_texture: texture_2d<f32>;
@group(1) @binding(1)
var mesh_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.pvm * vec4<f32>(vertex.position, 1.0);
    // Rows are uploaded bottom-up, so v = 0 samples the bottom of the source image.
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(mesh_texture, mesh_sampler, in.uv);
}
"#;
